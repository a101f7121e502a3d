//! Per-connection session state.
//!
//! A session is owned by its connection task, so membership mutations need
//! no locking: teardown of the task is teardown of the session.

use std::collections::HashSet;

/// State for a single chat connection.
pub struct ChatSession {
    /// Unique session identifier (`ses_` prefixed ULID).
    pub session_id: String,
    /// Appointment rooms this connection has joined.
    rooms: HashSet<String>,
}

impl ChatSession {
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            rooms: HashSet::new(),
        }
    }

    /// Join a room. Returns false if already a member (join is idempotent).
    pub fn join(&mut self, appointment_id: String) -> bool {
        self.rooms.insert(appointment_id)
    }

    /// Whether this connection should receive events for a given room.
    pub fn is_member(&self, appointment_id: &str) -> bool {
        self.rooms.contains(appointment_id)
    }
}

/// State for a single authenticated admin connection. Admin sessions are
/// implicitly in the one shared admin room; there is nothing to join.
pub struct AdminSession {
    /// Unique session identifier (`ses_` prefixed ULID).
    pub session_id: String,
    /// The admin identity from the verified handshake token.
    pub admin_id: String,
}

impl AdminSession {
    pub fn new(session_id: String, admin_id: String) -> Self {
        Self {
            session_id,
            admin_id,
        }
    }
}
