//! Broadcast hubs for dispatching events to connected sessions.
//!
//! Each logical channel has a single `tokio::sync::broadcast` hub. Every
//! connected session subscribes and filters locally (chat sessions by room
//! membership; admin sessions take everything). Both hubs are owned by
//! `AppState`; there is no global connection handle anywhere.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::events::AdminEvent;
use crate::models::chat_message::ChatMessage;

/// Capacity of a hub's broadcast channel. Receivers that fall behind skip
/// messages (RecvError::Lagged), mirroring the no-replay delivery contract.
const BROADCAST_CAPACITY: usize = 4096;

/// A persisted message on its way to a chat room's members.
#[derive(Debug, Clone)]
pub struct ChatBroadcastPayload {
    /// The room (appointment) this message belongs to.
    pub appointment_id: String,
    /// The stored record, including server-assigned id and timestamp.
    pub message: ChatMessage,
}

/// Fan-out hub for the chat channel.
#[derive(Clone)]
pub struct ChatBroadcast {
    sender: broadcast::Sender<Arc<ChatBroadcastPayload>>,
}

impl ChatBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    /// Subscribe to the hub. Each chat session calls this once on connect.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ChatBroadcastPayload>> {
        self.sender.subscribe()
    }

    /// Dispatch a persisted message to every subscribed session.
    pub fn dispatch(&self, payload: ChatBroadcastPayload) {
        // send() returns Err if there are no receivers — that's fine.
        let _ = self.sender.send(Arc::new(payload));
    }
}

impl Default for ChatBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

/// Fan-out hub for the admin channel. Fire-and-forget: no ack, no retry,
/// no buffering for late joiners (they resync via the REST snapshots).
#[derive(Clone)]
pub struct AdminBroadcast {
    sender: broadcast::Sender<Arc<AdminEvent>>,
}

impl AdminBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { sender }
    }

    /// Subscribe to the hub. Each admin session calls this once on connect.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AdminEvent>> {
        self.sender.subscribe()
    }

    /// Relay a domain event to every connected admin session.
    pub fn dispatch(&self, event: AdminEvent) {
        tracing::debug!(event = event.name(), "admin event dispatched");
        let _ = self.sender.send(Arc::new(event));
    }
}

impl Default for AdminBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
