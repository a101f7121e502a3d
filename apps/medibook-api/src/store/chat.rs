//! Append-only chat message store.

use async_trait::async_trait;
use chrono::Utc;
use medibook_common::PrefixedId;
use parking_lot::Mutex;

use crate::error::ApiError;
use crate::models::chat_message::{ChatMessage, NewChatMessage};

/// Abstraction over the conversation log, keyed by appointment.
///
/// Backed by the platform's document store in production and an in-memory
/// log in tests. The store assigns `id` and `created_at` at persistence
/// time; `is_read` starts false and only flips through `mark_read`.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Persist a new message and return the stored record.
    async fn append(&self, new: NewChatMessage) -> Result<ChatMessage, ApiError>;

    /// All messages for an appointment, ascending by `created_at`.
    async fn history(&self, appointment_id: &str) -> Result<Vec<ChatMessage>, ApiError>;

    /// Mark every message addressed to `receiver_id` in this appointment as
    /// read. Returns the number of messages updated.
    async fn mark_read(&self, appointment_id: &str, receiver_id: &str)
        -> Result<usize, ApiError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (for tests / single-process deployments)
// ---------------------------------------------------------------------------

pub struct MemoryChatStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for MemoryChatStore {
    async fn append(&self, new: NewChatMessage) -> Result<ChatMessage, ApiError> {
        let message = ChatMessage {
            id: ChatMessage::generate(),
            appointment_id: new.appointment_id,
            sender_id: new.sender_id,
            sender_role: new.sender_role,
            receiver_id: new.receiver_id,
            receiver_role: new.receiver_role,
            body: new.body,
            is_read: false,
            created_at: Utc::now(),
        };
        self.messages.lock().push(message.clone());
        Ok(message)
    }

    async fn history(&self, appointment_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .iter()
            .filter(|m| m.appointment_id == appointment_id)
            .cloned()
            .collect();
        // Stable sort: same-timestamp messages keep insertion order.
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn mark_read(
        &self,
        appointment_id: &str,
        receiver_id: &str,
    ) -> Result<usize, ApiError> {
        let mut messages = self.messages.lock();
        let mut updated = 0;
        for message in messages.iter_mut() {
            if message.appointment_id == appointment_id
                && message.receiver_id == receiver_id
                && !message.is_read
            {
                message.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
