use chrono::{DateTime, Utc};
use medibook_common::id::prefix;
use medibook_common::PrefixedId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a chat participant. Chat is strictly doctor ↔ patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Patient,
    Doctor,
}

/// A persisted chat message. Immutable once written except for `is_read`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub appointment_id: String,
    pub sender_id: String,
    pub sender_role: ParticipantRole,
    pub receiver_id: String,
    pub receiver_role: ParticipantRole,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for ChatMessage {
    const PREFIX: &'static str = prefix::MESSAGE;
}

/// A message as submitted by a client, before the store assigns id/timestamp.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub appointment_id: String,
    pub sender_id: String,
    pub sender_role: ParticipantRole,
    pub receiver_id: String,
    pub receiver_role: ParticipantRole,
    pub body: String,
}
