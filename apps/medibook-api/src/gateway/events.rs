//! Wire-format events for both gateway channels.
//!
//! Every event lives in a closed enum, so adding one is a compile-visible
//! change at the emit site and the handle site alike; there is no
//! string-name dispatch anywhere.

use serde::{Deserialize, Serialize};

use crate::models::appointment::Appointment;
use crate::models::chat_message::{ChatMessage, NewChatMessage};
use crate::models::doctor::Doctor;

// ---------------------------------------------------------------------------
// Chat channel: client → server
// ---------------------------------------------------------------------------

/// Events a chat client may send, as `{"event": ..., "data": ...}` frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatClientEvent {
    /// Join the room named by an appointment id. Idempotent.
    JoinChat(String),
    /// Persist and fan out a message to the appointment's room.
    SendMessage(NewChatMessage),
}

// ---------------------------------------------------------------------------
// Chat channel: server → client
// ---------------------------------------------------------------------------

/// Events the server sends to chat clients.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatServerEvent {
    /// A persisted message, echoed to every room member including the sender.
    ReceiveMessage(ChatMessage),
    /// Local failure: validation or persistence. Sent only to the offender.
    Error(ErrorPayload),
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl ChatServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorPayload {
            message: message.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Admin channel: server → client
// ---------------------------------------------------------------------------

/// Domain events relayed to every connected admin session.
///
/// Internally tagged: each frame carries its `type` plus the payload fields,
/// e.g. `{"type": "doctor:created", "doctor": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdminEvent {
    #[serde(rename = "doctor:created")]
    DoctorCreated { doctor: Doctor },
    #[serde(rename = "doctor:updated")]
    DoctorUpdated { doctor: Doctor },
    #[serde(rename = "doctor:deleted")]
    DoctorDeleted { id: String },
    #[serde(rename = "appointment:created")]
    AppointmentCreated { appointment: Appointment },
    #[serde(rename = "appointment:updated")]
    AppointmentUpdated { appointment: Appointment },
    #[serde(rename = "dashboard:counts")]
    DashboardCounts {
        doctors: u64,
        appointments: u64,
        patients: u64,
    },
}

impl AdminEvent {
    /// The event's wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            AdminEvent::DoctorCreated { .. } => "doctor:created",
            AdminEvent::DoctorUpdated { .. } => "doctor:updated",
            AdminEvent::DoctorDeleted { .. } => "doctor:deleted",
            AdminEvent::AppointmentCreated { .. } => "appointment:created",
            AdminEvent::AppointmentUpdated { .. } => "appointment:updated",
            AdminEvent::DashboardCounts { .. } => "dashboard:counts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat_message::ParticipantRole;

    #[test]
    fn join_chat_parses_from_wire_form() {
        let event: ChatClientEvent =
            serde_json::from_str(r#"{"event": "join_chat", "data": "apt_123"}"#).unwrap();
        match event {
            ChatClientEvent::JoinChat(room) => assert_eq!(room, "apt_123"),
            other => panic!("expected JoinChat, got {other:?}"),
        }
    }

    #[test]
    fn send_message_parses_camel_case_payload() {
        let event: ChatClientEvent = serde_json::from_str(
            r#"{
                "event": "send_message",
                "data": {
                    "appointmentId": "apt_123",
                    "senderId": "pat_1",
                    "senderRole": "patient",
                    "receiverId": "doc_1",
                    "receiverRole": "doctor",
                    "body": "Hello"
                }
            }"#,
        )
        .unwrap();

        match event {
            ChatClientEvent::SendMessage(new) => {
                assert_eq!(new.appointment_id, "apt_123");
                assert_eq!(new.sender_role, ParticipantRole::Patient);
                assert_eq!(new.receiver_role, ParticipantRole::Doctor);
                assert_eq!(new.body, "Hello");
            }
            other => panic!("expected SendMessage, got {other:?}"),
        }
    }

    #[test]
    fn send_message_rejects_missing_fields() {
        let result: Result<ChatClientEvent, _> = serde_json::from_str(
            r#"{"event": "send_message", "data": {"appointmentId": "apt_123", "body": "hi"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_event_name_fails_to_parse() {
        let result: Result<ChatClientEvent, _> =
            serde_json::from_str(r#"{"event": "leave_chat", "data": "apt_123"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn error_event_wire_shape() {
        let json =
            serde_json::to_value(ChatServerEvent::error("Message body is required")).unwrap();
        assert_eq!(json["event"], "error");
        assert_eq!(json["data"]["message"], "Message body is required");
    }

    #[test]
    fn admin_event_carries_type_tag() {
        let json = serde_json::to_value(AdminEvent::DoctorDeleted {
            id: "doc_1".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "doctor:deleted");
        assert_eq!(json["id"], "doc_1");
    }

    #[test]
    fn dashboard_counts_wire_shape() {
        let json = serde_json::to_value(AdminEvent::DashboardCounts {
            doctors: 3,
            appointments: 7,
            patients: 12,
        })
        .unwrap();
        assert_eq!(json["type"], "dashboard:counts");
        assert_eq!(json["doctors"], 3);
        assert_eq!(json["appointments"], 7);
        assert_eq!(json["patients"], 12);
    }
}
