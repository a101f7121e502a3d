//! Chat channel: WebSocket upgrade handler and per-connection event loop.
//!
//! No handshake authentication: read access to a conversation is enforced
//! by the authenticated REST history endpoint, and the live path is
//! save-then-broadcast.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use medibook_common::id::{prefix, prefixed_ulid};
use tokio::sync::broadcast;

use crate::models::chat_message::NewChatMessage;
use crate::AppState;

use super::events::{ChatClientEvent, ChatServerEvent};
use super::fanout::ChatBroadcastPayload;
use super::session::ChatSession;

pub fn router() -> Router<AppState> {
    Router::new().route("/gateway/chat", get(ws_upgrade))
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

async fn handle_connection(socket: WebSocket, state: AppState) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut session = ChatSession::new(prefixed_ulid(prefix::SESSION));
    let mut broadcast_rx = state.chat.subscribe();

    tracing::info!(session_id = %session.session_id, "chat session connected");

    loop {
        tokio::select! {
            // Client sends us a frame.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let event: ChatClientEvent = match serde_json::from_str(&text) {
                            Ok(event) => event,
                            Err(_) => {
                                if send_event(&mut ws_tx, &ChatServerEvent::error("Invalid event payload")).await.is_err() {
                                    break;
                                }
                                continue;
                            }
                        };

                        match event {
                            ChatClientEvent::JoinChat(appointment_id) => {
                                if session.join(appointment_id.clone()) {
                                    tracing::debug!(
                                        session_id = %session.session_id,
                                        room = %appointment_id,
                                        "joined chat room"
                                    );
                                }
                            }
                            ChatClientEvent::SendMessage(new) => {
                                if handle_send(&state, &session, &mut ws_tx, new).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(?e, session_id = %session.session_id, "ws read error");
                        break;
                    }
                    _ => continue,
                }
            }

            // A persisted message from the fanout hub.
            result = broadcast_rx.recv() => {
                match result {
                    Ok(payload) => {
                        if !session.is_member(&payload.appointment_id) {
                            continue;
                        }

                        let event = ChatServerEvent::ReceiveMessage(payload.message.clone());
                        if send_event(&mut ws_tx, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            session_id = %session.session_id,
                            skipped = n,
                            "chat session lagged behind broadcast"
                        );
                        // Continue — we just drop the missed messages.
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }

    // Dropping the broadcast receiver and the session removes this
    // connection from every room at once.
    tracing::info!(session_id = %session.session_id, "chat session ended");
}

/// Validate, persist, and fan out one `send_message` event.
///
/// Validation and persistence failures stay local: a single `error` event
/// goes to the sender and nothing is broadcast. Returns `Err` only when the
/// sender's socket is gone and the loop should exit.
async fn handle_send(
    state: &AppState,
    session: &ChatSession,
    ws_tx: &mut SplitSink<WebSocket, Message>,
    new: NewChatMessage,
) -> Result<(), axum::Error> {
    if let Err(reason) = validate_send(&new) {
        return send_event(ws_tx, &ChatServerEvent::error(reason)).await;
    }

    let appointment_id = new.appointment_id.clone();
    match state.chat_store.append(new).await {
        Ok(message) => {
            // Broadcast order is persistence-completion order; the sender
            // hears its own echo through the hub like everyone else.
            state.chat.dispatch(ChatBroadcastPayload {
                appointment_id,
                message,
            });
            Ok(())
        }
        Err(err) => {
            tracing::error!(
                ?err,
                session_id = %session.session_id,
                room = %appointment_id,
                "failed to persist chat message"
            );
            send_event(ws_tx, &ChatServerEvent::error("Failed to save message")).await
        }
    }
}

fn validate_send(new: &NewChatMessage) -> Result<(), &'static str> {
    if new.body.trim().is_empty() {
        return Err("Message body is required");
    }
    if new.appointment_id.trim().is_empty()
        || new.sender_id.trim().is_empty()
        || new.receiver_id.trim().is_empty()
    {
        return Err("Missing message fields");
    }
    if new.sender_role == new.receiver_role {
        return Err("Sender and receiver roles must differ");
    }
    Ok(())
}

async fn send_event(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    event: &ChatServerEvent,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).unwrap();
    ws_tx.send(Message::Text(json.into())).await
}
