//! Admin broadcast channel: token-gated upgrade and relay loop.
//!
//! The handshake carries a `token` query parameter because this is a
//! persistent-connection upgrade, not a discrete request with headers the
//! browser WebSocket API could set. A failed check refuses the connection
//! with 401/403 before the protocol upgrade; rejection is terminal, never
//! half-open.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use medibook_common::id::{prefix, prefixed_ulid};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::auth::tokens::{self, Role};
use crate::error::ApiError;
use crate::AppState;

use super::session::AdminSession;

#[derive(Debug, Deserialize)]
pub struct AdminHandshake {
    #[serde(default)]
    token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/gateway/admin", get(ws_upgrade))
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<AdminHandshake>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let token = params
        .token
        .ok_or_else(|| ApiError::unauthorized("Missing token"))?;
    let claims = tokens::verify(&state.config.jwt_secret, &token)?;
    if claims.role != Role::Admin {
        return Err(ApiError::forbidden("Admin token required"));
    }

    Ok(ws.on_upgrade(move |socket| handle_connection(socket, state, claims.id)))
}

async fn handle_connection(socket: WebSocket, state: AppState, admin_id: String) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let session = AdminSession::new(prefixed_ulid(prefix::SESSION), admin_id);

    // Subscribing is what puts this session in the shared admin room; events
    // dispatched before this moment are permanently missed (the client
    // resyncs via the REST snapshots).
    let mut broadcast_rx = state.admin.subscribe();

    tracing::info!(
        session_id = %session.session_id,
        admin_id = %session.admin_id,
        "admin session joined"
    );

    loop {
        tokio::select! {
            // Client frames carry no meaning on this channel; only watch for
            // the connection going away.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(?e, session_id = %session.session_id, "ws read error");
                        break;
                    }
                    _ => continue,
                }
            }

            // Domain event from the fanout hub.
            result = broadcast_rx.recv() => {
                match result {
                    Ok(event) => {
                        let json = serde_json::to_string(event.as_ref()).unwrap();
                        if ws_tx.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            session_id = %session.session_id,
                            skipped = n,
                            "admin session lagged behind broadcast"
                        );
                        // Continue — we just drop the missed events.
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(
        session_id = %session.session_id,
        admin_id = %session.admin_id,
        "admin session ended"
    );
}
