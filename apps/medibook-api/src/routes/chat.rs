//! Chat history and read-state endpoints.
//!
//! History replay is served over the authenticated REST boundary, not over
//! the socket. Clients fetch history first, then append whatever arrives
//! live; the socket alone does not guarantee gap-free delivery across a
//! reconnect.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::models::chat_message::ChatMessage;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments/{appointment_id}/messages",
            get(message_history),
        )
        .route(
            "/appointments/{appointment_id}/messages/read",
            post(mark_read),
        )
}

// ---------------------------------------------------------------------------
// GET /api/v1/appointments/{appointment_id}/messages
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/appointments/{appointment_id}/messages",
    tag = "Chat",
    security(("bearer" = [])),
    params(
        ("appointment_id" = String, Path, description = "Appointment ID"),
    ),
    responses(
        (status = 200, description = "Messages, oldest first", body = Vec<ChatMessage>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn message_history(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = state.chat_store.history(&appointment_id).await?;
    Ok(Json(messages))
}

// ---------------------------------------------------------------------------
// POST /api/v1/appointments/{appointment_id}/messages/read
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkReadResponse {
    pub updated: usize,
}

#[utoipa::path(
    post,
    path = "/api/v1/appointments/{appointment_id}/messages/read",
    tag = "Chat",
    security(("bearer" = [])),
    params(
        ("appointment_id" = String, Path, description = "Appointment ID"),
    ),
    responses(
        (status = 200, description = "Messages addressed to the caller marked read", body = MarkReadResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn mark_read(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let updated = state.chat_store.mark_read(&appointment_id, &user_id).await?;
    Ok(Json(MarkReadResponse { updated }))
}
