//! Dashboard counters: REST snapshot + live publication helper.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::middleware::AdminUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::gateway::events::AdminEvent;
use crate::store::directory::DirectoryCounts;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/counts", get(get_counts))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/counts",
    tag = "Dashboard",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current resource counts", body = DirectoryCounts),
        (status = 403, description = "Forbidden", body = ApiErrorBody),
    ),
)]
pub async fn get_counts(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<DirectoryCounts>, ApiError> {
    let counts = state.directory.counts().await?;
    Ok(Json(counts))
}

/// Read fresh counts from the store and relay them to the admin room.
///
/// Called by write handlers after any mutation that changes a count. The
/// write has already committed, so a failed read here is logged and
/// swallowed; the emit path has no failure signaling.
pub(crate) async fn publish_counts(state: &AppState) {
    match state.directory.counts().await {
        Ok(counts) => state.admin.dispatch(AdminEvent::DashboardCounts {
            doctors: counts.doctors,
            appointments: counts.appointments,
            patients: counts.patients,
        }),
        Err(err) => tracing::error!(?err, "failed to read dashboard counts"),
    }
}
