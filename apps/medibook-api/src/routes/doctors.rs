//! Doctor directory endpoints (admin-managed).
//!
//! Every committed write is relayed to the admin channel, followed by a
//! fresh counters snapshot when the doctor count changed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use medibook_common::PrefixedId;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AdminUser;
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::gateway::events::AdminEvent;
use crate::models::doctor::{Doctor, UpdateDoctor};
use crate::routes::dashboard::publish_counts;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", post(create_doctor).get(list_doctors))
        .route(
            "/doctors/{doctor_id}",
            axum::routing::patch(update_doctor).delete(delete_doctor),
        )
}

// ---------------------------------------------------------------------------
// POST /api/v1/doctors
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    pub name: String,
    pub speciality: String,
    pub fees: i64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[utoipa::path(
    post,
    path = "/api/v1/doctors",
    tag = "Doctors",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Doctor created", body = Doctor),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
        (status = 403, description = "Forbidden", body = ApiErrorBody),
    ),
)]
pub async fn create_doctor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let name = body.name.trim();
    let speciality = body.speciality.trim();

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "Doctor name is required".to_string(),
        });
    }
    if speciality.is_empty() {
        errors.push(FieldError {
            field: "speciality".to_string(),
            message: "Speciality is required".to_string(),
        });
    }
    if body.fees < 0 {
        errors.push(FieldError {
            field: "fees".to_string(),
            message: "Fees must not be negative".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let doctor = Doctor {
        id: Doctor::generate(),
        name: name.to_string(),
        speciality: speciality.to_string(),
        fees: body.fees,
        available: body.available,
        created_at: Utc::now(),
    };
    state.directory.insert_doctor(doctor.clone()).await?;

    state.admin.dispatch(AdminEvent::DoctorCreated {
        doctor: doctor.clone(),
    });
    publish_counts(&state).await;

    Ok((StatusCode::CREATED, Json(doctor)))
}

// ---------------------------------------------------------------------------
// GET /api/v1/doctors
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/doctors",
    tag = "Doctors",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All doctors, oldest first", body = Vec<Doctor>),
        (status = 403, description = "Forbidden", body = ApiErrorBody),
    ),
)]
pub async fn list_doctors(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctors = state.directory.list_doctors().await?;
    Ok(Json(doctors))
}

// ---------------------------------------------------------------------------
// PATCH /api/v1/doctors/{doctor_id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/v1/doctors/{doctor_id}",
    tag = "Doctors",
    security(("bearer" = [])),
    params(
        ("doctor_id" = String, Path, description = "Doctor ID"),
    ),
    responses(
        (status = 200, description = "Doctor updated", body = Doctor),
        (status = 404, description = "Doctor not found", body = ApiErrorBody),
    ),
)]
pub async fn update_doctor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
    Json(body): Json<UpdateDoctor>,
) -> Result<Json<Doctor>, ApiError> {
    let updated = state
        .directory
        .update_doctor(&doctor_id, body)
        .await?
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;

    state.admin.dispatch(AdminEvent::DoctorUpdated {
        doctor: updated.clone(),
    });
    // Count unchanged, so no counters snapshot.

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /api/v1/doctors/{doctor_id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/v1/doctors/{doctor_id}",
    tag = "Doctors",
    security(("bearer" = [])),
    params(
        ("doctor_id" = String, Path, description = "Doctor ID"),
    ),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 404, description = "Doctor not found", body = ApiErrorBody),
    ),
)]
pub async fn delete_doctor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.directory.delete_doctor(&doctor_id).await? {
        return Err(ApiError::not_found("Doctor not found"));
    }

    state
        .admin
        .dispatch(AdminEvent::DoctorDeleted { id: doctor_id });
    publish_counts(&state).await;

    Ok(StatusCode::NO_CONTENT)
}
