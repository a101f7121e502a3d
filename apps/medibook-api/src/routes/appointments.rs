//! Appointment booking and status endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use medibook_common::PrefixedId;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::{AdminUser, AuthUser};
use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::gateway::events::AdminEvent;
use crate::models::appointment::{Appointment, UpdateAppointment};
use crate::routes::dashboard::publish_counts;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", post(book_appointment).get(list_appointments))
        .route(
            "/appointments/{appointment_id}",
            axum::routing::patch(update_appointment),
        )
}

// ---------------------------------------------------------------------------
// POST /api/v1/appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub slot_date: String,
    pub slot_time: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "Appointments",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
        (status = 404, description = "Doctor not found", body = ApiErrorBody),
        (status = 409, description = "Doctor not available", body = ApiErrorBody),
    ),
)]
pub async fn book_appointment(
    AuthUser { user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let mut errors = Vec::new();
    if body.slot_date.trim().is_empty() {
        errors.push(FieldError {
            field: "slotDate".to_string(),
            message: "Slot date is required".to_string(),
        });
    }
    if body.slot_time.trim().is_empty() {
        errors.push(FieldError {
            field: "slotTime".to_string(),
            message: "Slot time is required".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let doctor = state
        .directory
        .get_doctor(&body.doctor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;
    if !doctor.available {
        return Err(ApiError::conflict("Doctor is not available"));
    }

    let appointment = Appointment {
        id: Appointment::generate(),
        doctor_id: doctor.id.clone(),
        patient_id: user_id,
        slot_date: body.slot_date,
        slot_time: body.slot_time,
        amount: doctor.fees,
        cancelled: false,
        payment: false,
        is_completed: false,
        created_at: Utc::now(),
    };
    state
        .directory
        .insert_appointment(appointment.clone())
        .await?;

    state.admin.dispatch(AdminEvent::AppointmentCreated {
        appointment: appointment.clone(),
    });
    publish_counts(&state).await;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// ---------------------------------------------------------------------------
// GET /api/v1/appointments
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "Appointments",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All appointments, oldest first", body = Vec<Appointment>),
        (status = 403, description = "Forbidden", body = ApiErrorBody),
    ),
)]
pub async fn list_appointments(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = state.directory.list_appointments().await?;
    Ok(Json(appointments))
}

// ---------------------------------------------------------------------------
// PATCH /api/v1/appointments/{appointment_id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/v1/appointments/{appointment_id}",
    tag = "Appointments",
    security(("bearer" = [])),
    params(
        ("appointment_id" = String, Path, description = "Appointment ID"),
    ),
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 404, description = "Appointment not found", body = ApiErrorBody),
    ),
)]
pub async fn update_appointment(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    Json(body): Json<UpdateAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    let updated = state
        .directory
        .update_appointment(&appointment_id, body)
        .await?
        .ok_or_else(|| ApiError::not_found("Appointment not found"))?;

    state.admin.dispatch(AdminEvent::AppointmentUpdated {
        appointment: updated.clone(),
    });
    // Cancelling keeps the record, so the count is unchanged and no
    // counters snapshot is published.

    Ok(Json(updated))
}
