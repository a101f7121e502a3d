//! Patient registration.
//!
//! There is no patient event in the admin vocabulary, but registration does
//! change the dashboard counters, so a fresh snapshot is published.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use medibook_common::PrefixedId;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody, FieldError};
use crate::models::patient::Patient;
use crate::routes::dashboard::publish_counts;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/patients", post(register_patient))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub name: String,
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/patients",
    tag = "Patients",
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Validation failed", body = ApiErrorBody),
    ),
)]
pub async fn register_patient(
    State(state): State<AppState>,
    Json(body): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let name = body.name.trim();
    let email = body.email.trim();

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(FieldError {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        });
    }
    if email.is_empty() || !email.contains('@') {
        errors.push(FieldError {
            field: "email".to_string(),
            message: "A valid email is required".to_string(),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let patient = Patient {
        id: Patient::generate(),
        name: name.to_string(),
        email: email.to_string(),
        created_at: Utc::now(),
    };
    state.directory.insert_patient(patient.clone()).await?;

    publish_counts(&state).await;

    Ok((StatusCode::CREATED, Json(patient)))
}
