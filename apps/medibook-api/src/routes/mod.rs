pub mod appointments;
pub mod chat;
pub mod dashboard;
pub mod doctors;
pub mod health;
pub mod patients;

use axum::Router;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(crate::gateway::router())
        .nest(
            "/api/v1",
            chat::router()
                .merge(doctors::router())
                .merge(appointments::router())
                .merge(patients::router())
                .merge(dashboard::router()),
        )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Chat
        chat::message_history,
        chat::mark_read,
        // Doctors
        doctors::create_doctor,
        doctors::list_doctors,
        doctors::update_doctor,
        doctors::delete_doctor,
        // Appointments
        appointments::book_appointment,
        appointments::list_appointments,
        appointments::update_appointment,
        // Patients
        patients::register_patient,
        // Dashboard
        dashboard::get_counts,
    ),
    components(
        schemas(
            // Error types
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            // Models
            crate::models::chat_message::ChatMessage,
            crate::models::chat_message::ParticipantRole,
            crate::models::doctor::Doctor,
            crate::models::appointment::Appointment,
            crate::models::patient::Patient,
            crate::store::directory::DirectoryCounts,
            // Route request/response types
            chat::MarkReadResponse,
            doctors::CreateDoctorRequest,
            crate::models::doctor::UpdateDoctor,
            appointments::BookAppointmentRequest,
            crate::models::appointment::UpdateAppointment,
            patients::RegisterPatientRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Chat", description = "Conversation history and read state"),
        (name = "Doctors", description = "Doctor directory"),
        (name = "Appointments", description = "Appointment booking"),
        (name = "Patients", description = "Patient registration"),
        (name = "Dashboard", description = "Admin dashboard counters"),
    )
)]
pub struct ApiDoc;
