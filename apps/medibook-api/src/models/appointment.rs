use chrono::{DateTime, Utc};
use medibook_common::id::prefix;
use medibook_common::PrefixedId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    /// Booked slot, as the client-facing date/time strings.
    pub slot_date: String,
    pub slot_time: String,
    /// Amount due, copied from the doctor's fees at booking time.
    pub amount: i64,
    pub cancelled: bool,
    pub payment: bool,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Appointment {
    const PREFIX: &'static str = prefix::APPOINTMENT;
}

/// Status flags that may be patched after booking.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointment {
    pub cancelled: Option<bool>,
    pub payment: Option<bool>,
    pub is_completed: Option<bool>,
}
