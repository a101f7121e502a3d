use chrono::{DateTime, Utc};
use medibook_common::id::prefix;
use medibook_common::PrefixedId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub speciality: String,
    /// Consultation fee in the smallest currency unit.
    pub fees: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Doctor {
    const PREFIX: &'static str = prefix::DOCTOR;
}

/// Partial update applied to a doctor record.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub speciality: Option<String>,
    pub fees: Option<i64>,
    pub available: Option<bool>,
}
