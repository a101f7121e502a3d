use chrono::{DateTime, Utc};
use medibook_common::id::prefix;
use medibook_common::PrefixedId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl PrefixedId for Patient {
    const PREFIX: &'static str = prefix::PATIENT;
}
