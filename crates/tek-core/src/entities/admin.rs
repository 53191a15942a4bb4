use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An evaluator account.
///
/// `evaluation_weight` ranges 0..=100. Weights are meant to sum to 100 across
/// non-superadmin admins; nothing enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(deserialize_with = "crate::weight::deserialize")]
    pub evaluation_weight: u8,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superadmin: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload of `POST /admin/register`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub registration_code: String,
}

const fn default_true() -> bool {
    true
}
