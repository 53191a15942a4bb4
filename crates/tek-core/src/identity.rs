use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The admin performing an action, for cross-crate passing.
///
/// Produced by the local store on lookup or by the CLI from its config;
/// consumed by evaluation and weight-management operations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AdminIdentity {
    pub admin_id: i64,
    pub username: String,
    /// Gates weight management.
    pub is_superadmin: bool,
}
