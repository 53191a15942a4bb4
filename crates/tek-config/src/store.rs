//! Local libSQL store settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_db_path() -> PathBuf {
    PathBuf::from(".teknofest/teknofest.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file used by `--local` commands.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}
