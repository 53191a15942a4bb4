use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Environment variable consulted when `--password` is omitted.
pub const PASSWORD_ENV_VAR: &str = "TEKNOFEST_ADMIN_PASSWORD";

/// Read a JSON payload file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid payload in {}", path.display()))
}

/// `--password`, falling back to [`PASSWORD_ENV_VAR`].
pub fn resolve_password(arg: Option<&str>) -> anyhow::Result<String> {
    arg.map(str::to_string)
        .or_else(|| std::env::var(PASSWORD_ENV_VAR).ok())
        .filter(|p| !p.is_empty())
        .with_context(|| format!("password required: pass --password or set {PASSWORD_ENV_VAR}"))
}
