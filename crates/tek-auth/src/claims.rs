use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims carried by the admin bearer token.
///
/// Decoded without signature verification; good for display and expiry
/// checks only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminClaims {
    /// `sub` claim.
    pub username: String,
    pub admin_id: Option<i64>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawClaims {
    sub: Option<String>,
    admin_id: Option<i64>,
    exp: Option<i64>,
}

impl AdminClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// # Errors
    ///
    /// [`AuthError::MalformedToken`] if the token is not a three-part JWT,
    /// the payload is not base64url JSON, or `sub`/`exp` are missing.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = jwt.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::MalformedToken("invalid JWT format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))?;
        let raw: RawClaims = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;
        let username = raw
            .sub
            .ok_or_else(|| AuthError::MalformedToken("missing sub claim".into()))?;
        let exp = raw
            .exp
            .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::MalformedToken("invalid exp timestamp".into()))?;
        Ok(Self {
            username,
            admin_id: raw.admin_id,
            expires_at,
        })
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}
