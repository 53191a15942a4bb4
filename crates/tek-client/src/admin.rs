//! `/admin` endpoints: login, registration, and evaluator weights.

use serde::Deserialize;
use tek_core::entities::{Admin, NewAdmin};
use tek_core::responses::{AuthToken, MessageResponse};

use crate::{ApiClient, error::ClientError};

#[derive(Deserialize)]
struct SuperAdminCheck {
    #[serde(default)]
    is_super_admin: Option<bool>,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// The token is returned, not stored; callers decide where it lives.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] for wrong credentials, otherwise
    /// [`ClientError`] on transport failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken, ClientError> {
        tracing::debug!(username, "logging in");
        self.send(
            self.post("/admin/login")
                .form(&[("username", username), ("password", password)]),
        )
        .await
    }

    /// Create an admin account with the registration code.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] for a wrong code or a taken username, otherwise
    /// [`ClientError`].
    pub async fn register_admin(&self, admin: &NewAdmin) -> Result<Admin, ClientError> {
        self.send(self.post("/admin/register").json(admin)).await
    }

    /// The admin the current token belongs to.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`].
    pub async fn current_admin(&self) -> Result<Admin, ClientError> {
        self.require_token()?;
        self.send(self.get("/admin/me")).await
    }

    /// All admin accounts with their weights.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`].
    pub async fn admins(&self) -> Result<Vec<Admin>, ClientError> {
        self.require_token()?;
        self.send(self.get("/admin/admins")).await
    }

    /// Set an admin's evaluation weight. Superadmin only.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] with status 403 for non-superadmins,
    /// [`ClientError::NotFound`] for an unknown admin.
    pub async fn update_admin_weight(
        &self,
        admin_id: i64,
        weight: u8,
    ) -> Result<MessageResponse, ClientError> {
        self.require_token()?;
        self.send(
            self.put(&format!("/admin/admins/{admin_id}/weight"))
                .query(&[("weight", weight)]),
        )
        .await
    }

    /// Whether the current token belongs to the superadmin.
    ///
    /// # Errors
    ///
    /// [`ClientError::Auth`] without a token, otherwise [`ClientError`].
    pub async fn is_super_admin(&self) -> Result<bool, ClientError> {
        self.require_token()?;
        let check: SuperAdminCheck = self.send(self.get("/admin/is-super-admin")).await?;
        Ok(check.is_super_admin.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tek_config::ApiConfig;

    #[test]
    fn login_is_form_encoded() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let request = client
            .post("/admin/login")
            .form(&[("username", "judge1"), ("password", "p@ss word")])
            .build()
            .unwrap();
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(body, b"username=judge1&password=p%40ss+word");
    }

    #[test]
    fn super_admin_check_tolerates_null() {
        let check: SuperAdminCheck = serde_json::from_str(r#"{"is_super_admin": null}"#).unwrap();
        assert_eq!(check.is_super_admin, None);
        let check: SuperAdminCheck = serde_json::from_str(r#"{"is_super_admin": true}"#).unwrap();
        assert_eq!(check.is_super_admin, Some(true));
    }

    #[test]
    fn parse_admin_with_float_weight() {
        let admin: Admin = serde_json::from_str(
            r#"{
                "id": 2,
                "username": "judge2",
                "email": "judge2@example.org",
                "full_name": "Judge Two",
                "evaluation_weight": 25.0,
                "is_active": true,
                "created_at": "2025-02-11T08:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(admin.evaluation_weight, 25);
        assert!(!admin.is_superadmin);
    }

    #[test]
    fn weight_update_uses_query_parameter() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap().with_token("t");
        let request = client
            .put("/admin/admins/4/weight")
            .query(&[("weight", 30_u8)])
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().query(), Some("weight=30"));
    }
}
