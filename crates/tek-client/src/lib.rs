//! # tek-client
//!
//! Typed HTTP client for the Teknofest registration API (`/api`).
//!
//! Endpoints are grouped by router:
//! - [`students`]: team and individual registration, triage of individuals
//! - [`membership`]: membership number verification, also usable as a
//!   [`tek_roster::MembershipLookup`]
//! - [`projects`]: project submission and attachments
//! - [`evaluation`]: scores, leaderboard, featured toggle, statistics
//! - [`admin`]: login, registration, admin weights
//!
//! Admin endpoints send the bearer token from [`tek_auth::token_store`].
//! A 401 answer discards the stored token so the next command asks for a
//! fresh login.

pub mod admin;
pub mod evaluation;
pub mod membership;
pub mod projects;
pub mod students;

mod error;
mod http;

pub use error::ClientError;

use serde::de::DeserializeOwned;
use tek_auth::{AuthError, token_store};
use tek_config::ApiConfig;

use crate::http::{check_response, read_json};

const USER_AGENT: &str = concat!("tkf/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the registration API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    forget_token_on_401: bool,
}

impl ApiClient {
    /// Build an anonymous client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// [`ClientError::Network`] if the underlying `reqwest::Client` fails to
    /// build (TLS backend initialization).
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base().to_string(),
            token: None,
            forget_token_on_401: false,
        })
    }

    /// Build a client that authenticates with the stored admin token, if
    /// any, and forgets it when the API rejects it.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_token_store(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut client = Self::new(config)?;
        client.token = token_store::load();
        client.forget_token_on_401 = true;
        tracing::debug!(authenticated = client.token.is_some(), "api client ready");
        Ok(client)
    }

    /// Use `token` as the bearer token for admin endpoints.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::PUT, path)
    }

    /// Fail fast on admin endpoints when no token is available.
    fn require_token(&self) -> Result<(), ClientError> {
        if self.token.is_none() {
            return Err(AuthError::NotAuthenticated.into());
        }
        Ok(())
    }

    /// Send a request and decode its JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = builder.send().await?;
        match check_response(resp).await {
            Ok(resp) => read_json(resp).await,
            Err(err @ ClientError::Unauthorized(_)) => {
                self.forget_token();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn forget_token(&self) {
        if !self.forget_token_on_401 {
            return;
        }
        tracing::warn!("API rejected the stored token; discarding it");
        if let Err(error) = token_store::delete() {
            tracing::warn!(%error, "failed to discard stored token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn urls_join_without_double_slash() {
        let client = ApiClient::new(&config("http://localhost:8000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.url("/evaluation/top-teams"),
            "http://localhost:8000/api/evaluation/top-teams"
        );
    }

    #[test]
    fn anonymous_client_requires_token_for_admin_calls() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        assert!(!client.has_token());
        let err = client.require_token().unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::NotAuthenticated)));
        assert!(client.with_token("abc").require_token().is_ok());
    }

    #[test]
    fn bearer_header_is_attached() {
        let client = ApiClient::new(&ApiConfig::default())
            .unwrap()
            .with_token("abc.def.ghi");
        let request = client.get("/admin/me").build().unwrap();
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer abc.def.ghi"
        );
    }
}
