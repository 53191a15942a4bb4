use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `tkf admin login`")]
    NotAuthenticated,

    #[error("session expired — run `tkf admin login` again")]
    TokenExpired,

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),
}
