//! # tek-auth
//!
//! Admin session handling for the Teknofest toolkit.
//!
//! The backend issues an HS256 bearer token on `POST /admin/login`. This
//! crate stores it (OS keyring first, then a `0600` credentials file),
//! loads it back with an environment override, and decodes its claims for
//! status display. Signature verification stays with the backend.

pub mod claims;
pub mod error;
pub mod token_store;

pub use claims::AdminClaims;
pub use error::AuthError;
