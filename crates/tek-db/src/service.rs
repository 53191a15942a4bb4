//! Service layer: the database handle plus the acting admin.
//!
//! All repo methods are implemented as `impl TekService` blocks. Mutations
//! that touch more than one row run inside a single transaction.

use tek_core::identity::AdminIdentity;
use tek_core::limits::DEFAULT_ADMIN_WEIGHT;

use crate::TekDb;
use crate::error::DatabaseError;

/// Orchestrates store operations on behalf of an optional admin.
///
/// Registration and listing work anonymously. Evaluation, triage, and
/// weight changes need an identity; weight changes need a superadmin.
pub struct TekService {
    db: TekDb,
    identity: Option<AdminIdentity>,
    default_weight: u8,
}

impl TekService {
    /// Open a local store at `db_path` (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TekDb::open_local(db_path).await?;
        Ok(Self::from_db(db, None))
    }

    /// Create from an existing `TekDb` (for testing).
    #[must_use]
    pub const fn from_db(db: TekDb, identity: Option<AdminIdentity>) -> Self {
        Self {
            db,
            identity,
            default_weight: DEFAULT_ADMIN_WEIGHT,
        }
    }

    /// Weight applied to evaluations whose admin no longer exists.
    #[must_use]
    pub const fn with_default_weight(mut self, weight: u8) -> Self {
        self.default_weight = weight;
        self
    }

    /// Act as `username` for subsequent admin operations.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` (as [`DatabaseError::Core`]) if no such admin
    /// exists.
    pub async fn act_as(&mut self, username: &str) -> Result<&AdminIdentity, DatabaseError> {
        let admin = self.find_admin_by_username(username).await?;
        tracing::debug!(admin_id = admin.id, username, "acting as admin");
        Ok(&*self.identity.insert(AdminIdentity {
            admin_id: admin.id,
            username: admin.username,
            is_superadmin: admin.is_superadmin,
        }))
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TekDb {
        &self.db
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AdminIdentity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn default_weight(&self) -> u8 {
        self.default_weight
    }

    /// The acting admin, or [`DatabaseError::PermissionDenied`].
    pub(crate) fn require_admin(&self) -> Result<&AdminIdentity, DatabaseError> {
        self.identity
            .as_ref()
            .ok_or_else(|| DatabaseError::PermissionDenied("no acting admin".into()))
    }

    /// The acting admin if superadmin, or [`DatabaseError::PermissionDenied`].
    pub(crate) fn require_superadmin(&self) -> Result<&AdminIdentity, DatabaseError> {
        let admin = self.require_admin()?;
        if admin.is_superadmin {
            Ok(admin)
        } else {
            Err(DatabaseError::PermissionDenied(format!(
                "only the superadmin can do this; '{}' is not",
                admin.username
            )))
        }
    }
}
