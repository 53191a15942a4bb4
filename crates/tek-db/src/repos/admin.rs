//! Admin repository: accounts and evaluation weights.

use chrono::Utc;

use tek_core::entities::Admin;
use tek_core::errors::CoreError;
use tek_core::limits::ADMIN_WEIGHT_MAX;
use tek_core::responses::MessageResponse;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_weight, parse_optional_datetime};
use crate::service::TekService;

const SELECT_COLS: &str =
    "id, username, email, full_name, evaluation_weight, is_active, is_superadmin, created_at";

fn row_to_admin(row: &libsql::Row) -> Result<Admin, DatabaseError> {
    Ok(Admin {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        evaluation_weight: get_weight(row, 4)?,
        is_active: get_bool(row, 5)?,
        is_superadmin: get_bool(row, 6)?,
        created_at: parse_optional_datetime(row.get::<Option<String>>(7)?.as_deref())?,
    })
}

fn check_weight(weight: u8) -> Result<(), DatabaseError> {
    if weight > ADMIN_WEIGHT_MAX {
        return Err(CoreError::Validation(format!(
            "weight must be between 0 and {ADMIN_WEIGHT_MAX}, got {weight}"
        ))
        .into());
    }
    Ok(())
}

impl TekService {
    /// Create a local admin account.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for a weight above 100,
    /// [`DatabaseError::InvalidState`] for a taken username or email.
    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        full_name: &str,
        weight: u8,
        is_superadmin: bool,
    ) -> Result<Admin, DatabaseError> {
        check_weight(weight)?;
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::Validation("username must not be empty".into()).into());
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM admins WHERE username = ?1 OR email = ?2",
                libsql::params![username, email],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        if row.get::<i64>(0)? > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "username '{username}' or email '{email}' is already registered"
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO admins (username, email, full_name, evaluation_weight, is_active, is_superadmin, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)",
                libsql::params![
                    username,
                    email,
                    full_name,
                    i64::from(weight),
                    i64::from(is_superadmin),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let id = self.db().conn().last_insert_rowid();
        tracing::info!(admin_id = id, username, is_superadmin, "admin created");
        self.get_admin(id).await
    }

    pub async fn get_admin(&self, id: i64) -> Result<Admin, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM admins WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("admin", id))?;
        row_to_admin(&row)
    }

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Admin, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM admins WHERE username = ?1"),
                [username],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| CoreError::NotFound {
            entity_type: "admin".into(),
            id: username.to_string(),
        })?;
        row_to_admin(&row)
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM admins ORDER BY id"), ())
            .await?;
        let mut admins = Vec::new();
        while let Some(row) = rows.next().await? {
            admins.push(row_to_admin(&row)?);
        }
        Ok(admins)
    }

    /// Set an admin's evaluation weight. Superadmin only.
    ///
    /// Weights are not required to sum to 100.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::PermissionDenied`] unless acting as superadmin,
    /// `CoreError::Validation` above 100, `CoreError::NotFound` for an unknown
    /// admin.
    pub async fn update_admin_weight(
        &self,
        admin_id: i64,
        weight: u8,
    ) -> Result<MessageResponse, DatabaseError> {
        let actor = self.require_superadmin()?;
        check_weight(weight)?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE admins SET evaluation_weight = ?1 WHERE id = ?2",
                libsql::params![i64::from(weight), admin_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("admin", admin_id));
        }
        tracing::info!(admin_id, weight, by = %actor.username, "admin weight updated");
        Ok(MessageResponse {
            message: format!("admin {admin_id} weight set to {weight}%"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{service_as_admin, test_service};

    #[tokio::test]
    async fn create_admin_roundtrip() {
        let svc = test_service().await;
        let admin = svc
            .create_admin("judge2", "judge2@example.org", "Judge Two", 25, false)
            .await
            .unwrap();
        assert_eq!(admin.evaluation_weight, 25);
        assert!(admin.is_active);
        assert!(!admin.is_superadmin);
        assert!(admin.created_at.is_some());

        let found = svc.find_admin_by_username("judge2").await.unwrap();
        assert_eq!(found, admin);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let svc = test_service().await;
        svc.create_admin("judge2", "a@example.org", "Judge", 10, false)
            .await
            .unwrap();
        let err = svc
            .create_admin("judge2", "b@example.org", "Judge", 10, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[tokio::test]
    async fn weight_above_100_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_admin("judge2", "a@example.org", "Judge", 101, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn superadmin_updates_weights() {
        let svc = service_as_admin(true).await;
        let other = svc
            .create_admin("judge2", "judge2@example.org", "Judge Two", 10, false)
            .await
            .unwrap();
        svc.update_admin_weight(other.id, 75).await.unwrap();
        assert_eq!(svc.get_admin(other.id).await.unwrap().evaluation_weight, 75);

        let err = svc.update_admin_weight(999, 10).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn regular_admin_cannot_update_weights() {
        let svc = service_as_admin(false).await;
        let err = svc.update_admin_weight(1, 50).await.unwrap_err();
        assert!(matches!(err, DatabaseError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn anonymous_caller_cannot_update_weights() {
        let svc = test_service().await;
        let err = svc.update_admin_weight(1, 50).await.unwrap_err();
        assert!(matches!(err, DatabaseError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let mut svc = test_service().await;
        let err = svc.act_as("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.identity().is_none());
    }
}
