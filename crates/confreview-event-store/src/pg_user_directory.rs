//! `PostgreSQL` implementation of the `UserDirectory` trait.
//!
//! Reads the `users` table, a projection of the external identity service.
//! Nothing in this workspace writes to it.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use confreview_core::authorization::Role;
use confreview_core::directory::{UserDirectory, UserIdentity};
use confreview_core::error::DomainError;

/// PostgreSQL-backed user directory.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Creates a new `PgUserDirectory`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
}

impl TryFrom<UserRow> for UserIdentity {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| {
            DomainError::Infrastructure(format!("user {} has unknown role {}", row.id, row.role))
        })?;
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
        })
    }
}

fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("user directory error: {e}"))
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<UserIdentity>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, name, email, role FROM users WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| infrastructure(&e))?;

        let found = rows
            .into_iter()
            .map(UserIdentity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|u| u.id == *id).cloned())
            .collect())
    }

    async fn list_users_with_role(&self, role: Role) -> Result<Vec<UserIdentity>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, name, email, role FROM users WHERE role = $1 ORDER BY name, id",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        rows.into_iter().map(UserIdentity::try_from).collect()
    }
}
