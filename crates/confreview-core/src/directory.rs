//! User directory abstraction.
//!
//! User accounts are owned by the external identity service. The domain only
//! reads identities and their roles, for example to filter a reviewer pool.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::authorization::Role;
use crate::error::DomainError;

/// A read-only view of a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The user's role.
    pub role: Role,
}

/// Read access to user identities.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the identities for the given ids that exist. Unknown ids are
    /// omitted; the result follows the order of `ids`.
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<UserIdentity>, DomainError>;

    /// Returns every user holding `role`, ordered by name.
    async fn list_users_with_role(&self, role: Role) -> Result<Vec<UserIdentity>, DomainError>;
}
