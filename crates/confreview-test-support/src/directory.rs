//! Test user directory: a fixed in-memory `UserDirectory`.

use async_trait::async_trait;
use confreview_core::authorization::Role;
use confreview_core::directory::{UserDirectory, UserIdentity};
use confreview_core::error::DomainError;
use uuid::Uuid;

/// A user directory backed by a fixed list of identities.
#[derive(Debug, Default, Clone)]
pub struct StaticUserDirectory {
    users: Vec<UserIdentity>,
}

impl StaticUserDirectory {
    /// Create a directory containing `users`.
    #[must_use]
    pub fn new(users: Vec<UserIdentity>) -> Self {
        Self { users }
    }

    /// Builds an identity with a generated name and email for `role`.
    #[must_use]
    pub fn user(id: Uuid, role: Role) -> UserIdentity {
        UserIdentity {
            id,
            name: format!("{role}-{id}"),
            email: format!("{id}@example.org"),
            role,
        }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<UserIdentity>, DomainError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.iter().find(|u| u.id == *id).cloned())
            .collect())
    }

    async fn list_users_with_role(&self, role: Role) -> Result<Vec<UserIdentity>, DomainError> {
        let mut users: Vec<UserIdentity> = self
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}
