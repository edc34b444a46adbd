//! Authorization context.
//!
//! Every command carries the [`Actor`] that issued it. Roles form a closed
//! set; capability checks match on [`Role`] exhaustively instead of comparing
//! role names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// The capability a user holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits papers and uploads revisions.
    Author,
    /// Records decisions on assigned reviews.
    Reviewer,
    /// Creates conferences and manages their reviewer pools.
    Organizer,
}

impl Role {
    /// Returns the canonical lowercase name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Reviewer => "reviewer",
            Self::Organizer => "organizer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(Self::Author),
            "reviewer" => Ok(Self::Reviewer),
            "organizer" => Ok(Self::Organizer),
            other => Err(DomainError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's identifier.
    pub user_id: Uuid,
    /// The acting user's role.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Ensures the actor holds `required`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the actor's role differs.
    pub fn require_role(&self, required: Role) -> Result<(), DomainError> {
        if self.role == required {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(format!(
                "{} role required, actor {} is {}",
                required, self.user_id, self.role
            )))
        }
    }

    /// Ensures the actor is the user identified by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the ids differ.
    pub fn require_user(&self, owner_id: Uuid, what: &str) -> Result<(), DomainError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(format!(
                "actor {} is not the {what}",
                self.user_id
            )))
        }
    }
}
