//! Reviewer pool filtering.
//!
//! A conference's pool is a set of users holding the reviewer role. The
//! requested ids are resolved against the user directory before they reach
//! the aggregate; anything that is not a known reviewer is dropped silently.

use confreview_core::authorization::Role;
use confreview_core::directory::UserIdentity;
use uuid::Uuid;

/// Keeps the identities that hold the reviewer role, first occurrence wins.
///
/// The returned order is the pool order used by paper auto-assignment.
#[must_use]
pub fn eligible_reviewers(candidates: &[UserIdentity]) -> Vec<Uuid> {
    let mut pool: Vec<Uuid> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let eligible = match candidate.role {
            Role::Reviewer => true,
            Role::Author | Role::Organizer => false,
        };
        if eligible && !pool.contains(&candidate.id) {
            pool.push(candidate.id);
        }
    }
    pool
}
