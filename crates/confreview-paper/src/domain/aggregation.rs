//! The review aggregation rule.
//!
//! A paper's status is derived from the statuses of its reviews in exactly
//! one place: [`aggregate`].

use super::status::{PaperStatus, ReviewStatus};

/// Maps a paper's review statuses to the paper status.
///
/// Unanimous acceptance wins first; otherwise a single revision request
/// dominates any mix of pending and accepted reviews; any remaining mix
/// leaves the paper under review. With no reviews at all the current status
/// is returned unchanged.
#[must_use]
pub fn aggregate(current: PaperStatus, reviews: &[ReviewStatus]) -> PaperStatus {
    if reviews.is_empty() {
        return current;
    }
    if reviews.iter().all(|s| *s == ReviewStatus::Accepted) {
        PaperStatus::Accepted
    } else if reviews.contains(&ReviewStatus::RevisionRequested) {
        PaperStatus::RevisionRequested
    } else {
        PaperStatus::UnderReview
    }
}
