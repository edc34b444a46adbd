//! Paper and review status values.

use std::fmt;

use confreview_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Overall status of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaperStatus {
    /// Created, no reviewer assigned yet.
    Submitted,
    /// Reviewers assigned, decisions outstanding.
    UnderReview,
    /// At least one reviewer asked for a revision.
    RevisionRequested,
    /// Every reviewer accepted.
    Accepted,
    /// Reserved; no transition produces it.
    Rejected,
}

impl fmt::Display for PaperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submitted => "SUBMITTED",
            Self::UnderReview => "UNDER_REVIEW",
            Self::RevisionRequested => "REVISION_REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// Status of one reviewer's review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// No decision recorded since assignment or the last revision.
    Pending,
    /// The reviewer accepts the paper.
    Accepted,
    /// The reviewer asks the author for a revision.
    RevisionRequested,
}

/// A decision a reviewer may record. `Pending` is not a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the paper.
    Accept,
    /// Request a revision.
    RequestRevision,
}

impl From<ReviewDecision> for ReviewStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Accept => Self::Accepted,
            ReviewDecision::RequestRevision => Self::RevisionRequested,
        }
    }
}

impl TryFrom<ReviewStatus> for ReviewDecision {
    type Error = DomainError;

    fn try_from(status: ReviewStatus) -> Result<Self, Self::Error> {
        match status {
            ReviewStatus::Accepted => Ok(Self::Accept),
            ReviewStatus::RevisionRequested => Ok(Self::RequestRevision),
            ReviewStatus::Pending => Err(DomainError::Validation(
                "decision must be ACCEPTED or REVISION_REQUESTED".to_owned(),
            )),
        }
    }
}
