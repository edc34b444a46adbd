//! Confreview: Paper Lifecycle & Review bounded context.
//!
//! Responsible for paper submission, reviewer auto-assignment, revisions,
//! and the review decisions that drive a paper's status.

pub mod application;
pub mod domain;
