//! Domain layer for the Conference & Reviewer Pool context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod reviewer_pool;
