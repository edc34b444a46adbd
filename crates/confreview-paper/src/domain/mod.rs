//! Domain layer for the Paper Lifecycle & Review context.

pub mod aggregates;
pub mod aggregation;
pub mod commands;
pub mod document;
pub mod events;
pub mod status;
