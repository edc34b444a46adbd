//! Application layer for the Paper Lifecycle & Review context.

pub mod command_handlers;
pub mod query_handlers;
