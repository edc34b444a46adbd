//! Application layer for the Conference & Reviewer Pool context.

pub mod command_handlers;
pub mod query_handlers;
