//! Route modules organized by bounded context.

pub mod conferences;
pub mod health;
pub mod papers;
pub mod reviews;
