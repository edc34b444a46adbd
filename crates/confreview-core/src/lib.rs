//! Confreview Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the conference
//! and paper bounded contexts depend on. It contains no infrastructure code.

pub mod aggregate;
pub mod authorization;
pub mod clock;
pub mod command;
pub mod directory;
pub mod error;
pub mod event;
pub mod repository;
