//! Confreview: Conference & Reviewer Pool bounded context.
//!
//! Responsible for conference lifecycle (create, edit, delete) and for the
//! pool of reviewers that papers submitted to a conference are drawn from.

pub mod application;
pub mod domain;
