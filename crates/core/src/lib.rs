//! # Seance Core
//!
//! Domain types shared by the Seance crates and the recurring-schedule
//! generator that turns a course's recurrence description into dated
//! session occurrences.

pub mod errors;
pub mod models;
pub mod recurrence;
