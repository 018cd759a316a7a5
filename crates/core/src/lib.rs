//! HabitsGoals domain logic.
//!
//! Everything in this crate is pure: no database, no network. The API layer
//! calls into these modules for validation and for the derived state
//! (progress, overdue flags, filters, stats) it serves next to each
//! collection.

pub mod catalog;
pub mod confirmation;
pub mod dates;
pub mod error;
pub mod filtering;
pub mod frequency;
pub mod locale;
pub mod progress;
pub mod records;
pub mod stats;
pub mod task;
pub mod types;
pub mod validation;
