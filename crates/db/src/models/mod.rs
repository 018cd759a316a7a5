//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates

pub mod goal;
pub mod habit;
pub mod habit_log;
pub mod profile;
pub mod session;
pub mod task;
pub mod user;
