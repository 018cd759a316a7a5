pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod goals;
pub mod habits;
pub mod locale;
pub mod profile;
pub mod reports;
pub mod tasks;
