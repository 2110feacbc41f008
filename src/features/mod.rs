//! # Features
//!
//! Feature modules of the mealwatch daemon.

pub mod login;
pub mod notify;
pub mod participation;
pub mod reminder;

/// Crate version, as reported in startup logs
pub fn get_app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
