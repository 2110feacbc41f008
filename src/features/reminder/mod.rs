//! # Feature: Reminders
//!
//! The daily "did you register your meals?" flow: schedule configuration,
//! the decision table and the scheduler loop that drives everything.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true

pub mod config;
pub mod decision;
pub mod scheduler;

pub use config::ReminderConfig;
pub use decision::ReminderFrequency;
pub use scheduler::ReminderScheduler;
