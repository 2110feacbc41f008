//! # Feature: Participation Check
//!
//! Asks the canteen service whether the user is registered for tomorrow's
//! meals: a password-grant token exchange followed by a fetch of the active
//! week's schedule.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod client;

pub use client::{participation_on_day, CanteenClient, ParticipationStatus, WeekResponse};
