// Core layer - shared configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure - persisted user settings
pub mod database;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    // Login
    login::{capture_credentials, choose_reminder_frequency},
    // Notifications
    notify::{DesktopNotifier, Notifier},
    // Participation
    participation::{CanteenClient, ParticipationStatus},
    // Reminders
    reminder::{ReminderConfig, ReminderFrequency, ReminderScheduler},
};

// Re-export the settings store
pub use database::{Credentials, Database};
