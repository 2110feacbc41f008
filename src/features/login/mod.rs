//! # Feature: Login
//!
//! Credential capture for the canteen account, plus the reminder frequency
//! preference. Values are stored verbatim; the credentials are only proven
//! right or wrong later, when the daemon's token request uses them.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use dialoguer::{Input, Password, Select};
use log::info;

use crate::database::{Credentials, Database, KEY_REMINDER_FREQUENCY, KEY_USERNAME};
use crate::features::reminder::ReminderFrequency;

/// Frequency choices in menu order
const FREQUENCY_CHOICES: [(ReminderFrequency, &str); 3] = [
    (
        ReminderFrequency::BeforeEveryWeekday,
        "Every evening before a weekday (Sunday-Thursday)",
    ),
    (ReminderFrequency::BeforeMonday, "Sunday evening only"),
    (ReminderFrequency::Never, "Never"),
];

/// Prompt for credentials and persist them.
///
/// The username prompt is pre-filled with the stored value, so changing the
/// password doesn't mean retyping the account name.
pub async fn capture_credentials(database: &Database) -> Result<Credentials> {
    let stored_username = database
        .get_setting(KEY_USERNAME)
        .await?
        .unwrap_or_default();

    let mut username_prompt = Input::<String>::new().with_prompt("Canteen username");
    if !stored_username.is_empty() {
        username_prompt = username_prompt.with_initial_text(stored_username.clone());
    }
    let username = username_prompt.interact_text()?;

    let password = Password::new().with_prompt("Canteen password").interact()?;

    database.set_credentials(&username, &password).await?;
    info!("Stored credentials for {username}");

    Ok(Credentials { username, password })
}

/// Prompt for the reminder frequency and persist the selection.
///
/// The currently stored frequency is pre-selected.
pub async fn choose_reminder_frequency(database: &Database) -> Result<ReminderFrequency> {
    let current = database
        .get_setting(KEY_REMINDER_FREQUENCY)
        .await?
        .and_then(|value| ReminderFrequency::from_key(&value));

    let labels: Vec<&str> = FREQUENCY_CHOICES.iter().map(|(_, label)| *label).collect();
    let default_index = FREQUENCY_CHOICES
        .iter()
        .position(|(frequency, _)| Some(*frequency) == current)
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Remind me")
        .items(&labels)
        .default(default_index)
        .interact()?;

    let frequency = FREQUENCY_CHOICES[index].0;
    database
        .set_setting(KEY_REMINDER_FREQUENCY, frequency.as_key())
        .await?;
    info!("Stored reminder frequency {}", frequency.as_key());

    Ok(frequency)
}
