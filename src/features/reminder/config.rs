//! # Reminder Schedule Configuration
//!
//! YAML-based schedule configuration with validation. Holds the time of day
//! the daily check runs, the latest time a reminder may still go out, and
//! the retry delay for failed checks. The file is re-read at every decision
//! point, so edits take effect without restarting the daemon.

use anyhow::Result;
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Schedule configuration, loaded from `reminder.yaml`
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// Time of day the daily participation check wakes up (HH:MM)
    #[serde(deserialize_with = "time_of_day")]
    pub daily_reminder_time: NaiveTime,

    /// Latest time of day a check or notification may still happen (HH:MM)
    #[serde(deserialize_with = "time_of_day")]
    pub latest_reminder_time: NaiveTime,

    /// Minutes between retries while the service is unreachable
    #[serde(default = "default_retry_delay_minutes")]
    pub retry_delay_minutes: u64,
}

fn default_retry_delay_minutes() -> u64 {
    5
}

impl ReminderConfig {
    /// Load the schedule configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ReminderConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.daily_reminder_time > self.latest_reminder_time {
            return Err(anyhow::anyhow!(
                "daily_reminder_time {} is after latest_reminder_time {}",
                self.daily_reminder_time.format("%H:%M"),
                self.latest_reminder_time.format("%H:%M")
            ));
        }

        if self.retry_delay_minutes == 0 {
            return Err(anyhow::anyhow!("retry_delay_minutes must be at least 1"));
        }

        Ok(())
    }

    /// Retry delay as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_minutes * 60)
    }
}

/// Deserialize an HH:MM time-of-day string
fn time_of_day<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        serde::de::Error::custom(format!("invalid time of day '{value}', expected HH:MM"))
    })
}
