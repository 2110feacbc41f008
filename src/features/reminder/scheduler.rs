//! # Feature: Reminder Scheduler
//!
//! Daily loop of the daemon: wake at the configured reminder time, decide
//! whether tonight calls for a check, ask the canteen service and raise a
//! notification if the user has not registered for tomorrow. While the
//! service cannot be asked, the whole cycle is retried every few minutes
//! until the cutoff passes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeDelta};
use log::{debug, error, info, warn};
use std::time::Duration;

use crate::database::{Database, KEY_REMINDER_FREQUENCY};
use crate::features::notify::Notifier;
use crate::features::participation::{CanteenClient, ParticipationStatus};
use crate::features::reminder::config::ReminderConfig;
use crate::features::reminder::decision::{self, ReminderFrequency};

/// Notification headline
const NOTIFICATION_SUMMARY: &str = "Meal registration";
/// Notification text
const NOTIFICATION_BODY: &str =
    "You are not registered for any meal tomorrow. Register before the list closes.";

/// How long to wait before re-reading an unreadable schedule config
const CONFIG_REREAD_DELAY: Duration = Duration::from_secs(300);

/// What to do after one pass of the reminder cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleOutcome {
    /// Done for today; sleep until the next daily reminder time
    Done,
    /// The service could not be asked; run the cycle again after the delay
    RetryAfter(Duration),
}

/// Drives the daily reminder cycle
pub struct ReminderScheduler<N: Notifier> {
    database: Database,
    client: CanteenClient,
    notifier: N,
    config_path: String,
}

impl<N: Notifier> ReminderScheduler<N> {
    pub fn new(database: Database, client: CanteenClient, notifier: N, config_path: String) -> Self {
        Self {
            database,
            client,
            notifier,
            config_path,
        }
    }

    /// Run forever: sleep until the next daily reminder time, run the cycle
    /// (including its retries), sleep again.
    pub async fn run(&self) {
        loop {
            let daily_time = match ReminderConfig::load(&self.config_path) {
                Ok(config) => config.daily_reminder_time,
                Err(e) => {
                    error!(
                        "Couldn't read reminder config from {}: {e:#}",
                        self.config_path
                    );
                    tokio::time::sleep(CONFIG_REREAD_DELAY).await;
                    continue;
                }
            };

            let now = Local::now();
            let next = next_occurrence(now, daily_time);
            info!(
                "Next participation check at {}",
                next.format("%Y-%m-%d %H:%M")
            );

            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;

            self.run_cycle().await;
        }
    }

    /// One reminder cycle: check once, retrying while the service is
    /// unreachable and the cutoff has not passed.
    pub async fn run_cycle(&self) {
        loop {
            match self.check_once().await {
                CycleOutcome::Done => break,
                CycleOutcome::RetryAfter(delay) => {
                    info!(
                        "Retrying participation check in {} minutes",
                        delay.as_secs() / 60
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// One pass: preconditions, remote check, notification decision.
    async fn check_once(&self) -> CycleOutcome {
        let now = Local::now();

        /* if past the latest reminder time: ignore */

        let config = match ReminderConfig::load(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("Couldn't read reminder config: {e:#}. Giving up for today.");
                return CycleOutcome::Done;
            }
        };

        if decision::is_past_cutoff(now.time(), config.latest_reminder_time) {
            debug!(
                "Cycle started past the cutoff ({}), nothing to do",
                config.latest_reminder_time.format("%H:%M")
            );
            return CycleOutcome::Done;
        }

        /* does the user want a reminder tonight? */

        let frequency = match self.database.get_setting(KEY_REMINDER_FREQUENCY).await {
            Ok(Some(value)) => match ReminderFrequency::from_key(&value) {
                Some(frequency) => frequency,
                None => {
                    error!("Unrecognized reminder frequency '{value}' in settings. Not notifying.");
                    return CycleOutcome::Done;
                }
            },
            Ok(None) => {
                error!("No reminder frequency stored in settings. Not notifying.");
                return CycleOutcome::Done;
            }
            Err(e) => {
                error!("Couldn't read reminder frequency from settings: {e:#}. Not notifying.");
                return CycleOutcome::Done;
            }
        };

        if !decision::wants_reminder_for_tomorrow(frequency, now.weekday()) {
            debug!(
                "No reminder wanted today ({:?}, frequency {})",
                now.weekday(),
                frequency.as_key()
            );
            return CycleOutcome::Done;
        }

        /* ask the server and decide */

        let credentials = match self.database.get_credentials().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                error!("No stored credentials; run mealwatch-login first. Not notifying.");
                return CycleOutcome::Done;
            }
            Err(e) => {
                error!("Couldn't read credentials from settings: {e:#}. Not notifying.");
                return CycleOutcome::Done;
            }
        };

        match self.client.participates_tomorrow(&credentials).await {
            ParticipationStatus::Participating => {
                info!("Already registered for tomorrow, no reminder needed");
                CycleOutcome::Done
            }
            ParticipationStatus::NotParticipating => {
                info!("Not registered for tomorrow, raising notification");
                self.notifier
                    .notify(NOTIFICATION_SUMMARY, NOTIFICATION_BODY)
                    .await;
                CycleOutcome::Done
            }
            ParticipationStatus::Unknown => {
                warn!("Couldn't determine participation. Retry if the cutoff hasn't passed, yet.");
                // re-read the config so a cutoff edit takes effect mid-window
                match ReminderConfig::load(&self.config_path) {
                    Ok(config) => retry_decision(Local::now().time(), &config),
                    Err(e) => {
                        error!("Couldn't read reminder config: {e:#}. No retry scheduled.");
                        CycleOutcome::Done
                    }
                }
            }
        }
    }
}

/// Whether an unknown result earns another pass before the cutoff.
fn retry_decision(now: NaiveTime, config: &ReminderConfig) -> CycleOutcome {
    if now < config.latest_reminder_time {
        CycleOutcome::RetryAfter(config.retry_delay())
    } else {
        CycleOutcome::Done
    }
}

/// Next local occurrence of `time`: today if still ahead, otherwise tomorrow.
fn next_occurrence(now: DateTime<Local>, time: NaiveTime) -> DateTime<Local> {
    let date = if now.time() >= time {
        now.date_naive()
            .succ_opt()
            .unwrap_or_else(|| now.date_naive())
    } else {
        now.date_naive()
    };

    match date.and_time(time).and_local_timezone(Local).earliest() {
        Some(next) => next,
        // nonexistent local time (DST gap)
        None => now + TimeDelta::hours(24),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(latest: (u32, u32), retry_minutes: u64) -> ReminderConfig {
        let yaml = format!(
            "daily_reminder_time: \"06:00\"\nlatest_reminder_time: \"{:02}:{:02}\"\nretry_delay_minutes: {}\n",
            latest.0, latest.1, retry_minutes
        );
        serde_yaml::from_str(&yaml).unwrap()
    }

    #[test]
    fn test_retry_before_cutoff() {
        let config = config((17, 30), 5);
        let now = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        assert_eq!(
            retry_decision(now, &config),
            CycleOutcome::RetryAfter(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_no_retry_past_cutoff() {
        let config = config((17, 30), 5);
        let now = NaiveTime::from_hms_opt(17, 45, 0).unwrap();

        assert_eq!(retry_decision(now, &config), CycleOutcome::Done);
    }

    #[test]
    fn test_no_retry_at_the_cutoff_itself() {
        let config = config((17, 30), 5);
        let now = NaiveTime::from_hms_opt(17, 30, 0).unwrap();

        assert_eq!(retry_decision(now, &config), CycleOutcome::Done);
    }

    #[test]
    fn test_retry_delay_follows_config() {
        let config = config((17, 30), 12);
        let now = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        assert_eq!(
            retry_decision(now, &config),
            CycleOutcome::RetryAfter(Duration::from_secs(12 * 60))
        );
    }

    #[test]
    fn test_next_occurrence_later_today() {
        let now = Local.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let time = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        let next = next_occurrence(now, time);
        assert_eq!(next.date_naive(), now.date_naive());
        assert_eq!(next.time(), time);
    }

    #[test]
    fn test_next_occurrence_rolls_to_tomorrow() {
        let now = Local.with_ymd_and_hms(2026, 8, 7, 16, 30, 0).unwrap();
        let time = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        let next = next_occurrence(now, time);
        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!(next.time(), time);
    }

    #[test]
    fn test_next_occurrence_at_the_exact_minute_rolls_over() {
        let now = Local.with_ymd_and_hms(2026, 8, 7, 16, 0, 0).unwrap();
        let time = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        let next = next_occurrence(now, time);
        assert_eq!(next.date_naive(), now.date_naive().succ_opt().unwrap());
    }
}
