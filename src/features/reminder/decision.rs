//! Reminder decision flow
//!
//! Decides, from the stored frequency preference and the current weekday,
//! whether tonight's participation check should run at all. Meals are
//! registered the evening before, so "before every weekday" means Sunday
//! through Thursday.

use chrono::{NaiveTime, Weekday};

/// How often the user wants to be reminded.
///
/// Persisted in the settings database under
/// [`crate::database::KEY_REMINDER_FREQUENCY`] as the `as_key` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderFrequency {
    /// Remind on Sunday evening only, for Monday's meals
    BeforeMonday,
    /// Remind on every evening that precedes a weekday (Sunday-Thursday)
    BeforeEveryWeekday,
    /// Never remind
    Never,
}

impl ReminderFrequency {
    /// Parse the persisted settings value. Unknown values yield `None`;
    /// the caller treats that as "do not notify" and logs the anomaly.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "before_monday" => Some(ReminderFrequency::BeforeMonday),
            "before_every_weekday" => Some(ReminderFrequency::BeforeEveryWeekday),
            "never" => Some(ReminderFrequency::Never),
            _ => None,
        }
    }

    /// The settings value this variant is persisted as
    pub fn as_key(&self) -> &'static str {
        match self {
            ReminderFrequency::BeforeMonday => "before_monday",
            ReminderFrequency::BeforeEveryWeekday => "before_every_weekday",
            ReminderFrequency::Never => "never",
        }
    }
}

/// Whether the user wants to be reminded for tomorrow, given today's weekday.
pub fn wants_reminder_for_tomorrow(frequency: ReminderFrequency, today: Weekday) -> bool {
    match frequency {
        ReminderFrequency::BeforeMonday => today == Weekday::Sun,
        ReminderFrequency::BeforeEveryWeekday => matches!(
            today,
            Weekday::Sun | Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu
        ),
        ReminderFrequency::Never => false,
    }
}

/// Whether `now` is past the latest reminder time for today.
pub fn is_past_cutoff(now: NaiveTime, cutoff: NaiveTime) -> bool {
    now > cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    #[test]
    fn test_never_frequency_never_fires() {
        for day in ALL_WEEKDAYS {
            assert!(!wants_reminder_for_tomorrow(ReminderFrequency::Never, day));
        }
    }

    #[test]
    fn test_before_monday_fires_on_sunday_only() {
        for day in ALL_WEEKDAYS {
            let expected = day == Weekday::Sun;
            assert_eq!(
                wants_reminder_for_tomorrow(ReminderFrequency::BeforeMonday, day),
                expected,
                "unexpected decision on {day:?}"
            );
        }
    }

    #[test]
    fn test_before_every_weekday_fires_sunday_through_thursday() {
        for day in ALL_WEEKDAYS {
            let expected = !matches!(day, Weekday::Fri | Weekday::Sat);
            assert_eq!(
                wants_reminder_for_tomorrow(ReminderFrequency::BeforeEveryWeekday, day),
                expected,
                "unexpected decision on {day:?}"
            );
        }
    }

    #[test]
    fn test_frequency_key_round_trip() {
        for frequency in [
            ReminderFrequency::BeforeMonday,
            ReminderFrequency::BeforeEveryWeekday,
            ReminderFrequency::Never,
        ] {
            assert_eq!(ReminderFrequency::from_key(frequency.as_key()), Some(frequency));
        }
    }

    #[test]
    fn test_unknown_frequency_key_is_none() {
        assert_eq!(ReminderFrequency::from_key(""), None);
        assert_eq!(ReminderFrequency::from_key("weekly"), None);
        assert_eq!(ReminderFrequency::from_key("BEFORE_MONDAY"), None);
    }

    #[test]
    fn test_cutoff_comparison() {
        let cutoff = NaiveTime::from_hms_opt(17, 30, 0).unwrap();

        assert!(!is_past_cutoff(
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            cutoff
        ));
        // the cutoff minute itself still counts
        assert!(!is_past_cutoff(cutoff, cutoff));
        assert!(is_past_cutoff(
            NaiveTime::from_hms_opt(17, 30, 1).unwrap(),
            cutoff
        ));
    }
}
