//! Canteen service client
//!
//! Two sequential requests decide everything: a password-grant token
//! exchange, then the active week's schedule. The schedule is scanned for
//! any registered meal in tomorrow's slot.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

use crate::core::Config;
use crate::database::Credentials;

/// Outcome of a participation check.
///
/// `Unknown` means the server could not be asked or answered with an
/// unexpected document. It is never the same as `NotParticipating`:
/// `Unknown` leads to a retry, `NotParticipating` to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationStatus {
    Participating,
    NotParticipating,
    Unknown,
}

/// Token endpoint answer; only the bearer token is used
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Answer of `GET /rest/v1/week/active`
#[derive(Debug, Deserialize)]
pub struct WeekResponse {
    #[serde(rename = "currentWeek")]
    pub current_week: Week,
}

#[derive(Debug, Deserialize)]
pub struct Week {
    /// Weekday slots, Monday = 0
    pub days: Vec<Day>,
}

#[derive(Debug, Deserialize)]
pub struct Day {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Deserialize)]
pub struct Meal {
    #[serde(rename = "isParticipate")]
    pub is_participate: bool,
}

/// HTTP client for the canteen service
pub struct CanteenClient {
    http: reqwest::Client,
    server_url: String,
    client_id: String,
    client_secret: String,
}

impl CanteenClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            server_url: config.server_url.clone(),
            client_id: config.oauth_client_id.clone(),
            client_secret: config.oauth_client_secret.clone(),
        })
    }

    /// Whether the user is registered for any meal tomorrow.
    ///
    /// Transport and parse failures at either step are absorbed into
    /// `Unknown`; the caller decides whether that earns a retry.
    pub async fn participates_tomorrow(&self, credentials: &Credentials) -> ParticipationStatus {
        match self.check_tomorrow(credentials).await {
            Ok(true) => ParticipationStatus::Participating,
            Ok(false) => ParticipationStatus::NotParticipating,
            Err(e) => {
                warn!("Participation check failed: {e:#}");
                ParticipationStatus::Unknown
            }
        }
    }

    async fn check_tomorrow(&self, credentials: &Credentials) -> Result<bool> {
        let token = self.request_token(credentials).await?;
        let week = self.fetch_active_week(&token).await?;

        let tomorrow = Local::now()
            .date_naive()
            .succ_opt()
            .ok_or_else(|| anyhow!("calendar overflow computing tomorrow"))?;
        let day_index = tomorrow.weekday().num_days_from_monday() as usize;

        participation_on_day(&week, day_index)
    }

    /// POST credentials and client identifiers to the OAuth token endpoint.
    async fn request_token(&self, credentials: &Credentials) -> Result<String> {
        let params = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}/oauth/v2/token", self.server_url))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("token endpoint returned HTTP {status}"));
        }

        let token: TokenResponse = response.json().await?;
        debug!("Obtained access token for {}", credentials.username);
        Ok(token.access_token)
    }

    /// GET the active week's schedule with the bearer token.
    async fn fetch_active_week(&self, token: &str) -> Result<WeekResponse> {
        let response = self
            .http
            .get(format!("{}/rest/v1/week/active", self.server_url))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("week endpoint returned HTTP {status}"));
        }

        Ok(response.json().await?)
    }
}

/// Scan one weekday slot of the schedule for any registered meal.
///
/// Slots 4 and 5 (Friday and Saturday) have no meal service and count as
/// not participating without a scan. A slot the schedule doesn't carry is
/// a structure mismatch, not a "no".
pub fn participation_on_day(week: &WeekResponse, day_index: usize) -> Result<bool> {
    if day_index == 4 || day_index == 5 {
        return Ok(false);
    }

    let day = week
        .current_week
        .days
        .get(day_index)
        .ok_or_else(|| anyhow!("week schedule has no day at index {day_index}"))?;

    Ok(day.meals.iter().any(|meal| meal.is_participate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_with_meals(meals: &[bool]) -> WeekResponse {
        let meals_json: Vec<String> = meals
            .iter()
            .map(|participate| format!(r#"{{"isParticipate": {participate}}}"#))
            .collect();
        let json = format!(
            r#"{{"currentWeek": {{"days": [{{"meals": [{}]}}]}}}}"#,
            meals_json.join(", ")
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_participating_when_any_meal_is_registered() {
        let week = week_with_meals(&[false, true, false]);
        assert!(participation_on_day(&week, 0).unwrap());
    }

    #[test]
    fn test_not_participating_when_no_meal_is_registered() {
        let week = week_with_meals(&[false, false]);
        assert!(!participation_on_day(&week, 0).unwrap());
    }

    #[test]
    fn test_not_participating_for_empty_meal_list() {
        let week = week_with_meals(&[]);
        assert!(!participation_on_day(&week, 0).unwrap());
    }

    #[test]
    fn test_friday_and_saturday_skip_the_scan() {
        // no days at all, yet Friday/Saturday still resolve to "no"
        let week: WeekResponse =
            serde_json::from_str(r#"{"currentWeek": {"days": []}}"#).unwrap();
        assert!(!participation_on_day(&week, 4).unwrap());
        assert!(!participation_on_day(&week, 5).unwrap());
    }

    #[test]
    fn test_missing_day_slot_is_an_error() {
        let week = week_with_meals(&[true]);
        assert!(participation_on_day(&week, 3).is_err());
    }

    #[test]
    fn test_week_document_parsing() {
        let json = r#"{
            "currentWeek": {
                "days": [
                    {"meals": [{"isParticipate": false}, {"isParticipate": true}]},
                    {"meals": []}
                ]
            }
        }"#;
        let week: WeekResponse = serde_json::from_str(json).unwrap();
        assert_eq!(week.current_week.days.len(), 2);
        assert!(week.current_week.days[0].meals[1].is_participate);
    }

    #[test]
    fn test_week_document_missing_fields_fail() {
        assert!(serde_json::from_str::<WeekResponse>(r#"{"days": []}"#).is_err());
        assert!(
            serde_json::from_str::<WeekResponse>(r#"{"currentWeek": {"days": [{}]}}"#).is_err()
        );
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{"access_token": "abc123", "token_type": "bearer", "expires_in": 3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc123");

        assert!(serde_json::from_str::<TokenResponse>(r#"{"token_type": "bearer"}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_yields_unknown() {
        let config = Config {
            server_url: "http://127.0.0.1:9".to_string(),
            oauth_client_id: "client".to_string(),
            oauth_client_secret: "secret".to_string(),
            database_path: ":memory:".to_string(),
            reminder_config_path: "reminder.yaml".to_string(),
            http_timeout_secs: 2,
            log_level: "info".to_string(),
        };
        let client = CanteenClient::new(&config).unwrap();
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        };

        assert_eq!(
            client.participates_tomorrow(&credentials).await,
            ParticipationStatus::Unknown
        );
    }
}
