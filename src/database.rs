//! # Settings Database
//!
//! SQLite-backed key-value store for the user's persisted settings: the
//! canteen credentials written by the login tool and the reminder frequency
//! preference read by the daemon. Access is serialized through an async
//! mutex; the handle is cheap to clone.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{Context, Result};
use sqlite::{Connection, State};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Settings key for the canteen account name
pub const KEY_USERNAME: &str = "username";
/// Settings key for the canteen account password
pub const KEY_PASSWORD: &str = "password";
/// Settings key for the reminder frequency preference
pub const KEY_REMINDER_FREQUENCY: &str = "reminder_frequency";

/// Stored canteen account credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Handle to the settings store
#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (and if necessary create) the settings database at `path`.
    ///
    /// `":memory:"` is accepted for tests.
    pub async fn new(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)
            .with_context(|| format!("failed to open settings database at {path}"))?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Read a single setting. An absent key yields `None`, not an error.
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let connection = self.connection.lock().await;

        let mut statement = connection.prepare("SELECT value FROM settings WHERE key = ?")?;
        statement.bind((1, key))?;

        if let State::Row = statement.next()? {
            Ok(Some(statement.read::<String, _>("value")?))
        } else {
            Ok(None)
        }
    }

    /// Write a single setting, replacing any previous value.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let connection = self.connection.lock().await;

        let mut statement = connection.prepare(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )?;
        statement.bind((1, key))?;
        statement.bind((2, value))?;
        statement.next()?;

        Ok(())
    }

    /// Read the stored credentials. `None` until both halves were stored.
    pub async fn get_credentials(&self) -> Result<Option<Credentials>> {
        let username = self.get_setting(KEY_USERNAME).await?;
        let password = self.get_setting(KEY_PASSWORD).await?;

        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(Credentials { username, password })),
            _ => Ok(None),
        }
    }

    /// Store both credential halves verbatim.
    pub async fn set_credentials(&self, username: &str, password: &str) -> Result<()> {
        self.set_setting(KEY_USERNAME, username).await?;
        self.set_setting(KEY_PASSWORD, password).await?;
        Ok(())
    }
}
