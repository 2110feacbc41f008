//! # Feature: Notification
//!
//! Delivery seam for the reminder notification. The daemon only decides
//! *whether* to notify; the platform command stays behind the [`Notifier`]
//! trait.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use async_trait::async_trait;
use log::{info, warn};
use tokio::process::Command;

/// Sink for the "register your meals" notification
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Raise a local notification. Delivery failures are logged, never
    /// propagated: a lost notification must not abort the reminder cycle.
    async fn notify(&self, summary: &str, body: &str);
}

/// Sends desktop notifications through the `notify-send` command
pub struct DesktopNotifier;

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) {
        let output = match Command::new("notify-send")
            .arg(summary)
            .arg(body)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to run notify-send: {e}");
                return;
            }
        };

        if output.status.success() {
            info!("Sent desktop notification: {summary}");
        } else {
            warn!("notify-send exited with {}", output.status);
        }
    }
}
