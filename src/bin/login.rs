//! Interactive setup for the mealwatch daemon
//!
//! Collects the canteen credentials and the reminder frequency preference
//! and stores them in the settings database the daemon reads from.
//!
//! Usage: mealwatch-login

use anyhow::Result;
use dotenvy::dotenv;

use mealwatch::core::Config;
use mealwatch::database::Database;
use mealwatch::features::login::{capture_credentials, choose_reminder_frequency};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let database = Database::new(&config.database_path).await?;

    let credentials = capture_credentials(&database).await?;
    let frequency = choose_reminder_frequency(&database).await?;

    println!();
    println!("Stored credentials for {}.", credentials.username);
    println!("Reminder frequency: {}.", frequency.as_key());
    println!("The daemon picks both up at its next check.");

    Ok(())
}
