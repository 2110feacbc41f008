use anyhow::Result;
use dotenvy::dotenv;
use log::info;

use mealwatch::core::Config;
use mealwatch::database::Database;
use mealwatch::features::get_app_version;
use mealwatch::features::notify::DesktopNotifier;
use mealwatch::features::participation::CanteenClient;
use mealwatch::features::reminder::ReminderScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting mealwatch daemon v{}...", get_app_version());
    info!("Canteen service: {}", config.server_url);
    info!("Reminder schedule: {}", config.reminder_config_path);
    info!("Settings database: {}", config.database_path);

    let database = Database::new(&config.database_path).await?;
    let client = CanteenClient::new(&config)?;

    let scheduler = ReminderScheduler::new(
        database,
        client,
        DesktopNotifier,
        config.reminder_config_path.clone(),
    );

    scheduler.run().await;

    Ok(())
}
