use std::{sync::Arc, time::Duration};

use attendance_api::{config::ApiConfig, ApiState};
use attendance_client::{poller::spawn_unread_poller, AttendanceBackend, ClientConfig, HttpBackend};
use attendance_core::{clock::SystemClock, resolver::StatusResolver};
use attendance_store::LocalStore;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    let client_config = ClientConfig::from_env()?;

    let backend: Arc<dyn AttendanceBackend> = Arc::new(HttpBackend::new(&client_config)?);

    let store = match &config.store_path {
        Some(path) => LocalStore::open(path).await?,
        None => LocalStore::in_memory(),
    };

    // Unread notifications are refreshed in the background for the whole process
    let (unread, _poller) = spawn_unread_poller(
        backend.clone(),
        Duration::from_secs(client_config.poll_interval),
    );

    let state = ApiState::new(
        backend,
        StatusResolver::new(config.deadlines),
        Arc::new(SystemClock::new(config.timezone)),
        store,
        client_config.course_id,
    )
    .with_unread_feed(unread);

    // Start the console
    attendance_api::start_server(config, Arc::new(state)).await?;

    Ok(())
}
