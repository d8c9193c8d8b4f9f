use dotenvy::dotenv;
use fintrack::{
    api::{self, AppState},
    config::{self, relay::RelayConfig},
    errors::Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!(bind_addr = %app_config.bind_addr, "configuration loaded");

    // 4. Initialize the database and create missing tables
    let db = config::database::create_connection(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("database initialized");

    // 5. Messaging provider credentials are optional; the relay endpoint
    //    reports a configuration error until they are set
    let relay = match RelayConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("whatsapp relay disabled: {e}");
            None
        }
    };

    // 6. Serve
    let state = AppState {
        db,
        http: reqwest::Client::new(),
        relay,
    };
    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    info!(addr = %app_config.bind_addr, "listening");
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
