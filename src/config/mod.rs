//! Configuration management for database and application settings.

/// Database connection and table creation
pub mod database;

/// Default transaction categories seeded for new profiles from config.toml
pub mod defaults;

/// Messaging provider credentials from environment variables
pub mod relay;

use crate::errors::Result;

/// Top-level application settings, resolved from environment variables
/// with local-development fallbacks.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SQLite database URL
    pub database_url: String,
}

/// Loads the application configuration from the environment.
///
/// `BIND_ADDR` and `DATABASE_URL` are both optional; defaults target a
/// local development setup.
pub fn load_app_configuration() -> Result<AppConfig> {
    Ok(AppConfig {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
        database_url: database::get_database_url(),
    })
}
