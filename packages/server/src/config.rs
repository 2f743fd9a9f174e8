use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub registry_url: String,
    pub registry_client_id: String,
    pub registry_password: String,
    pub email_api_url: String,
    pub email_api_key: Option<String>,
    pub email_from: String,
    pub email_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            registry_url: env::var("REGISTRY_URL").context("REGISTRY_URL must be set")?,
            registry_client_id: env::var("REGISTRY_CLIENT_ID")
                .context("REGISTRY_CLIENT_ID must be set")?,
            registry_password: env::var("REGISTRY_PASSWORD")
                .context("REGISTRY_PASSWORD must be set")?,
            email_api_url: env::var("EMAIL_API_URL").context("EMAIL_API_URL must be set")?,
            email_api_key: env::var("EMAIL_API_KEY").ok(),
            email_from: env::var("EMAIL_FROM").unwrap_or_else(|_| "help@get.gov".to_string()),
            email_timeout_secs: env::var("EMAIL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("EMAIL_TIMEOUT_SECS must be a valid number")?,
        })
    }
}
