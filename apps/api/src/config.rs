use anyhow::{Context, Result};

/// `PROFILE_STORE_PATH` value that keeps profiles in process memory only.
pub const MEMORY_STORE_PATH: &str = ":memory:";

/// Application configuration loaded from environment variables.
/// Only `DATABASE_URL` enables the remote profile tier; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub profile_store_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            profile_store_path: optional_env("PROFILE_STORE_PATH")
                .unwrap_or_else(|| "data/profiles.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
