use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Everything is optional: the service runs with defaults on a bare
/// environment, and the browser-discovery overrides only matter on hosts
/// where Chromium lives somewhere unusual.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Constrained/serverless deployment context. Switches the backend
    /// resolver to the minimal headless-shell distribution and the reduced
    /// process-isolation argument set.
    pub serverless: bool,
    /// Override path to the browser executable (checked first by the resolver).
    pub chrome_path: Option<PathBuf>,
    /// Override path to the browser cache directory scanned for installed
    /// browser versions.
    pub chrome_cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            serverless: flag_env("SERVERLESS"),
            chrome_path: optional_path_env("CHROME_PATH"),
            chrome_cache_dir: optional_path_env("CHROME_CACHE_DIR"),
        })
    }
}

/// Truthy flag: set and not one of "" / "0" / "false".
fn flag_env(key: &str) -> bool {
    match std::env::var(key) {
        Ok(v) => !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

fn optional_path_env(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
