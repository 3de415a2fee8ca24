//! Configuration module for the Zogakzip backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default bcrypt work factor for group and post passwords.
const DEFAULT_BCRYPT_COST: u32 = 10;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploaded images are stored
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Base URL used when building uploaded-image URLs.
    /// When unset, the URL is derived from the request's Host header.
    pub public_base_url: Option<String>,
    /// bcrypt work factor for hashing group and post passwords
    pub bcrypt_cost: u32,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("ZOGAK_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let upload_dir = env::var("ZOGAK_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let bind_addr = env::var("ZOGAK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid ZOGAK_BIND_ADDR format");

        let public_base_url = env::var("ZOGAK_PUBLIC_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string());

        let bcrypt_cost = env::var("ZOGAK_BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST);

        let log_level = env::var("ZOGAK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            upload_dir,
            bind_addr,
            public_base_url,
            bcrypt_cost,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        env::remove_var("ZOGAK_DB_PATH");
        env::remove_var("ZOGAK_UPLOAD_DIR");
        env::remove_var("ZOGAK_BIND_ADDR");
        env::remove_var("ZOGAK_PUBLIC_BASE_URL");
        env::remove_var("ZOGAK_BCRYPT_COST");
        env::remove_var("ZOGAK_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert!(config.public_base_url.is_none());
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert_eq!(config.log_level, "info");
    }
}
