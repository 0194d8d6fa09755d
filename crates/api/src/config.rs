//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Seance API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `DISPLAY_UTC_OFFSET`: Offset of the operating timezone, e.g. "+01:00" (default: "+01:00")
//! - `COURSE_SLOTS`: Slot table, e.g. "avant-midi=06:00-08:30|Avant-midi;apres-midi=16:30-19:00"
//!   (default: the school's three vacations)

use eyre::{Result, WrapErr};
use seance_core::recurrence::{SlotTable, parse_offset};
use std::env;
use tracing::Level;

/// Configuration for the Seance API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use seance_api::config::ApiConfig;
/// 
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,
    
    /// Port for the API server to listen on
    pub port: u16,
    
    /// PostgreSQL database connection string
    pub database_url: String,
    
    /// Log level for the application
    pub log_level: Level,
    
    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,
    
    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Named vacations and the offset their clocks are expressed in
    pub slots: SlotTable,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - DISPLAY_UTC_OFFSET or COURSE_SLOTS are malformed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;
        
        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        
        // Logging settings
        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
        
        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });
        
        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Schedule settings
        let slots = load_slot_table(
            env::var("DISPLAY_UTC_OFFSET").ok().as_deref(),
            env::var("COURSE_SLOTS").ok().as_deref(),
        )?;
        
        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            slots,
        })
    }
    
    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the slot table from the raw `DISPLAY_UTC_OFFSET` and
/// `COURSE_SLOTS` values.
///
/// With neither set, the default table is used. An offset on its own keeps
/// the default slots but re-anchors them to that offset.
pub fn load_slot_table(offset: Option<&str>, slots: Option<&str>) -> Result<SlotTable> {
    let defaults = SlotTable::default();

    let offset = match offset {
        Some(value) => parse_offset(value).wrap_err("Invalid DISPLAY_UTC_OFFSET value")?,
        None => defaults.offset(),
    };

    match slots {
        Some(table) => SlotTable::parse(offset, table).wrap_err("Invalid COURSE_SLOTS value"),
        None => defaults
            .iter()
            .cloned()
            .try_fold(SlotTable::new(offset), SlotTable::with_slot)
            .wrap_err("Invalid default slot table"),
    }
}
