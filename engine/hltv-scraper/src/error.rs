//! Error types for the scraper
//!
//! None of these cross the public fetch surface: the page fetcher logs a
//! [`FetchError`] and hands back `None`, and the collection store logs a
//! corrupt file and starts empty. They exist so the failure paths can be
//! named and tested.

use thiserror::Error;

/// Failures talking to the rendering proxy
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or HTTP-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Proxy answered with a non-success HTTP status
    #[error("Proxy returned HTTP {0}")]
    HttpStatus(u16),

    /// Envelope parsed but `status` was not `"ok"`
    #[error("Proxy reported status '{status}': {message}")]
    NotOk { status: String, message: String },

    /// Envelope was not the expected shape
    #[error("Malformed proxy envelope: {0}")]
    Envelope(String),
}

/// Failures reading or writing persisted collections
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Existing file could not be decoded
    #[error("Corrupt collection file: {0}")]
    Corruption(#[from] serde_json::Error),
}

/// Invalid configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
