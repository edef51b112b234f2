//! Error types for the Folio access layer.
//!
//! Errors are split by concern: configuration problems surface before any
//! request is made, Flickr errors carry enough context (method, HTTP status,
//! API code) to tell a bad key from a flaky network.

use thiserror::Error;

/// Top-level error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Flickr API errors
    #[error("Flickr error: {0}")]
    Flickr(#[from] FlickrError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A credential the client needs is not set
    #[error("Missing {field}. Set it in the config file or via {env}.")]
    MissingCredential {
        field: &'static str,
        env: &'static str,
    },
}

/// Errors raised while talking to the Flickr REST endpoint.
#[derive(Error, Debug)]
pub enum FlickrError {
    /// Transport failure or non-2xx HTTP status
    #[error("{method}: HTTP request failed: {message}")]
    Http {
        method: String,
        message: String,
        status_code: Option<u16>,
        /// The request never reached Flickr (refused, DNS, reset)
        connect: bool,
    },

    /// The response envelope had `stat != "ok"`
    #[error("{method}: Flickr API error {code}: {message}")]
    Api {
        method: String,
        code: i64,
        message: String,
    },

    /// The body was not the JSON shape we expected
    #[error("{method}: unexpected response: {message}")]
    Decode { method: String, message: String },

    /// Request exceeded the configured timeout
    #[error("{method}: timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },
}

impl FlickrError {
    /// The Flickr API method the failing request was for.
    pub fn method(&self) -> &str {
        match self {
            FlickrError::Http { method, .. }
            | FlickrError::Api { method, .. }
            | FlickrError::Decode { method, .. }
            | FlickrError::Timeout { method, .. } => method,
        }
    }
}

/// Convenience type alias for Folio results.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Convenience type alias for Flickr client results.
pub type FlickrResult<T> = std::result::Result<T, FlickrError>;
