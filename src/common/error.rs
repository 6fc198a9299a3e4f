//! Error types for netprobe
//!
//! Operation failures are never fatal: the dispatcher renders them into the
//! result sink as `Error: <message>`, so every message here must read well
//! on its own.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for netprobe
#[derive(Error, Debug)]
pub enum Error {
    // === Operation Errors ===
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Unexpected response body: {0}")]
    Serialization(String),

    // === Dispatcher Errors ===
    #[error("Unknown operation '{0}'. Use 'netprobe list' to see available operations")]
    UnknownOperation(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an HTTP status error for a response from `url`
    pub fn http_status(status: u16, url: &str) -> Self {
        Self::HttpStatus {
            status,
            url: url.to_string(),
        }
    }

    /// Create a GraphQL error from the server-reported messages
    pub fn graphql<S: AsRef<str>>(messages: &[S]) -> Self {
        Self::GraphQl(
            messages
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Stable machine-readable code for the error category
    pub fn code(&self) -> &'static str {
        match self {
            Error::Network(_) | Error::Timeout(_) => "NETWORK_ERROR",
            Error::HttpStatus { .. } => "HTTP_STATUS_ERROR",
            Error::GraphQl(_) => "GRAPHQL_ERROR",
            Error::Serialization(_) | Error::Json(_) => "SERIALIZATION_ERROR",
            Error::UnknownOperation(_) => "UNKNOWN_OPERATION",
            Error::Config(_) | Error::ConfigParse(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Error::Serialization(e.to_string());
        }
        // reqwest's top-level message hides the cause ("error sending request")
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::Network(message)
    }
}
