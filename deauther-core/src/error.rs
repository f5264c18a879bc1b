//! Error types for deauther

use thiserror::Error;

/// Result type alias for deauther operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deauther
///
/// Only control-path operations (session setup, configuration, persistence)
/// report errors. Drops inside the receive path are counted, never raised.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (storage, replay input)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Radio driver rejected a control operation
    #[error("Radio error: {0}")]
    Radio(String),

    /// Invalid parameter error
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Malformed hardware address
    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),

    /// Channel outside the legal range
    #[error("Invalid channel: {0}")]
    InvalidChannel(u8),

    /// No scanned access point at the requested index
    #[error("No access point at scan index {0}")]
    TargetNotFound(usize),

    /// Capture or persistence error
    #[error("Capture error: {0}")]
    Capture(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error (hex dumps, CLI values)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a radio error with a custom message
    pub fn radio<S: Into<String>>(msg: S) -> Self {
        Error::Radio(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
