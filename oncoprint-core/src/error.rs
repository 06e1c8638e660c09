//! Error handling for OncoPrint core

use thiserror::Error;

/// Main error type for OncoPrint operations
#[derive(Error, Debug)]
pub enum OncoPrintError {
    #[error("Invalid padding {padding}: bar-gap padding must lie strictly between 0 and 0.5")]
    InvalidPadding { padding: f64 },

    #[error("Invalid color: {message}")]
    InvalidColor { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("Parsing error: {message}")]
    Parse { message: String },
}

impl OncoPrintError {
    pub fn invalid_padding(padding: f64) -> Self {
        Self::InvalidPadding { padding }
    }

    pub fn invalid_color<S: Into<String>>(message: S) -> Self {
        Self::InvalidColor { message: message.into() }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse { message: message.into() }
    }
}

impl From<std::io::Error> for OncoPrintError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for OncoPrintError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(format!("JSON parsing error: {}", err))
    }
}

impl From<toml::de::Error> for OncoPrintError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for OncoPrintError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Result type for OncoPrint operations
pub type Result<T> = std::result::Result<T, OncoPrintError>;
