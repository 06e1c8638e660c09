//! Error handling for the OncoPrint CLI

use oncoprint_core::OncoPrintError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for OncoPrint CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<OncoPrintError> for CliError {
    fn from(err: OncoPrintError) -> Self {
        match err {
            OncoPrintError::Io { message } => Self::io(message),
            OncoPrintError::Parse { message } => Self::parse("input".to_string(), message),
            other => Self::config(other.to_string()),
        }
    }
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Records must be a JSON array of {\"sample\", \"gene\", \"type\", \"alteration\"} objects\n\
                 • Event logs must hold one JSON object per line",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your oncoprint.toml configuration file\n\
                 • Use 'oncoprint config --example' to generate a sample configuration\n\
                 • Padding must lie strictly between 0 and 0.5",
            );
        }

        _ => {}
    }

    message
}
