use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(checkin::config),
        help("check the file named by CHECKIN_CONFIG (default: config/checkin.toml)")
    )]
    Config(String),

    #[error("Calendar fetch error: {0}")]
    #[diagnostic(code(checkin::network))]
    Network(String),

    #[error("Calendar format error: {0}")]
    #[diagnostic(code(checkin::format))]
    Format(String),

    #[error("Survey submission error: {0}")]
    #[diagnostic(code(checkin::submission))]
    Submission(String),

    #[error(transparent)]
    #[diagnostic(code(checkin::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(checkin::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(checkin::other))]
    Other(String),
}

impl Error {
    /// Whether this error came from fetching or parsing the calendar
    pub fn is_calendar_error(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Format(_))
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Timeouts, connection failures and non-success statuses all end up here
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network(format!("request timed out: {}", err))
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<fantoccini::error::CmdError> for Error {
    fn from(err: fantoccini::error::CmdError) -> Self {
        Error::Submission(err.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for Error {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        Error::Submission(format!("failed to start browser session: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type CheckinResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create calendar network errors
pub fn network_error(message: &str) -> Error {
    Error::Network(message.to_string())
}

/// Helper to create calendar format errors
pub fn format_error(message: &str) -> Error {
    Error::Format(message.to_string())
}

/// Helper to create survey submission errors
pub fn submission_error(message: &str) -> Error {
    Error::Submission(message.to_string())
}
