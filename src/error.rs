//! Error types

use google_sheets4::oauth2;
use thiserror::Error;

/// Result type for spreadsheet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to Google Sheets
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// OAuth token could not be obtained or refreshed
    #[error("Authentication error: {0}")]
    Auth(#[from] oauth2::Error),

    /// Sheets API call failed
    #[error("Sheets API error: {0}")]
    Api(#[from] google_sheets4::Error),

    /// Malformed config file
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Not a Google Sheets URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// The API response lacked a field the operation depends on
    #[error("Response is missing {0}")]
    MissingField(&'static str),
}
