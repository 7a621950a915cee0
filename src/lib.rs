//! # sheetsync
//!
//! A small convenience wrapper around the Google Sheets API: authorize with an
//! installed-app OAuth flow, read ranges, and write styled rows into new sheets
//! of a spreadsheet, optionally exporting the same rows as CSV.

pub mod auth;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod row;
pub mod spreadsheet;
pub mod url;

pub use config::Config;
pub use error::{Error, Result};
pub use export::write_csv;
pub use row::{Cell, Color, Row, SheetData};
pub use spreadsheet::Spreadsheet;
pub use url::spreadsheet_id;
