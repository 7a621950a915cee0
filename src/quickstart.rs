//! Prints the rows of a spreadsheet range, by default the names and majors of
//! students in Google's sample spreadsheet:
//! https://docs.google.com/spreadsheets/d/1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms/edit

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use sheetsync::config::{
    CREDENTIALS_ENV, DEFAULT_CREDENTIALS_FILE, DEFAULT_TOKEN_FILE, TOKEN_ENV,
};
use sheetsync::{Config, Spreadsheet};

const EXAMPLE_SHEETS_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
const EXAMPLE_READ_RANGE: &str = "Class Data!A2:E";

#[derive(Parser)]
#[command(name = "quickstart")]
#[command(author, version, about = "Read a range of a Google Sheets spreadsheet")]
struct Cli {
    /// Path to the OAuth client credentials file
    #[arg(long, env = CREDENTIALS_ENV, default_value = DEFAULT_CREDENTIALS_FILE)]
    credentials: PathBuf,

    /// Path to the token cache, created on first authorization
    #[arg(long, env = TOKEN_ENV, default_value = DEFAULT_TOKEN_FILE)]
    token: PathBuf,

    /// Spreadsheet URL or ID
    #[arg(long, default_value = EXAMPLE_SHEETS_ID)]
    sheet: String,

    /// Range to read, in A1 notation
    #[arg(long, default_value = EXAMPLE_READ_RANGE)]
    range: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config {
        credentials_file: cli.credentials,
        token_file: cli.token,
    };

    // Bare IDs are accepted as well as full URLs.
    let id = sheetsync::spreadsheet_id(&cli.sheet).unwrap_or(cli.sheet);

    let spreadsheet = Spreadsheet::open(&config, &id)
        .await
        .with_context(|| format!("Failed to open spreadsheet {}", id))?;
    let values = spreadsheet
        .get_values(&cli.range)
        .await
        .with_context(|| format!("Unable to retrieve {:?} from sheet", cli.range))?;

    for row in values {
        let cells: Vec<String> = row
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        println!("{}", cells.join(", "));
    }
    Ok(())
}
