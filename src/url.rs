use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

const HOST_PREFIX: &str = "https://docs.google.com";
const DEFAULT_TAB_SUFFIX: &str = "edit#gid=0";

lazy_static! {
    // https://developers.google.com/sheets/api/guides/concepts
    static ref SPREADSHEET_PATH: Regex =
        Regex::new(r"/spreadsheets/d/(?P<id>[a-zA-Z0-9_-]+)").unwrap();
}

/// Returns the spreadsheet ID embedded in a Google Sheets URL, e.g.
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub fn spreadsheet_id(url: &str) -> Result<String> {
    let trimmed = url.strip_prefix(HOST_PREFIX).unwrap_or(url);
    let trimmed = trimmed.strip_suffix(DEFAULT_TAB_SUFFIX).unwrap_or(trimmed);

    SPREADSHEET_PATH
        .captures(trimmed)
        .and_then(|caps| caps.name("id"))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";

    #[test]
    fn full_url() {
        let url = format!("https://docs.google.com/spreadsheets/d/{}/edit#gid=0", SAMPLE_ID);
        assert_eq!(spreadsheet_id(&url).unwrap(), SAMPLE_ID);
    }

    #[test]
    fn url_without_fragment() {
        let url = format!("https://docs.google.com/spreadsheets/d/{}/edit", SAMPLE_ID);
        assert_eq!(spreadsheet_id(&url).unwrap(), SAMPLE_ID);

        let url = format!("https://docs.google.com/spreadsheets/d/{}", SAMPLE_ID);
        assert_eq!(spreadsheet_id(&url).unwrap(), SAMPLE_ID);
    }

    #[test]
    fn other_tab_and_query() {
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/edit?usp=sharing#gid=1290454713",
            SAMPLE_ID
        );
        assert_eq!(spreadsheet_id(&url).unwrap(), SAMPLE_ID);
    }

    #[test]
    fn path_only() {
        let path = format!("/spreadsheets/d/{}/edit#gid=0", SAMPLE_ID);
        assert_eq!(spreadsheet_id(&path).unwrap(), SAMPLE_ID);
    }

    #[test]
    fn id_with_dash_and_underscore() {
        let url = "https://docs.google.com/spreadsheets/d/1VJI0G67jWe4KFeDyqrUpId1pX1-iK0A16maJ7I_pqP4/edit";
        assert_eq!(
            spreadsheet_id(url).unwrap(),
            "1VJI0G67jWe4KFeDyqrUpId1pX1-iK0A16maJ7I_pqP4"
        );
    }

    #[test]
    fn malformed_urls() {
        for url in [
            "",
            SAMPLE_ID,
            "https://docs.google.com/document/d/abc123/edit",
            "https://docs.google.com/spreadsheets/d/",
            "https://docs.google.com/spreadsheets/u/0/",
        ] {
            match spreadsheet_id(url) {
                Err(Error::InvalidUrl(got)) => assert_eq!(got, url),
                other => panic!("expected InvalidUrl for {:?}, got {:?}", url, other),
            }
        }
    }
}
