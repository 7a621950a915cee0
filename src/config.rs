use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CREDENTIALS_ENV: &str = "GOOGLE_SHEETS_CREDENTIALS";
pub const TOKEN_ENV: &str = "GOOGLE_SHEETS_TOKEN";

pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
pub const DEFAULT_TOKEN_FILE: &str = "token.json";

/// Locations of the OAuth client secret and the token cache.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub credentials_file: PathBuf,
    /// Created on first authorization, reused afterwards.
    pub token_file: PathBuf,
}

impl Config {
    pub fn new() -> Config {
        Config {
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }

    /// Reads `GOOGLE_SHEETS_CREDENTIALS` and `GOOGLE_SHEETS_TOKEN`, keeping the
    /// defaults for whichever is unset or empty.
    pub fn from_env() -> Config {
        let mut config = Config::new();
        if let Some(path) = non_empty_var(CREDENTIALS_ENV) {
            config.credentials_file = path;
        }
        if let Some(path) = non_empty_var(TOKEN_ENV) {
            config.token_file = path;
        }
        config
    }

    /// Loads a config from a JSON file with `credentials_file` and `token_file` keys.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

fn non_empty_var(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.credentials_file, PathBuf::from("credentials.json"));
        assert_eq!(config.token_file, PathBuf::from("token.json"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"credentials_file": "/etc/sheets/secret.json", "token_file": "/var/cache/token.json"}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.credentials_file, PathBuf::from("/etc/sheets/secret.json"));
        assert_eq!(config.token_file, PathBuf::from("/var/cache/token.json"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"credentials_file\": ").unwrap();

        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Config::load(missing), Err(Error::Io(_))));
    }
}
