use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const DATABASE_FILE: &str = "movies.db";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the database and the settings file.
    pub data_dir: PathBuf,
    pub tmdb_api_key: String,
    /// TMDB `language` query parameter, e.g. `en-US`.
    pub language: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, tmdb_api_key: String) -> Self {
        Self {
            data_dir: data_dir.into(),
            tmdb_api_key,
            language: None,
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite:{}?mode=rwc",
            self.data_dir.join(DATABASE_FILE).display()
        )
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}
