//! Startup configuration, resolved once and passed by reference.
//!
//! Values come from defaults, then environment variables (a `.env` file is
//! honoured by `main`), then command-line flags.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::persisters::StorageFormat;

pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SITE_TITLE: &str = "My Movie App";
const DATA_FILE_STEM: &str = "movies";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub data_dir: PathBuf,
    pub format: StorageFormat,
    /// Overrides `<data_dir>/movies.<ext>` when set.
    pub data_file: Option<PathBuf>,
    pub site_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            format: StorageFormat::Json,
            data_file: None,
            site_title: DEFAULT_SITE_TITLE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        config.api_key = get("OMDB_API_KEY");
        if let Some(url) = get("OMDB_API_URL") {
            config.api_url = url;
        }
        if let Some(dir) = get("MOVIEDB_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(format) = get("MOVIEDB_FORMAT") {
            config.format = parse_format(&format)?;
        }
        if let Some(title) = get("MOVIEDB_SITE_TITLE") {
            config.site_title = title;
        }

        Ok(config)
    }

    pub fn data_file_path(&self) -> PathBuf {
        match &self.data_file {
            Some(path) => path.clone(),
            None => self
                .data_dir
                .join(format!("{}.{}", DATA_FILE_STEM, self.format.extension())),
        }
    }

    /// Creates the directory holding the data file if it is missing.
    pub fn ensure_data_dir(&self) -> Result<()> {
        let path = self.data_file_path();
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        if !dir.as_os_str().is_empty() && !dir.exists() {
            log::info!("Creating data directory {}", dir.display());
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

fn parse_format(raw: &str) -> Result<StorageFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(StorageFormat::Json),
        "csv" => Ok(StorageFormat::Csv),
        other => Err(Error::Config(format!(
            "MOVIEDB_FORMAT must be 'json' or 'csv', got '{}'",
            other
        ))),
    }
}
