use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::persisters::StorageFormat;
use crate::store::SortKey;

/// Manage a personal movie collection backed by OMDb metadata
#[derive(Parser, Debug)]
#[command(name = "moviedb", version)]
#[command(about = "Keeps a movie collection in a JSON or CSV file and renders it as a static site")]
pub struct Cli {
    /// Directory holding the collection file [env: MOVIEDB_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Collection file format [env: MOVIEDB_FORMAT]
    #[arg(long, value_enum, global = true)]
    pub format: Option<StorageFormat>,

    /// Explicit collection file, overriding the data directory
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch a movie by title and add it to the collection
    Add { title: String },
    /// Remove a movie from the collection
    Delete { title: String },
    /// Change the rating of a stored movie
    Update { title: String, rating: f64 },
    /// Re-fetch a stored movie and overwrite its metadata
    Refresh { title: String },
    /// List every movie in insertion order
    List,
    /// Find movies whose title contains a term
    Search { term: String },
    /// List movies ordered by a field
    Sort {
        #[arg(long, value_enum, default_value_t = SortKey::Rating)]
        by: SortKey,
        /// Highest first
        #[arg(long)]
        desc: bool,
    },
    /// Show average, median, best and worst ratings
    Stats,
    /// Pick a movie to watch tonight
    Random,
    /// Write the collection to another file
    Export {
        path: PathBuf,
        /// Output format; defaults to the file extension
        #[arg(long, value_enum)]
        to: Option<StorageFormat>,
    },
    /// Generate the static showcase site
    Render {
        #[arg(short, long, default_value = "site")]
        output: PathBuf,
        /// HTML template with __TEMPLATE_TITLE__ and __TEMPLATE_MOVIE_GRID__ placeholders
        #[arg(long)]
        template: Option<PathBuf>,
        /// Page heading [env: MOVIEDB_SITE_TITLE]
        #[arg(long)]
        title: Option<String>,
    },
}

impl Command {
    pub fn needs_fetcher(&self) -> bool {
        matches!(self, Command::Add { .. } | Command::Refresh { .. })
    }
}

impl Cli {
    /// Layers command-line flags over a config resolved from the environment.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(file) = &self.file {
            config.data_file = Some(file.clone());
            if self.format.is_none() {
                if let Some(format) = StorageFormat::from_path(file) {
                    config.format = format;
                }
            }
        }
        if let Command::Render {
            title: Some(title), ..
        } = &self.command
        {
            config.site_title = title.clone();
        }
        config
    }
}
