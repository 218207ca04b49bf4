use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::movie::Movie;

use super::{read_non_empty, write_atomically, MovieStorage};

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MovieStorage for JsonStorage {
    fn load(&self) -> Result<Vec<Movie>> {
        let content = match read_non_empty(&self.path)? {
            Some(content) => content,
            None => return Ok(vec![]),
        };

        serde_json::from_str::<Vec<Movie>>(&content)
            .map_err(|e| Error::corrupt(&self.path, e.to_string()))
    }

    fn save(&self, movies: &[Movie]) -> Result<()> {
        let json = serde_json::to_string_pretty(movies)
            .map_err(|e| Error::InvalidInput(format!("could not serialize movies: {}", e)))?;
        write_atomically(&self.path, json.as_bytes())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
