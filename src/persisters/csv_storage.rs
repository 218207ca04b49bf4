use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};

use crate::error::{Error, Result};
use crate::model::movie::Movie;

use super::{read_non_empty, write_atomically, MovieStorage};

pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn to_csv_bytes(&self, movies: &[Movie]) -> std::result::Result<Vec<u8>, String> {
        let mut wrt = Writer::from_writer(vec![]);
        if let Err(e) = wrt.write_record(Movie::csv_titles()) {
            return Err(format!("Error when adding header to Csv file. {:?}", e));
        }
        for movie in movies.iter() {
            if let Err(e) = wrt.write_record(movie.to_csvable_array()) {
                return Err(format!(
                    "Error when adding entry to Csv file. Entry: {:?}, Error:{:?}",
                    movie, e
                ));
            }
        }

        wrt.into_inner()
            .map_err(|e| format!("Error when flushing Csv data. {:?}", e.error()))
    }
}

impl MovieStorage for CsvStorage {
    fn load(&self) -> Result<Vec<Movie>> {
        let content = match read_non_empty(&self.path)? {
            Some(content) => content,
            None => return Ok(vec![]),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::corrupt(&self.path, e.to_string()))?;
        if headers.iter().map(str::trim).ne(Movie::csv_titles()) {
            return Err(Error::corrupt(
                &self.path,
                format!(
                    "unexpected header '{}', expected '{}'",
                    headers.iter().collect::<Vec<_>>().join(","),
                    Movie::csv_titles().join(",")
                ),
            ));
        }

        let mut movies = vec![];
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| Error::corrupt(&self.path, e.to_string()))?;
            let movie = Movie::from_csv_record(&row).map_err(|reason| {
                Error::corrupt(&self.path, format!("row {}: {}", index + 1, reason))
            })?;
            movies.push(movie);
        }

        Ok(movies)
    }

    fn save(&self, movies: &[Movie]) -> Result<()> {
        let bytes = self.to_csv_bytes(movies).map_err(Error::InvalidInput)?;
        write_atomically(&self.path, &bytes)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
