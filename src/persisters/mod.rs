use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::movie::Movie;

pub mod csv_storage;
pub mod json_storage;

use csv_storage::CsvStorage;
use json_storage::JsonStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageFormat {
    Json,
    Csv,
}

impl StorageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Csv => "csv",
        }
    }

    /// Guesses the format from a file extension, if it has a known one.
    pub fn from_path(path: &Path) -> Option<StorageFormat> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(StorageFormat::Json),
            "csv" => Some(StorageFormat::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A flat file holding the whole movie collection.
pub trait MovieStorage {
    /// Reads every movie. A missing file is an empty collection.
    fn load(&self) -> Result<Vec<Movie>>;

    /// Replaces the file contents with `movies`.
    fn save(&self, movies: &[Movie]) -> Result<()>;

    fn path(&self) -> &Path;
}

pub fn storage_for(format: StorageFormat, path: PathBuf) -> Box<dyn MovieStorage> {
    match format {
        StorageFormat::Json => Box::new(JsonStorage::new(path)),
        StorageFormat::Csv => Box::new(CsvStorage::new(path)),
    }
}

/// Returns `None` when the file does not exist or holds only whitespace.
pub(crate) fn read_non_empty(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Err(
            crate::error::Error::corrupt(path, format!("file is not valid UTF-8: {}", e)),
        ),
        Err(e) => Err(e.into()),
    }
}

/// Writes to a sibling temp file and renames it over `path`, so readers see
/// either the old or the new collection.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    // Temp files are created 0600; keep the mode of the file being replaced.
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_uses_extension() {
        assert_eq!(
            StorageFormat::from_path(Path::new("out/movies.CSV")),
            Some(StorageFormat::Csv)
        );
        assert_eq!(
            StorageFormat::from_path(Path::new("movies.json")),
            Some(StorageFormat::Json)
        );
        assert_eq!(StorageFormat::from_path(Path::new("movies.txt")), None);
        assert_eq!(StorageFormat::from_path(Path::new("movies")), None);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("movies.json");

        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn read_non_empty_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        assert!(read_non_empty(&path).unwrap().is_none());

        std::fs::write(&path, "  \n").unwrap();
        assert!(read_non_empty(&path).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, "[]").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_atomically(&path, b"[ ]").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
