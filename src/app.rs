use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::clients::omdb_client::MetadataFetcher;
use crate::error::{Error, Result};
use crate::model::movie::Movie;
use crate::persisters::{storage_for, StorageFormat};
use crate::renderers::site_renderer::{write_site, SiteRenderer};
use crate::stats::{stats, Stats};
use crate::store::{RecordStore, SortKey, SortOrder};

/// The collection plus the metadata source used to grow it.
pub struct MovieApp {
    store: RecordStore,
    fetcher: Option<Box<dyn MetadataFetcher>>,
}

impl MovieApp {
    /// An app without a metadata source can do everything except add and refresh.
    pub fn new(store: RecordStore, fetcher: Option<Box<dyn MetadataFetcher>>) -> Self {
        Self { store, fetcher }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn fetcher(&self) -> Result<&dyn MetadataFetcher> {
        self.fetcher.as_deref().ok_or_else(|| {
            Error::Config("OMDB_API_KEY must be set to fetch movie metadata".to_string())
        })
    }

    /// Fetches `title` and stores it. A title already in the collection is
    /// rejected before any request is made.
    pub async fn add_movie(&mut self, title: &str) -> Result<&Movie> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("movie title cannot be empty".to_string()));
        }
        if self.store.find(title).is_some() {
            return Err(Error::Duplicate(title.to_string()));
        }

        let movie = self.fetcher()?.fetch(title).await?;
        let key = movie.title.clone();
        self.store.add(movie)?;
        self.store.save()?;
        log::info!("Movie '{}' successfully added", key);

        self.store
            .find(&key)
            .ok_or_else(|| Error::MovieNotFound(key.clone()))
    }

    /// Re-fetches a stored movie and overwrites it with the fresh metadata.
    pub async fn refresh_movie(&mut self, title: &str) -> Result<&Movie> {
        let stored_title = self
            .store
            .find(title)
            .map(|m| m.title.clone())
            .ok_or_else(|| Error::MovieNotFound(title.to_string()))?;

        let mut fresh = self.fetcher()?.fetch(&stored_title).await?;
        // The API may canonicalise the title differently; keep the stored key.
        fresh.title = stored_title.clone();
        self.store.replace(fresh)?;
        self.store.save()?;
        log::info!("Movie '{}' refreshed", stored_title);

        self.store
            .find(&stored_title)
            .ok_or(Error::MovieNotFound(stored_title))
    }

    pub fn delete_movie(&mut self, title: &str) -> Result<Movie> {
        let removed = self.store.remove(title)?;
        self.store.save()?;
        log::info!("Movie '{}' deleted", removed.title);
        Ok(removed)
    }

    pub fn update_movie(&mut self, title: &str, rating: f64) -> Result<Movie> {
        let updated = self.store.update_rating(title, rating)?.clone();
        self.store.save()?;
        log::info!("Movie '{}' updated to rating {}", updated.title, rating);
        Ok(updated)
    }

    pub fn list_movies(&self) -> &[Movie] {
        self.store.list()
    }

    pub fn search_movies(&self, term: &str) -> Vec<&Movie> {
        self.store.search(term)
    }

    pub fn sorted_movies(&self, key: SortKey, order: SortOrder) -> Vec<&Movie> {
        self.store.sort(key, order)
    }

    pub fn movie_stats(&self) -> Option<Stats<'_>> {
        stats(self.store.list())
    }

    pub fn random_movie(&self) -> Option<&Movie> {
        self.store.list().choose(&mut rand::thread_rng())
    }

    /// Writes the collection to `path`. The format defaults to the file
    /// extension, then to `store_format`.
    pub fn export(
        &self,
        path: &Path,
        format: Option<StorageFormat>,
        store_format: StorageFormat,
    ) -> Result<StorageFormat> {
        let format = format
            .or_else(|| StorageFormat::from_path(path))
            .unwrap_or(store_format);
        if format != store_format && same_file(path, self.store.path()) {
            return Err(Error::InvalidInput(format!(
                "refusing to overwrite the data file {} with {} data",
                path.display(),
                format
            )));
        }
        storage_for(format, path.to_path_buf()).save(self.store.list())?;
        log::info!(
            "Exported {} movies to {} as {}",
            self.store.len(),
            path.display(),
            format
        );
        Ok(format)
    }

    pub fn render_site(&self, renderer: &SiteRenderer, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let files = renderer.render(self.store.list());
        let written = write_site(output_dir, &files)?;
        log::info!(
            "Rendered {} movies to {}",
            self.store.len(),
            output_dir.display()
        );
        Ok(written)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
