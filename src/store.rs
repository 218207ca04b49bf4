//! In-memory movie collection backed by a single flat file.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::movie::{title_key, validate_rating, Movie};
use crate::persisters::MovieStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    Title,
    Year,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Owns the movies for one session. Titles are unique ignoring case, and
/// `list` preserves insertion order.
pub struct RecordStore {
    movies: Vec<Movie>,
    storage: Box<dyn MovieStorage>,
}

impl RecordStore {
    pub fn new(storage: Box<dyn MovieStorage>) -> Self {
        Self {
            movies: vec![],
            storage,
        }
    }

    /// Creates a store and fills it from its file.
    pub fn open(storage: Box<dyn MovieStorage>) -> Result<Self> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<()> {
        let movies = self.storage.load()?;

        let mut seen = HashSet::new();
        for movie in movies.iter() {
            if !seen.insert(movie.key()) {
                return Err(Error::corrupt(
                    self.storage.path(),
                    format!("duplicate title '{}'", movie.title),
                ));
            }
            movie
                .validate()
                .map_err(|e| Error::corrupt(self.storage.path(), e.to_string()))?;
        }

        log::debug!(
            "Loaded {} movies from {}",
            movies.len(),
            self.storage.path().display()
        );
        self.movies = movies;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.movies)?;
        log::info!(
            "Saved {} movies to {}",
            self.movies.len(),
            self.storage.path().display()
        );
        Ok(())
    }

    pub fn add(&mut self, movie: Movie) -> Result<()> {
        movie.validate()?;
        if self.position(&movie.title).is_some() {
            return Err(Error::Duplicate(movie.title));
        }
        self.movies.push(movie);
        Ok(())
    }

    /// Overwrites the stored movie with the same title, keeping its position.
    pub fn replace(&mut self, movie: Movie) -> Result<Movie> {
        movie.validate()?;
        let index = self
            .position(&movie.title)
            .ok_or_else(|| Error::MovieNotFound(movie.title.clone()))?;
        Ok(std::mem::replace(&mut self.movies[index], movie))
    }

    pub fn remove(&mut self, title: &str) -> Result<Movie> {
        let index = self
            .position(title)
            .ok_or_else(|| Error::MovieNotFound(title.to_string()))?;
        Ok(self.movies.remove(index))
    }

    pub fn update_rating(&mut self, title: &str, rating: f64) -> Result<&Movie> {
        validate_rating(rating)?;
        let index = self
            .position(title)
            .ok_or_else(|| Error::MovieNotFound(title.to_string()))?;
        self.movies[index].rating = rating;
        Ok(&self.movies[index])
    }

    pub fn find(&self, title: &str) -> Option<&Movie> {
        self.position(title).map(|i| &self.movies[i])
    }

    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    /// Case-insensitive substring match on titles.
    pub fn search(&self, term: &str) -> Vec<&Movie> {
        let term = term.trim().to_lowercase();
        self.movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&term))
            .collect()
    }

    /// Stable sort: movies with equal keys stay in insertion order in both
    /// directions.
    pub fn sort(&self, key: SortKey, order: SortOrder) -> Vec<&Movie> {
        let mut sorted: Vec<&Movie> = self.movies.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        sorted
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    fn position(&self, title: &str) -> Option<usize> {
        let key = title_key(title);
        self.movies.iter().position(|m| m.key() == key)
    }
}

fn compare(a: &Movie, b: &Movie, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.key().cmp(&b.key()),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
    }
}
