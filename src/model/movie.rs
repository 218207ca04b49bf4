use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub director: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Movie {
    pub fn to_csvable_array(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.year.to_string(),
            self.genre.clone(),
            self.director.clone(),
            self.rating.to_string(),
            self.poster_url.clone().unwrap_or_default(),
        ]
    }

    pub fn csv_titles() -> Vec<&'static str> {
        vec!["title", "year", "genre", "director", "rating", "poster_url"]
    }

    /// Builds a movie from a CSV row laid out as in [`Movie::csv_titles`].
    pub fn from_csv_record(record: &csv::StringRecord) -> std::result::Result<Movie, String> {
        if record.len() != Movie::csv_titles().len() {
            return Err(format!(
                "expected {} fields, found {}",
                Movie::csv_titles().len(),
                record.len()
            ));
        }

        let year = record[1]
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid year '{}': {}", &record[1], e))?;
        let rating = record[4]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid rating '{}': {}", &record[4], e))?;
        let poster_url = match record[5].trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        Ok(Movie {
            title: record[0].to_string(),
            year,
            genre: record[2].to_string(),
            director: record[3].to_string(),
            rating,
            poster_url,
        })
    }

    /// Case-insensitive key used to enforce title uniqueness.
    pub fn key(&self) -> String {
        title_key(&self.title)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("movie title cannot be empty".to_string()));
        }
        validate_rating(self.rating)
    }
}

pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

pub fn validate_rating(rating: f64) -> Result<()> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(Error::InvalidInput(format!(
            "rating must be between 0 and {}, got {}",
            MAX_RATING, rating
        )));
    }
    Ok(())
}
