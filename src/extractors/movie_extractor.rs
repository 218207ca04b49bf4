use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::movie::Movie;

const NOT_AVAILABLE: &str = "N/A";
const MOVIE_NOT_FOUND: &str = "Movie not found!";

/// Raw OMDb `?t=` response. Failures carry only `Response` and `Error`.
#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug)]
pub struct MovieExtractor {}

impl MovieExtractor {
    pub fn extract_movie_from_json(body: &str, requested_title: &str) -> Result<Movie> {
        let payload: OmdbPayload = serde_json::from_str(body).map_err(|e| {
            Error::Transport(format!(
                "Could not decode response for '{}': {}",
                requested_title, e
            ))
        })?;

        if !payload.response.eq_ignore_ascii_case("true") {
            let message = payload.error.unwrap_or_else(|| "unknown error".to_string());
            if message == MOVIE_NOT_FOUND {
                return Err(Error::NotFound(requested_title.to_string()));
            }
            return Err(Error::Transport(message));
        }

        let title = match payload.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                return Err(Error::InvalidResponse(format!(
                    "Could not extract title for '{}'",
                    requested_title
                )))
            }
        };

        let year = MovieExtractor::extract_year(payload.year.as_deref()).ok_or_else(|| {
            Error::InvalidResponse(format!(
                "Could not extract year for '{}' from {:?}",
                title, payload.year
            ))
        })?;

        let rating = MovieExtractor::extract_rating(payload.imdb_rating.as_deref())
            .ok_or_else(|| {
                Error::InvalidResponse(format!(
                    "Could not extract rating for '{}' from {:?}",
                    title, payload.imdb_rating
                ))
            })?;

        Ok(Movie {
            title,
            year,
            genre: payload.genre.unwrap_or_default(),
            director: payload.director.unwrap_or_default(),
            rating,
            poster_url: MovieExtractor::extract_poster(payload.poster),
        })
    }

    // Series report ranges like "2010–2012"; the leading four digits are the start year.
    fn extract_year(raw: Option<&str>) -> Option<i32> {
        let digits: String = raw?.trim().chars().take(4).collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse::<i32>().ok()
    }

    fn extract_rating(raw: Option<&str>) -> Option<f64> {
        match raw.map(str::trim) {
            None | Some(NOT_AVAILABLE) => Some(0.0),
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|r| (0.0..=10.0).contains(r)),
        }
    }

    fn extract_poster(raw: Option<String>) -> Option<String> {
        raw.filter(|url| {
            let url = url.trim();
            !url.is_empty() && url != NOT_AVAILABLE
        })
    }
}
