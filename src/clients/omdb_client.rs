use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extractors::movie_extractor::MovieExtractor;
use crate::model::movie::Movie;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Looks up movie metadata by title.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, title: &str) -> Result<Movie>;
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let user_agent = header::HeaderValue::from_static(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::Config("OMDB_API_KEY must be set to fetch movie metadata".to_string())
        })?;
        OmdbClient::new(api_key, config.api_url.clone())
    }

    async fn get_body(&self, title: &str) -> Result<(reqwest::StatusCode, String)> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(|e| {
                Error::Transport(format!(
                    "Failed to reach movie database at {}. Received error: {}",
                    self.base_url, e
                ))
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            Error::Transport(format!("Failed to read response for '{}': {}", title, e))
        })?;
        Ok((status, body))
    }
}

#[async_trait]
impl MetadataFetcher for OmdbClient {
    async fn fetch(&self, title: &str) -> Result<Movie> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("movie title cannot be empty".to_string()));
        }

        log::info!("Fetching information for movie {}", title);
        let (status, body) = self.get_body(title).await?;

        if status.is_success() {
            let movie = MovieExtractor::extract_movie_from_json(&body, title)?;
            log::debug!("Successfully fetched information for movie {:?}", movie);
            return Ok(movie);
        }

        // OMDb also reports API errors (bad key, quota) with non-2xx codes and a JSON body.
        log::warn!("Movie database returned {} for '{}'", status, title);
        match MovieExtractor::extract_movie_from_json(&body, title) {
            Err(Error::NotFound(t)) => Err(Error::NotFound(t)),
            Err(Error::Transport(msg)) if !body.trim_start().starts_with('<') => {
                Err(Error::Transport(format!("HTTP {}: {}", status, msg)))
            }
            _ => Err(Error::Transport(format!("HTTP {} for '{}'", status, title))),
        }
    }
}
