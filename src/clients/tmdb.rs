//! Thin pass-through client for The Movie Database API.
//!
//! No retries and no caching; the upstream payload is relayed as-is.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::config::TmdbConfig;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Movie not found upstream")]
    NotFound,

    #[error("Upstream API unavailable: {0}")]
    Upstream(String),
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            language: config.language.clone(),
        })
    }

    /// Fetches movie details by TMDB id and relays the raw payload.
    /// Any upstream non-success other than 404 is reported as unavailable.
    pub async fn movie_details(&self, tmdb_id: i64) -> Result<serde_json::Value, TmdbError> {
        let url = format!("{}/movie/{}", self.base_url, tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("language", self.language.as_str())])
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| {
                warn!("TMDB request failed: {e}");
                TmdbError::Upstream(e.to_string())
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            warn!("TMDB API error: {status}");
            return Err(TmdbError::Upstream(format!("upstream returned {status}")));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TmdbError::Upstream(e.to_string()))
    }
}
