use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;

/// Fixed fallback poster used whenever a lookup cannot produce an image.
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/6/64/Poster_not_available.jpg";

const IMAGE_HOST: &str = "https://image.tmdb.org/t/p/w500";

/// Poster lookup collaborator consumed by the recommendation flow.
///
/// Never fails past this boundary: a network error, an empty result set,
/// or a result without an image all resolve to the placeholder URL.
#[async_trait]
pub trait PosterProvider: Send + Sync {
    async fn lookup_poster(&self, title: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    poster_path: Option<String>,
}

/// TMDB movie-search client. Searches by title and keeps only the first
/// result's poster path. No caching; repeated lookups re-query.
#[derive(Clone)]
pub struct TmdbPosterClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbPosterClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    async fn search(&self, title: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            self.api_url,
            self.api_key,
            urlencoding::encode(title)
        );

        let response = self.http_client.get(&url).send().await?.error_for_status()?;
        let body: SearchResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|result| result.poster_path)
            .map(|path| format!("{}{}", IMAGE_HOST, path)))
    }
}

#[async_trait]
impl PosterProvider for TmdbPosterClient {
    async fn lookup_poster(&self, title: &str) -> String {
        match self.search(title).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("No poster found for '{}', using placeholder", title);
                PLACEHOLDER_POSTER_URL.to_string()
            }
            Err(e) => {
                warn!("Poster lookup failed for '{}': {}", title, e);
                PLACEHOLDER_POSTER_URL.to_string()
            }
        }
    }
}
