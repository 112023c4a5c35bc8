//! Now-playing catalog backed by the TMDB v3 API.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::MovieId,
    error::ApiError,
    protocol::{MovieRecord, NowPlayingResponse},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::{error::BookingError, scope::ScopeHandle};

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "fr-FR";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("catalog unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("movie {0} not found")]
    NotFound(MovieId),
    #[error("catalog answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected catalog payload: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn fetch_now_playing(&self) -> Result<Vec<MovieRecord>, CatalogError>;
    async fn fetch_by_id(&self, id: MovieId) -> Result<MovieRecord, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    http: Client,
    config: TmdbConfig,
}

impl TmdbCatalog {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("language", &self.config.language)
            .extend_pairs(extra);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        missing: Option<MovieId>,
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = missing {
                return Err(CatalogError::NotFound(id));
            }
        }
        if !status.is_success() {
            let message = response
                .json::<ApiError>()
                .await
                .map(|body| body.status_message)
                .unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(CatalogError::Decode)
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_now_playing(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        let url = self.endpoint("movie/now_playing", &[("page", "1")])?;
        let page: NowPlayingResponse = self.get_json(url, None).await?;
        info!(movies = page.results.len(), "loaded now playing");
        Ok(page.results)
    }

    async fn fetch_by_id(&self, id: MovieId) -> Result<MovieRecord, CatalogError> {
        let url = self.endpoint(&format!("movie/{id}"), &[])?;
        let movie: MovieRecord = self.get_json(url, Some(id)).await?;
        debug!(movie_id = %movie.id, "loaded movie details");
        Ok(movie)
    }
}

/// Case-insensitive title search over an already loaded list.
pub fn filter_by_title<'a>(movies: &'a [MovieRecord], term: &str) -> Vec<&'a MovieRecord> {
    let needle = term.trim().to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .collect()
}

/// State of the "now playing" list view.
#[derive(Debug, Default)]
pub struct MovieListing {
    movies: Vec<MovieRecord>,
    search: String,
    requested: bool,
    loaded: bool,
}

impl MovieListing {
    /// One fetch per mount, whatever its outcome; a failure leaves the list
    /// empty and later calls are refused.
    pub async fn load(
        &mut self,
        catalog: &dyn MovieCatalog,
        scope: &ScopeHandle,
    ) -> Result<usize, BookingError> {
        if self.requested {
            return Err(BookingError::ListingAlreadyRequested);
        }
        self.requested = true;
        let movies = scope.run(catalog.fetch_now_playing()).await??;
        self.movies = movies;
        self.loaded = true;
        Ok(self.movies.len())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn all(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn visible(&self) -> Vec<&MovieRecord> {
        filter_by_title(&self.movies, &self.search)
    }
}

/// Token identifying one detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    sequence: u64,
    movie_id: MovieId,
}

/// Loads movie details and drops any response that is no longer the latest
/// request or that describes a different movie than the one requested.
#[derive(Debug, Clone, Default)]
pub struct DetailLoader {
    latest: Arc<AtomicU64>,
}

impl DetailLoader {
    pub fn begin(&self, movie_id: MovieId) -> RequestToken {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken { sequence, movie_id }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.sequence
    }

    /// `Ok(None)` means the response arrived stale and was discarded.
    pub async fn load(
        &self,
        catalog: &dyn MovieCatalog,
        movie_id: MovieId,
        scope: &ScopeHandle,
    ) -> Result<Option<MovieRecord>, BookingError> {
        let token = self.begin(movie_id);
        let outcome = scope.run(catalog.fetch_by_id(movie_id)).await?;
        self.accept(token, outcome)
    }

    pub fn accept(
        &self,
        token: RequestToken,
        outcome: Result<MovieRecord, CatalogError>,
    ) -> Result<Option<MovieRecord>, BookingError> {
        if !self.is_current(token) {
            debug!(movie_id = %token.movie_id, "discarding stale detail response");
            return Ok(None);
        }
        let movie = outcome?;
        if movie.id != token.movie_id {
            warn!(
                requested = %token.movie_id,
                received = %movie.id,
                "discarding detail response for another movie"
            );
            return Ok(None);
        }
        Ok(Some(movie))
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
