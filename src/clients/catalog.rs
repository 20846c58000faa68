//! HTTP client for the movie catalog API.
//!
//! Keeps the last fetched listing and drops it after every successful
//! mutation, so the next read reflects the server's current state instead of
//! a locally patched copy.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::{debug, warn};
use url::Url;

use crate::api::MessageResponse;
use crate::catalog::{SearchForm, Suggestions, filter_movies};
use crate::config::Config;
use crate::models::{Movie, MovieInput, MovieWithScreenings};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

/// Progress of the most recent [`CatalogClient::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Done(Vec<MovieWithScreenings>),
    Failed(String),
}

type Listing = Arc<Vec<MovieWithScreenings>>;

pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    search_delay: Duration,
    cache: RwLock<Option<Listing>>,
    search_state: watch::Sender<SearchState>,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("Marquee/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: None,
            search_delay: Duration::ZERO,
            cache: RwLock::new(None),
            search_state: watch::Sender::new(SearchState::Idle),
        })
    }

    /// Client with the search delay taken from `[search]` in the config.
    pub fn from_config(base_url: &str, config: &Config) -> Result<Self, ClientError> {
        Ok(Self::new(base_url)?.with_search_delay(Duration::from_millis(
            config.search.artificial_delay_ms,
        )))
    }

    /// Sent as `X-Api-Key` on every mutation.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Fixed pause inserted before every search resolves.
    #[must_use]
    pub const fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.search_state.subscribe()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        }
    }

    /// Starts a server-side session; later mutations ride on its cookie.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoint("api/auth/login")?;
        let body = serde_json::json!({ "username": username, "password": password });
        check(self.client.post(url).json(&body).send().await?).await?;

        debug!(user = username, "Logged in to catalog API");
        Ok(())
    }

    /// The cached listing, fetching it first if nothing is cached.
    pub async fn movies(&self) -> Result<Listing, ClientError> {
        if let Some(listing) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(listing));
        }

        self.refresh().await
    }

    /// Fetches `GET /api/movies` unconditionally and caches the result.
    pub async fn refresh(&self) -> Result<Listing, ClientError> {
        let url = self.endpoint("api/movies")?;
        let response = check(self.client.get(url).send().await?).await?;
        let listing: Listing = Arc::new(response.json().await?);

        debug!(count = listing.len(), "Fetched movie listing");
        *self.cache.write().await = Some(Arc::clone(&listing));

        Ok(listing)
    }

    pub async fn invalidate(&self) {
        self.cache.write().await.take();
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.read().await.is_some()
    }

    pub async fn get_movie(&self, id: &str) -> Result<MovieWithScreenings, ClientError> {
        let url = self.endpoint(&format!("api/movies/{id}"))?;
        let response = check(self.client.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn create_movie(
        &self,
        input: &MovieInput,
    ) -> Result<MovieWithScreenings, ClientError> {
        let url = self.endpoint("api/movies")?;
        let request = self.authorized(self.client.post(url).json(input));
        let response = check(request.send().await?).await?;
        let created = response.json().await?;

        self.invalidate().await;
        Ok(created)
    }

    pub async fn update_movie(&self, id: &str, input: &MovieInput) -> Result<Movie, ClientError> {
        let url = self.endpoint(&format!("api/movies/{id}"))?;
        let request = self.authorized(self.client.put(url).json(input));
        let response = check(request.send().await?).await?;
        let updated = response.json().await?;

        self.invalidate().await;
        Ok(updated)
    }

    pub async fn delete_movie(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/movies/{id}"))?;
        let request = self.authorized(self.client.delete(url));
        check(request.send().await?).await?;

        self.invalidate().await;
        Ok(())
    }

    /// Filters the listing locally, publishing progress to subscribers.
    pub async fn search(
        &self,
        form: &SearchForm,
    ) -> Result<Vec<MovieWithScreenings>, ClientError> {
        self.search_state.send_replace(SearchState::Searching);

        let listing = match self.movies().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, "Search failed to load movies");
                self.search_state
                    .send_replace(SearchState::Failed(e.to_string()));
                return Err(e);
            }
        };

        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }

        let results = filter_movies(&listing, &form.resolve());
        self.search_state
            .send_replace(SearchState::Done(results.clone()));

        Ok(results)
    }

    /// Suggestion lists computed from the (cached) listing.
    pub async fn suggestions(&self) -> Result<Suggestions, ClientError> {
        let listing = self.movies().await?;
        Ok(Suggestions::from_movies(&listing))
    }
}

/// Turns a non-success response into [`ClientError::Status`], using the
/// server's `{message}` body when there is one.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map_or(body, |parsed| parsed.message);

    Err(ClientError::Status { status, message })
}
