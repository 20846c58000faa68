//! Domain service for the movie catalog.
//!
//! Handlers talk to [`MovieService`] rather than to the store so the CRUD
//! contract can be exercised and substituted independently of HTTP.

use thiserror::Error;

use crate::catalog::{FilterCriteria, Suggestions};
use crate::models::{Movie, MovieDraft, MovieWithScreenings};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Every movie with its screenings.
    async fn list_movies(&self) -> Result<Vec<MovieWithScreenings>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get_movie(&self, id: &str) -> Result<MovieWithScreenings, MovieError>;

    /// Creates a movie and its single screening atomically.
    async fn create_movie(&self, draft: MovieDraft) -> Result<MovieWithScreenings, MovieError>;

    /// Overwrites every scalar field and replaces the whole screening set
    /// with the one screening in `draft`, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id; nothing is
    /// written in that case.
    async fn update_movie(&self, id: &str, draft: MovieDraft) -> Result<Movie, MovieError>;

    /// Removes the movie's screenings, then the movie, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id; nothing is
    /// removed in that case.
    async fn delete_movie(&self, id: &str) -> Result<(), MovieError>;

    /// Runs the filter engine over the full listing.
    async fn search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<MovieWithScreenings>, MovieError>;

    async fn suggestions(&self) -> Result<Suggestions, MovieError>;
}
