//! `SeaORM` implementation of the `MovieService` trait.

use crate::catalog::{FilterCriteria, Suggestions, filter_movies};
use crate::db::Store;
use crate::models::{Movie, MovieDraft, MovieWithScreenings};
use crate::services::movie_service::{MovieError, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list_movies(&self) -> Result<Vec<MovieWithScreenings>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get_movie(&self, id: &str) -> Result<MovieWithScreenings, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or_else(|| MovieError::NotFound(id.to_string()))
    }

    async fn create_movie(&self, draft: MovieDraft) -> Result<MovieWithScreenings, MovieError> {
        Ok(self.store.create_movie(&draft).await?)
    }

    async fn update_movie(&self, id: &str, draft: MovieDraft) -> Result<Movie, MovieError> {
        self.store
            .replace_movie(id, &draft)
            .await?
            .ok_or_else(|| MovieError::NotFound(id.to_string()))
    }

    async fn delete_movie(&self, id: &str) -> Result<(), MovieError> {
        if self.store.delete_movie(id).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id.to_string()))
        }
    }

    async fn search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<MovieWithScreenings>, MovieError> {
        let movies = self.store.list_movies().await?;

        if criteria.is_empty() {
            return Ok(movies);
        }

        Ok(filter_movies(&movies, criteria))
    }

    async fn suggestions(&self) -> Result<Suggestions, MovieError> {
        let movies = self.store.list_movies().await?;
        Ok(Suggestions::from_movies(&movies))
    }
}
