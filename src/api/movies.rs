use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_movie_input;
use super::{ApiError, AppState};
use crate::models::{Movie, MovieInput, MovieWithScreenings};

/// GET /movies
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MovieWithScreenings>>, ApiError> {
    let movies = state.movie_service().list_movies().await?;
    Ok(Json(movies))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieWithScreenings>, ApiError> {
    let movie = state.movie_service().get_movie(&id).await?;
    Ok(Json(movie))
}

/// POST /movies
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieWithScreenings>), ApiError> {
    let Json(payload) = payload?;
    let draft = validate_movie_input(payload)?;

    let created = state
        .movie_service()
        .create_movie(draft)
        .await
        .map_err(|e| ApiError::store_failure("Failed to create movie", e))?;

    tracing::info!(user = %user.username, movie_id = %created.movie.id, "Movie created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /movies/{id}
/// Full replace: scalars are overwritten and the screening set becomes the
/// single screening in the body.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Json(payload) = payload?;
    let draft = validate_movie_input(payload)?;

    let movie = state
        .movie_service()
        .update_movie(&id, draft)
        .await
        .map_err(|e| ApiError::store_failure("Failed to update movie", e))?;

    tracing::info!(user = %user.username, movie_id = %id, "Movie updated");

    Ok(Json(movie))
}

/// DELETE /movies/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .movie_service()
        .delete_movie(&id)
        .await
        .map_err(|e| ApiError::store_failure("Failed to delete movie", e))?;

    tracing::info!(user = %user.username, movie_id = %id, "Movie deleted");

    Ok(StatusCode::NO_CONTENT)
}
