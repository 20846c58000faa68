use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::catalog::{SearchForm, Suggestions};
use crate::models::MovieWithScreenings;

/// GET /movies/search
/// Runs the filter engine over the full listing. The query string mirrors the
/// search form, see [`SearchForm`].
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(form): Query<SearchForm>,
) -> Result<Json<Vec<MovieWithScreenings>>, ApiError> {
    let criteria = form.resolve();
    tracing::debug!(?criteria, "Searching movies");

    let movies = state.movie_service().search(&criteria).await?;
    Ok(Json(movies))
}

/// GET /movies/suggestions
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Suggestions>, ApiError> {
    let suggestions = state.movie_service().suggestions().await?;
    Ok(Json(suggestions))
}
