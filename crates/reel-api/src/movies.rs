//! Handlers for `/movies` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/movies`     | Optional `?genre=<name>` (case-insensitive) |
//! | `GET`    | `/movies/:id` | 404 if not found |
//! | `POST`   | `/movies`     | Body: full movie; returns 201 + stored movie |
//! | `PATCH`  | `/movies/:id` | Body: any subset of fields; returns merged movie |
//! | `DELETE` | `/movies/:id` | Returns `{"message":"Movie deleted"}` |
//!
//! Bodies are taken as untyped JSON and run through [`reel_core::validate`]
//! before anything reaches the store.

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path,
    Query,
    State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use reel_core::{
  movie::Movie,
  store::{MovieQuery, MovieStore},
  validate::{validate_movie, validate_partial_movie},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::ApiError;

/// Message returned by `GET /movies/:id` for an unknown id.
pub const GET_NOT_FOUND: &str = "movie not found";
/// Message returned by `PATCH` and `DELETE` for an unknown id.
pub const MOVIE_NOT_FOUND: &str = "Movie not found";

/// Path ids that are not UUIDs, or not even valid UTF-8, cannot match any
/// stored movie.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Option<Uuid> {
  let Path(raw) = path.ok()?;
  Uuid::parse_str(&raw).ok()
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// First `genre` value in the query string. Repeated keys are not an error.
fn genre_param(
  params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Option<String> {
  let Query(pairs) = params
    .inspect_err(|e| tracing::debug!(error = %e, "ignoring query string"))
    .ok()?;
  pairs
    .into_iter()
    .find_map(|(key, value)| (key == "genre").then_some(value))
}

/// `GET /movies[?genre=<genre>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
  S: MovieStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = MovieQuery {
    genre: genre_param(params),
  };
  let movies = store.list(&query).await.map_err(ApiError::store)?;
  Ok(Json(movies))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /movies/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Movie>, ApiError>
where
  S: MovieStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(id).ok_or(ApiError::NotFound(GET_NOT_FOUND))?;
  let movie = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(GET_NOT_FOUND))?;
  Ok(Json(movie))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /movies`: returns 201 + the stored [`Movie`] with its new id.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MovieStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let input = validate_movie(&body).inspect_err(|e| {
    tracing::debug!(issues = e.issues.len(), "create rejected");
  })?;

  let movie = store.insert(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(movie)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /movies/:id`: body is validated before the id is looked up.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, ApiError>
where
  S: MovieStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let patch = validate_partial_movie(&body).inspect_err(|e| {
    tracing::debug!(issues = e.issues.len(), "update rejected");
  })?;

  let id = parse_id(id).ok_or(ApiError::NotFound(MOVIE_NOT_FOUND))?;
  let movie = store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(MOVIE_NOT_FOUND))?;
  Ok(Json(movie))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /movies/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError>
where
  S: MovieStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(id).ok_or(ApiError::NotFound(MOVIE_NOT_FOUND))?;
  store
    .delete(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(MOVIE_NOT_FOUND))?;
  Ok(Json(json!({ "message": "Movie deleted" })))
}
