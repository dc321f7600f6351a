//! The `MovieStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `reel-store-memory`).
//! Higher layers (`reel-api`, `reel-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::movie::{Movie, MoviePatch, NewMovie};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`MovieStore::list`].
#[derive(Debug, Clone, Default)]
pub struct MovieQuery {
  /// Case-insensitive genre name; only movies tagged with it are returned.
  pub genre: Option<String>,
}

impl MovieQuery {
  pub fn by_genre(genre: impl Into<String>) -> Self {
    Self {
      genre: Some(genre.into()),
    }
  }

  /// Whether `movie` passes every filter in this query.
  pub fn matches(&self, movie: &Movie) -> bool {
    match self.genre.as_deref() {
      Some(genre) if !genre.is_empty() => movie.has_genre(genre),
      _ => true,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Reel movie store backend.
///
/// Inputs are already validated: the store never sees untyped data. Listing
/// preserves insertion order.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MovieStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All movies matching `query`, in insertion order.
  fn list<'a>(
    &'a self,
    query: &'a MovieQuery,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + 'a;

  /// Retrieve a movie by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  /// Assign a fresh id to `input`, append it and return the stored movie.
  fn insert(
    &self,
    input: NewMovie,
  ) -> impl Future<Output = Result<Movie, Self::Error>> + Send + '_;

  /// Merge `patch` over the movie with `id` in place. Returns the merged
  /// movie, or `None` if no movie has that id.
  fn update(
    &self,
    id: Uuid,
    patch: MoviePatch,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  /// Remove the movie with `id`. Returns the removed movie, or `None` if no
  /// movie has that id.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;
}
