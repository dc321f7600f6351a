//! [`MemoryStore`] — the in-memory implementation of [`MovieStore`].

use std::{path::Path, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use reel_core::{
  movie::{Movie, MoviePatch, NewMovie},
  store::{MovieQuery, MovieStore},
};

use crate::{Error, Result, seed::parse_seed};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Reel movie store held entirely in process memory.
///
/// Cloning is cheap — clones share the same underlying sequence.
#[derive(Clone, Default)]
pub struct MemoryStore {
  movies: Arc<RwLock<Vec<Movie>>>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `movies`, in the given order.
  ///
  /// The caller is responsible for the movies being valid and their ids
  /// unique; [`parse_seed`] guarantees both.
  pub fn with_movies(movies: Vec<Movie>) -> Self {
    Self {
      movies: Arc::new(RwLock::new(movies)),
    }
  }

  /// Build a store from a JSON seed file.
  pub async fn open_seed(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let movies = parse_seed(&bytes)?;
    tracing::debug!(path = %path.display(), count = movies.len(), "seed loaded");
    Ok(Self::with_movies(movies))
  }

  /// Number of movies currently stored.
  pub async fn len(&self) -> usize { self.movies.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.movies.read().await.is_empty() }
}

// ─── MovieStore impl ─────────────────────────────────────────────────────────

impl MovieStore for MemoryStore {
  type Error = Error;

  async fn list(&self, query: &MovieQuery) -> Result<Vec<Movie>> {
    let movies = self.movies.read().await;
    Ok(movies.iter().filter(|m| query.matches(m)).cloned().collect())
  }

  async fn get(&self, id: Uuid) -> Result<Option<Movie>> {
    let movies = self.movies.read().await;
    Ok(movies.iter().find(|m| m.id == id).cloned())
  }

  async fn insert(&self, input: NewMovie) -> Result<Movie> {
    let mut movies = self.movies.write().await;

    // Ids are unique within the store.
    let mut id = Uuid::new_v4();
    while movies.iter().any(|m| m.id == id) {
      id = Uuid::new_v4();
    }

    let movie = input.into_movie(id);
    movies.push(movie.clone());
    tracing::debug!(%id, "movie inserted");
    Ok(movie)
  }

  async fn update(&self, id: Uuid, patch: MoviePatch) -> Result<Option<Movie>> {
    let mut movies = self.movies.write().await;
    let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
      return Ok(None);
    };

    patch.apply_to(movie);
    tracing::debug!(%id, "movie updated");
    Ok(Some(movie.clone()))
  }

  async fn delete(&self, id: Uuid) -> Result<Option<Movie>> {
    let mut movies = self.movies.write().await;
    let Some(index) = movies.iter().position(|m| m.id == id) else {
      return Ok(None);
    };

    let removed = movies.remove(index);
    tracing::debug!(%id, "movie deleted");
    Ok(Some(removed))
  }
}
