//! HTTP server wiring for Reel.
//!
//! Wraps the [`reel_api`] router with CORS and request tracing, and loads the
//! [`ServerConfig`] the binary runs with.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use reel_core::store::MovieStore;
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

/// Port used when neither the config file nor the environment sets one.
pub const DEFAULT_PORT: u16 = 1234;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered lowest to highest: built-in defaults, the optional TOML file,
/// `REEL_*` environment variables, then a bare `PORT` variable as set by most
/// hosting platforms.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:      String,
  pub port:      u16,
  /// JSON array of movies loaded at startup.
  pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_sources(path, std::env::vars().collect())
  }

  /// Load from `path` and an explicit set of environment variables.
  pub fn from_sources(
    path: &Path,
    env: HashMap<String, String>,
  ) -> Result<Self, config::ConfigError> {
    let port = env.get("PORT").cloned();

    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("REEL")
          .source(Some(env.into_iter().collect())),
      )
      .set_override_option("port", port)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Open CORS policy: any origin, and on preflight any method and header.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any)
}

/// Build the complete application [`Router`] for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: MovieStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  reel_api::api_router(store)
    .layer(cors_layer())
    .layer(TraceLayer::new_for_http())
}
