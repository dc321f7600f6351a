//! Error type for `reel-store-memory`.

use reel_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read seed file: {0}")]
  Io(#[from] std::io::Error),

  #[error("seed file is not a JSON array: {0}")]
  Json(#[from] serde_json::Error),

  /// A seed entry failed full validation.
  #[error("seed entry {index}: {source}")]
  InvalidSeed {
    index:  usize,
    #[source]
    source: ValidationError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
