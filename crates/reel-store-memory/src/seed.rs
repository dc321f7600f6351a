//! Seed files: a JSON array of movie objects loaded at startup.
//!
//! Every entry goes through full validation. An entry keeps its `id` when it
//! is a UUID not already used by an earlier entry; otherwise it gets a fresh
//! one.

use std::collections::HashSet;

use reel_core::{movie::Movie, validate::validate_movie};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

/// Parse and validate the contents of a seed file.
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<Movie>> {
  let entries: Vec<Value> = serde_json::from_slice(bytes)?;
  let mut seen = HashSet::with_capacity(entries.len());

  entries
    .iter()
    .enumerate()
    .map(|(index, entry)| {
      let movie = validate_movie(entry)
        .map_err(|source| Error::InvalidSeed { index, source })?;

      let id = entry
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .filter(|id| seen.insert(*id))
        .unwrap_or_else(|| fresh_id(&mut seen));

      Ok(movie.into_movie(id))
    })
    .collect()
}

fn fresh_id(seen: &mut HashSet<Uuid>) -> Uuid {
  loop {
    let id = Uuid::new_v4();
    if seen.insert(id) {
      return id;
    }
  }
}
