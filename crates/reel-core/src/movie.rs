//! Movie types — the single entity of the Reel catalogue.
//!
//! A [`Movie`] is only ever constructed from a validated [`NewMovie`] or
//! mutated through a validated [`MoviePatch`]; see [`crate::validate`].

use serde::Serialize;
use strum::{AsRefStr, EnumString, VariantNames};
use uuid::Uuid;

/// Rate assigned when a new movie does not specify one.
pub const DEFAULT_RATE: u8 = 5;

// ─── Genre ───────────────────────────────────────────────────────────────────

/// The closed set of genres a movie may be tagged with.
///
/// Wire names are case-sensitive on input; list filtering compares them
/// case-insensitively via [`Genre::matches`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  AsRefStr,
  EnumString,
  VariantNames,
)]
pub enum Genre {
  Action,
  Adventure,
  Comedy,
  Drama,
  Fantasy,
  Horror,
  #[serde(rename = "Sci-fi")]
  #[strum(serialize = "Sci-fi")]
  SciFi,
  Thriller,
}

impl Genre {
  /// Case-insensitive comparison against a genre name.
  pub fn matches(&self, name: &str) -> bool {
    self.as_ref().to_lowercase() == name.to_lowercase()
  }
}

// ─── Movie ───────────────────────────────────────────────────────────────────

/// A stored movie record. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
  pub id:       Uuid,
  pub title:    String,
  pub year:     u16,
  pub director: String,
  /// Running time in minutes.
  pub duration: u32,
  pub rate:     u8,
  /// Absolute URL of the poster image.
  pub poster:   String,
  pub genre:    Vec<Genre>,
}

impl Movie {
  pub fn has_genre(&self, name: &str) -> bool {
    self.genre.iter().any(|g| g.matches(name))
  }
}

// ─── NewMovie ────────────────────────────────────────────────────────────────

/// A fully validated movie that has not been stored yet.
/// Produced by [`crate::validate::validate_movie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
  pub title:    String,
  pub year:     u16,
  pub director: String,
  pub duration: u32,
  pub rate:     u8,
  pub poster:   String,
  pub genre:    Vec<Genre>,
}

impl NewMovie {
  /// Attach a store-assigned id.
  pub fn into_movie(self, id: Uuid) -> Movie {
    Movie {
      id,
      title: self.title,
      year: self.year,
      director: self.director,
      duration: self.duration,
      rate: self.rate,
      poster: self.poster,
      genre: self.genre,
    }
  }
}

// ─── MoviePatch ──────────────────────────────────────────────────────────────

/// A validated partial update. `None` fields keep their stored value.
/// Produced by [`crate::validate::validate_partial_movie`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoviePatch {
  pub title:    Option<String>,
  pub year:     Option<u16>,
  pub director: Option<String>,
  pub duration: Option<u32>,
  pub rate:     Option<u8>,
  pub poster:   Option<String>,
  pub genre:    Option<Vec<Genre>>,
}

impl MoviePatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Overwrite the fields of `movie` that this patch provides. The id is
  /// never touched.
  pub fn apply_to(self, movie: &mut Movie) {
    if let Some(title) = self.title {
      movie.title = title;
    }
    if let Some(year) = self.year {
      movie.year = year;
    }
    if let Some(director) = self.director {
      movie.director = director;
    }
    if let Some(duration) = self.duration {
      movie.duration = duration;
    }
    if let Some(rate) = self.rate {
      movie.rate = rate;
    }
    if let Some(poster) = self.poster {
      movie.poster = poster;
    }
    if let Some(genre) = self.genre {
      movie.genre = genre;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Movie {
    NewMovie {
      title:    "Heat".into(),
      year:     1995,
      director: "Michael Mann".into(),
      duration: 170,
      rate:     DEFAULT_RATE,
      poster:   "https://img.example.com/heat.jpg".into(),
      genre:    vec![Genre::Action, Genre::Drama],
    }
    .into_movie(Uuid::new_v4())
  }

  #[test]
  fn genre_wire_names() {
    assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci-fi\"");
    assert_eq!("Sci-fi".parse::<Genre>().unwrap(), Genre::SciFi);
    assert!("sci-fi".parse::<Genre>().is_err());
    assert_eq!(Genre::VARIANTS.len(), 8);
  }

  #[test]
  fn genre_matching_ignores_case() {
    let movie = sample();
    assert!(movie.has_genre("ACTION"));
    assert!(movie.has_genre("drama"));
    assert!(!movie.has_genre("horror"));
    assert!(Genre::SciFi.matches("SCI-FI"));
  }

  #[test]
  fn patch_overwrites_only_provided_fields() {
    let mut movie = sample();
    let before = movie.clone();

    MoviePatch {
      year: Some(1996),
      ..Default::default()
    }
    .apply_to(&mut movie);

    assert_eq!(movie.year, 1996);
    assert_eq!(movie.id, before.id);
    assert_eq!(movie.title, before.title);
    assert_eq!(movie.genre, before.genre);
  }

  #[test]
  fn empty_patch_is_a_no_op() {
    let mut movie = sample();
    let before = movie.clone();
    let patch = MoviePatch::default();
    assert!(patch.is_empty());
    patch.apply_to(&mut movie);
    assert_eq!(movie, before);
  }
}
