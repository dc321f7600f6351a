//! Field rules for movie payloads.
//!
//! Both modes walk the same [`MOVIE_RULES`] table over an untyped JSON object:
//!
//! - [`validate_movie`] (full) reports every missing required field and fills
//!   in `rate` with [`DEFAULT_RATE`].
//! - [`validate_partial_movie`] (partial) only checks the fields present.
//!
//! Unknown keys (including a client-supplied `id`) are ignored. A `null`
//! value is a type error, not an absent field. All issues are collected
//! before returning.

use std::{ops::RangeInclusive, str::FromStr};

use serde_json::{Map, Value};
use strum::VariantNames;
use url::Url;

use crate::{
  error::{Issue, ValidationError},
  movie::{DEFAULT_RATE, Genre, MoviePatch, NewMovie},
};

// ─── Rule table ──────────────────────────────────────────────────────────────

/// What happens when a field is absent in full mode.
#[derive(Debug, Clone, Copy)]
enum Presence {
  Required(&'static str),
  Optional,
}

/// The constraint applied to a present field.
#[derive(Debug, Clone)]
enum Check {
  Text {
    invalid_type: &'static str,
  },
  Url {
    invalid_type: &'static str,
    invalid_url:  &'static str,
  },
  Integer {
    invalid_type: &'static str,
    range:        RangeInclusive<i64>,
    too_small:    &'static str,
    too_big:      &'static str,
  },
  Genres {
    invalid_type: &'static str,
    empty:        &'static str,
  },
}

/// A value that passed its [`Check`].
#[derive(Debug)]
enum Checked {
  Text(String),
  Integer(i64),
  Genres(Vec<Genre>),
}

struct FieldRule {
  field:    &'static str,
  presence: Presence,
  check:    Check,
  assign:   fn(&mut MoviePatch, Checked),
}

const MOVIE_RULES: &[FieldRule] = &[
  FieldRule {
    field:    "title",
    presence: Presence::Required("Title is required"),
    check:    Check::Text {
      invalid_type: "Movie title must be a string",
    },
    assign:   |p, v| p.title = v.into_text(),
  },
  FieldRule {
    field:    "year",
    presence: Presence::Required("Year is required"),
    check:    Check::Integer {
      invalid_type: "Year must be an integer",
      range:        1900..=2024,
      too_small:    "Year must be between 1900 and 2024",
      too_big:      "Year must be between 1900 and 2024",
    },
    assign:   |p, v| p.year = v.into_integer(),
  },
  FieldRule {
    field:    "director",
    presence: Presence::Required("director is required"),
    check:    Check::Text {
      invalid_type: "Movie director must be a string",
    },
    assign:   |p, v| p.director = v.into_text(),
  },
  FieldRule {
    field:    "duration",
    presence: Presence::Required("Duration is required"),
    check:    Check::Integer {
      invalid_type: "Duration must be an integer",
      range:        1..=u32::MAX as i64,
      too_small:    "Duration must be a positive number",
      too_big:      "Duration is too large",
    },
    assign:   |p, v| p.duration = v.into_integer(),
  },
  FieldRule {
    field:    "rate",
    presence: Presence::Optional,
    check:    Check::Integer {
      invalid_type: "Rate must be an integer",
      range:        0..=10,
      too_small:    "Rate must be between 0 and 10",
      too_big:      "Rate must be between 0 and 10",
    },
    assign:   |p, v| p.rate = v.into_integer(),
  },
  FieldRule {
    field:    "poster",
    presence: Presence::Required("Poster is required"),
    check:    Check::Url {
      invalid_type: "Poster must be a string",
      invalid_url:  "Poster must be a valid URL",
    },
    assign:   |p, v| p.poster = v.into_text(),
  },
  FieldRule {
    field:    "genre",
    presence: Presence::Required("Movie genre required"),
    check:    Check::Genres {
      invalid_type: "Movie genre must be an array of enum Genre",
      empty:        "Movie genre must not be empty",
    },
    assign:   |p, v| p.genre = v.into_genres(),
  },
];

impl Checked {
  fn into_text(self) -> Option<String> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }

  /// Narrow to the field's storage type. The rule's range guarantees the
  /// conversion succeeds.
  fn into_integer<T: TryFrom<i64>>(self) -> Option<T> {
    match self {
      Self::Integer(n) => T::try_from(n).ok(),
      _ => None,
    }
  }

  fn into_genres(self) -> Option<Vec<Genre>> {
    match self {
      Self::Genres(g) => Some(g),
      _ => None,
    }
  }
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Validate a complete movie payload.
pub fn validate_movie(input: &Value) -> Result<NewMovie, ValidationError> {
  let patch = run(input, Mode::Full)?;
  match patch {
    MoviePatch {
      title: Some(title),
      year: Some(year),
      director: Some(director),
      duration: Some(duration),
      rate,
      poster: Some(poster),
      genre: Some(genre),
    } => Ok(NewMovie {
      title,
      year,
      director,
      duration,
      rate: rate.unwrap_or(DEFAULT_RATE),
      poster,
      genre,
    }),
    // Full mode reports every absent required field, so this is unreachable
    // unless the rule table and `NewMovie` drift apart.
    _ => Err(ValidationError::root("Movie is incomplete")),
  }
}

/// Validate a partial movie payload: every field is optional.
pub fn validate_partial_movie(
  input: &Value,
) -> Result<MoviePatch, ValidationError> {
  run(input, Mode::Partial)
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
  Full,
  Partial,
}

fn run(input: &Value, mode: Mode) -> Result<MoviePatch, ValidationError> {
  let object = as_object(input)?;
  let mut patch = MoviePatch::default();
  let mut issues = Vec::new();

  for rule in MOVIE_RULES {
    match object.get(rule.field) {
      None => {
        if let (Mode::Full, Presence::Required(message)) = (mode, rule.presence)
        {
          issues.push(Issue::new(rule.field, message));
        }
      }
      Some(value) => match rule.check.apply(rule.field, value) {
        Ok(checked) => (rule.assign)(&mut patch, checked),
        Err(mut found) => issues.append(&mut found),
      },
    }
  }

  if issues.is_empty() {
    Ok(patch)
  } else {
    Err(ValidationError { issues })
  }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationError> {
  input.as_object().ok_or_else(|| {
    ValidationError::root(format!(
      "Expected object, received {}",
      json_type_name(input)
    ))
  })
}

impl Check {
  fn apply(&self, field: &str, value: &Value) -> Result<Checked, Vec<Issue>> {
    let fail = |message: &'static str| vec![Issue::new(field, message)];

    match self {
      Check::Text { invalid_type } => value
        .as_str()
        .map(|s| Checked::Text(s.to_owned()))
        .ok_or_else(|| fail(*invalid_type)),

      Check::Url {
        invalid_type,
        invalid_url,
      } => {
        let s = value.as_str().ok_or_else(|| fail(*invalid_type))?;
        Url::parse(s).map_err(|_| fail(*invalid_url))?;
        Ok(Checked::Text(s.to_owned()))
      }

      Check::Integer {
        invalid_type,
        range,
        too_small,
        too_big,
      } => {
        let n = as_integer(value).ok_or_else(|| fail(*invalid_type))?;
        if n < *range.start() {
          Err(fail(*too_small))
        } else if n > *range.end() {
          Err(fail(*too_big))
        } else {
          Ok(Checked::Integer(n))
        }
      }

      Check::Genres {
        invalid_type,
        empty,
      } => {
        let items = value.as_array().ok_or_else(|| fail(*invalid_type))?;
        if items.is_empty() {
          return Err(fail(*empty));
        }

        let mut genres = Vec::with_capacity(items.len());
        let mut issues = Vec::new();
        for (index, item) in items.iter().enumerate() {
          match item.as_str().and_then(|s| Genre::from_str(s).ok()) {
            Some(genre) => genres.push(genre),
            None => issues.push(Issue::new(
              field,
              format!(
                "Invalid genre {} at index {index}, expected one of {}",
                describe(item),
                Genre::VARIANTS.join(", ")
              ),
            )),
          }
        }

        if issues.is_empty() {
          Ok(Checked::Genres(genres))
        } else {
          Err(issues)
        }
      }
    }
  }
}

/// Accept JSON integers and floats without a fractional part.
fn as_integer(value: &Value) -> Option<i64> {
  value.as_i64().or_else(|| {
    value
      .as_f64()
      .filter(|f| f.is_finite() && f.fract() == 0.0)
      .map(|f| f as i64)
  })
}

fn describe(value: &Value) -> String {
  match value {
    Value::String(s) => format!("'{s}'"),
    other => other.to_string(),
  }
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
