//! Error types for `reel-core`.

use serde::Serialize;
use thiserror::Error;

/// Field name used for issues that concern the payload as a whole.
pub const ROOT_FIELD: &str = "$root";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
  pub field:   String,
  pub message: String,
}

impl Issue {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field:   field.into(),
      message: message.into(),
    }
  }
}

/// Every constraint a candidate movie violated, collected in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid movie: {}", describe(.issues))]
pub struct ValidationError {
  pub issues: Vec<Issue>,
}

impl ValidationError {
  /// A validation error carrying a single issue against the whole payload.
  pub fn root(message: impl Into<String>) -> Self {
    Self {
      issues: vec![Issue::new(ROOT_FIELD, message)],
    }
  }

  /// The first issue reported against `field`, if any.
  pub fn issue_for(&self, field: &str) -> Option<&Issue> {
    self.issues.iter().find(|i| i.field == field)
  }
}

fn describe(issues: &[Issue]) -> String {
  issues
    .iter()
    .map(|i| format!("{}: {}", i.field, i.message))
    .collect::<Vec<_>>()
    .join("; ")
}
