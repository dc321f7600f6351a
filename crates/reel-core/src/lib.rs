//! Core types and trait definitions for the Reel movie catalogue.
//!
//! This crate is deliberately free of HTTP and storage dependencies.
//! All other crates depend on it.

pub mod error;
pub mod movie;
pub mod store;
pub mod validate;

pub use error::{Issue, ValidationError};
