//! Core error type.
//!
//! Sub-crates define their own error enums (`RouteError`, `SimError`, …) and
//! wrap `TrackError` where a core failure can surface through them.

use thiserror::Error;

/// Errors produced by `tr-core`.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tr-core`.
pub type TrackResult<T> = Result<T, TrackError>;
