//! `tr-nav` — what to tell the customer while the provider is on the way.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`advisor`] | `Maneuver`, `NavigationAdvisor`, `classify_turn`             |
//! | [`eta`]     | `EtaEstimator` — remaining distance → whole minutes          |
//! | [`error`]   | `NavError`, `NavResult<T>`                                   |
//!
//! Both components are pure functions of `(current_index, waypoints)`; the
//! movement simulator calls them once per tick and never caches results
//! between ticks.

pub mod advisor;
pub mod error;
pub mod eta;

#[cfg(test)]
mod tests;

pub use advisor::{Maneuver, NavigationAdvisor, classify_turn};
pub use error::{NavError, NavResult};
pub use eta::EtaEstimator;
