//! `tr-core` — foundational types for the `rust_track` provider-tracking
//! engine.
//!
//! This crate is a dependency of every other `tr-*` crate.  It has no `tr-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`geo`]         | `GeoPoint`, haversine distance, bearing, path length     |
//! | [`ids`]         | `RouteId`, `SessionId`                                   |
//! | [`time`]        | `SimTime` virtual milliseconds                           |
//! | [`traffic`]     | `TrafficLevel`                                           |
//! | [`config`]      | `TrackingConfig`                                         |
//! | [`rng`]         | `SessionRng` (per-session), `SimRng` (route shaping)     |
//! | [`error`]       | `TrackError`, `TrackResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod traffic;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TrackingConfig;
pub use error::{TrackError, TrackResult};
pub use geo::{GeoPoint, bearing_deg, distance_km, normalize_delta_deg, path_length_km};
pub use ids::{RouteId, SessionId};
pub use rng::{SessionRng, SimRng};
pub use time::SimTime;
pub use traffic::TrafficLevel;
