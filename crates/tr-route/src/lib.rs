//! `tr-route` — candidate routes for a tracking request.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`route`]    | `Route`, `RouteSet`                                          |
//! | [`router`]   | `RoutingClient` trait, `StraightLineClient`                  |
//! | [`provider`] | `RouteProvider`: fetch, fallback, alternative synthesis      |
//! | [`osrm`]     | `OsrmClient` (feature = `"osrm"` only)                       |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                               |
//!
//! # Degradation
//!
//! The routing collaborator is the only I/O in the engine and the only place
//! failure is absorbed: an unreachable service, an HTTP error or unusable
//! geometry all produce the two-point `[origin, dest]` route with traffic
//! `unknown`.  Only non-finite endpoints make route-set construction fail.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osrm`  | Enables the blocking OSRM client via `reqwest`.              |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod provider;
pub mod route;
pub mod router;

#[cfg(feature = "osrm")]
pub mod osrm;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use provider::{MAX_ROUTES, RouteProvider};
pub use route::{Route, RouteSet};
pub use router::{RoutingClient, StraightLineClient};
