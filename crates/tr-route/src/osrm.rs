//! OSRM routing client — enabled with the `osrm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use tr_route::osrm::OsrmClient;
//!
//! let client = OsrmClient::new("https://router.project-osrm.org")?;
//! let provider = RouteProvider::new(client, &config);
//! ```
//!
//! # Request
//!
//! ```text
//! GET {base}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson
//! ```
//!
//! Only the first route's GeoJSON line is used.  OSRM snaps endpoints to the
//! road network, so the returned geometry may start and end a few metres
//! away from the requested coordinates.

use std::time::Duration;

use serde::Deserialize;
use tr_core::GeoPoint;

use crate::{RouteError, RouteResult, RoutingClient};

/// Public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

const DEFAULT_PROFILE: &str = "driving";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for an OSRM `route` service.
pub struct OsrmClient {
    base_url: String,
    profile:  String,
    http:     reqwest::blocking::Client,
}

impl OsrmClient {
    /// Client for the server at `base_url` using the `driving` profile.
    pub fn new(base_url: impl Into<String>) -> RouteResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            profile:  DEFAULT_PROFILE.to_owned(),
            http,
        })
    }

    /// Use a different OSRM profile (`cycling`, `foot`, …).
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// The request URL for `origin` → `dest`.
    pub fn route_url(&self, origin: GeoPoint, dest: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, origin.lon, origin.lat, dest.lon, dest.lat
        )
    }
}

impl RoutingClient for OsrmClient {
    fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
        let url = self.route_url(origin, dest);
        tracing::debug!(%url, "requesting OSRM route");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| RouteError::Malformed(e.to_string()))?;
        parse_route_response(&body)
    }
}

// ── Response decoding ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OsrmResponse {
    code:   String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decode an OSRM `route` response body into waypoints.
///
/// Fails with [`RouteError::Malformed`] on invalid JSON, a non-`Ok` code,
/// or a response without any route geometry.
pub fn parse_route_response(body: &str) -> RouteResult<Vec<GeoPoint>> {
    let parsed: OsrmResponse =
        serde_json::from_str(body).map_err(|e| RouteError::Malformed(e.to_string()))?;

    if parsed.code != "Ok" {
        return Err(RouteError::Malformed(format!("OSRM code {}", parsed.code)));
    }
    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::Malformed("no routes in response".into()))?;

    if route.geometry.coordinates.is_empty() {
        return Err(RouteError::Malformed("empty route geometry".into()));
    }
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| GeoPoint::new(lon, lat))
        .collect())
}
