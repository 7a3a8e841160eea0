//! `RouteProvider` — primary route fetch, fallback, and alternative routes.
//!
//! # Alternatives
//!
//! Alternatives are cosmetic: they give the map something to draw next to
//! the primary, not a second shortest path.  Each one bows the middle 60 % of
//! the primary sideways along a half sine wave:
//!
//! ```text
//!   t = i / (n - 1)                       (position along the waypoint list)
//!   w = sin(π · (t − 0.2) / 0.6)          for 0.2 < t < 0.8, else 0
//!   p'ᵢ = pᵢ + n̂ · deviation · |dest − origin| · jitter · side · w
//! ```
//!
//! `n̂` is the unit normal of the origin→destination vector in lon/lat
//! space, `side` alternates ±1, and `jitter ∈ [0.85, 1.15]` comes from the
//! provider's seeded [`SimRng`].  The first and last waypoints are copied,
//! so every alternative starts and ends exactly where the primary does.

use std::f64::consts::PI;

use tr_core::{GeoPoint, RouteId, SimRng, TrackingConfig, TrafficLevel};
use tracing::{debug, info, warn};

use crate::{Route, RouteError, RouteResult, RouteSet, RoutingClient};

/// Upper bound on routes per set, primary included.
pub const MAX_ROUTES: usize = 1 + ALTERNATIVE_PROFILES.len();

/// Alternatives are shaped from at least this many points; sparser
/// geometries are subdivided first.
const MIN_SHAPED_WAYPOINTS: usize = 5;

const PRIMARY_NAME: &str = "Recommended route";

struct AlternativeProfile {
    name:                &'static str,
    traffic:             TrafficLevel,
    deviation:           f64,
    duration_multiplier: f64,
}

const ALTERNATIVE_PROFILES: [AlternativeProfile; 2] = [
    AlternativeProfile {
        name:                "Fast route",
        traffic:             TrafficLevel::Light,
        deviation:           0.12,
        duration_multiplier: 0.9,
    },
    AlternativeProfile {
        name:                "Short route",
        traffic:             TrafficLevel::Heavy,
        deviation:           0.05,
        duration_multiplier: 1.1,
    },
];

/// Builds the route set for a tracking request.
///
/// Generic over the routing collaborator so tests can inject failing or
/// canned clients.
pub struct RouteProvider<C: RoutingClient> {
    client:            C,
    speed_kmh:         f64,
    fetch_attempts:    u32,
    alternative_count: usize,
    rng:               SimRng,
}

impl<C: RoutingClient> RouteProvider<C> {
    /// Create a provider using the speed, attempt count, route count and
    /// seed from `config`.
    pub fn new(client: C, config: &TrackingConfig) -> Self {
        Self {
            client,
            speed_kmh:         config.assumed_speed_kmh,
            fetch_attempts:    config.fetch_attempts.max(1),
            alternative_count: config.alternative_count,
            rng:               SimRng::new(config.seed),
        }
    }

    /// Replace the route-shaping RNG.
    pub fn with_rng(mut self, rng: SimRng) -> Self {
        self.rng = rng;
        self
    }

    /// Fetch the primary route, degrading to `[origin, dest]` with
    /// [`TrafficLevel::Unknown`] if every attempt fails or returns unusable
    /// geometry.  Never fails.
    pub fn fetch_primary_route(&self, origin: GeoPoint, dest: GeoPoint) -> Route {
        for attempt in 1..=self.fetch_attempts {
            let result = self
                .client
                .fetch(origin, dest)
                .and_then(validate_geometry);
            match result {
                Ok(waypoints) => {
                    debug!(attempt, waypoints = waypoints.len(), "primary route fetched");
                    return Route::new(
                        RouteId(0),
                        PRIMARY_NAME,
                        waypoints,
                        TrafficLevel::Moderate,
                        self.speed_kmh,
                        1.0,
                    );
                }
                Err(e) => {
                    warn!(attempt, max = self.fetch_attempts, error = %e, "routing fetch failed");
                }
            }
        }

        warn!(%origin, %dest, "routing unavailable, using straight-line fallback");
        Route::new(
            RouteId(0),
            PRIMARY_NAME,
            vec![origin, dest],
            TrafficLevel::Unknown,
            self.speed_kmh,
            1.0,
        )
    }

    /// Synthesize `count - 1` alternatives to `primary` (`count` is clamped
    /// to `1..=MAX_ROUTES`).
    ///
    /// Alternatives are numbered from `RouteId(1)` in profile order.
    pub fn derive_alternatives(&mut self, primary: &Route, count: usize) -> Vec<Route> {
        let count = count.clamp(1, MAX_ROUTES);
        if primary.is_empty() {
            return Vec::new();
        }
        let source = densify(&primary.waypoints, MIN_SHAPED_WAYPOINTS);

        ALTERNATIVE_PROFILES
            .iter()
            .take(count - 1)
            .enumerate()
            .map(|(k, profile)| {
                let side   = if k % 2 == 0 { 1.0 } else { -1.0 };
                let jitter: f64 = self.rng.gen_range(0.85..=1.15);
                let waypoints = bow(&source, profile.deviation * jitter * side);
                Route::new(
                    RouteId(k as u32 + 1),
                    profile.name,
                    waypoints,
                    profile.traffic,
                    self.speed_kmh,
                    profile.duration_multiplier,
                )
            })
            .collect()
    }

    /// Produce the full route set for a request: primary (or fallback) plus
    /// alternatives.  A fallback primary gets no alternatives.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidCoordinate`] if either endpoint is not finite;
    /// no route set can be built in that case.
    pub fn build_route_set(&mut self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<RouteSet> {
        for p in [origin, dest] {
            if !p.is_finite() {
                return Err(RouteError::InvalidCoordinate(p));
            }
        }

        let primary = self.fetch_primary_route(origin, dest);
        let alternatives = if primary.traffic == TrafficLevel::Unknown {
            Vec::new()
        } else {
            self.derive_alternatives(&primary, self.alternative_count)
        };

        let set = RouteSet::new(primary, alternatives)?;
        info!(
            routes      = set.len(),
            distance_km = set.primary().distance_km,
            traffic     = %set.primary().traffic,
            "route set built"
        );
        Ok(set)
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Reject geometry the simulator cannot drive.
fn validate_geometry(points: Vec<GeoPoint>) -> RouteResult<Vec<GeoPoint>> {
    if points.len() < 2 {
        return Err(RouteError::Malformed(format!(
            "expected at least 2 waypoints, got {}",
            points.len()
        )));
    }
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(RouteError::Malformed(format!("non-finite waypoint {bad}")));
    }
    Ok(points)
}

/// Insert segment midpoints until there are at least `min_len` points.
/// Existing points, endpoints included, are kept bit-for-bit.
pub(crate) fn densify(points: &[GeoPoint], min_len: usize) -> Vec<GeoPoint> {
    let mut out = points.to_vec();
    while out.len() >= 2 && out.len() < min_len {
        let mut next = Vec::with_capacity(out.len() * 2 - 1);
        for w in out.windows(2) {
            next.push(w[0]);
            next.push(w[0].lerp(w[1], 0.5));
        }
        next.push(out[out.len() - 1]);
        out = next;
    }
    out
}

/// Displace the middle 60 % of `points` along the normal of the chord.
/// `amplitude` is a fraction of the chord length; its sign picks the side.
pub(crate) fn bow(points: &[GeoPoint], amplitude: f64) -> Vec<GeoPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let origin = points[0];
    let dest   = points[n - 1];
    let dx     = dest.lon - origin.lon;
    let dy     = dest.lat - origin.lat;
    if dx == 0.0 && dy == 0.0 {
        return points.to_vec();
    }
    // (-dy, dx) is the chord's normal with the chord's own length.
    let offset_lon = -dy * amplitude;
    let offset_lat =  dx * amplitude;

    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let t = i as f64 / (n - 1) as f64;
            if t <= 0.2 || t >= 0.8 {
                return p;
            }
            let w = (PI * (t - 0.2) / 0.6).sin();
            GeoPoint::new(p.lon + offset_lon * w, p.lat + offset_lat * w)
        })
        .collect()
}
