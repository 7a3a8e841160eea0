//! Routing collaborator trait and an offline straight-line implementation.
//!
//! # Pluggability
//!
//! `RouteProvider` talks to the outside world only through the
//! [`RoutingClient`] trait, so applications can plug in OSRM (the `osrm`
//! feature), a recorded fixture, or a stub that fails on purpose without
//! touching the provider.

use tr_core::GeoPoint;

use crate::{RouteError, RouteResult};

/// External routing service: origin and destination in, ordered geometry
/// out.
///
/// Implementations must be `Send + Sync` so one client can be shared by the
/// route providers of many sessions.
pub trait RoutingClient: Send + Sync {
    /// Fetch the primary road geometry from `origin` to `dest`.
    ///
    /// Implementations report transport, status and decoding failures as
    /// errors; they do not need to validate the geometry themselves.
    fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>>;
}

impl<C: RoutingClient + ?Sized> RoutingClient for &C {
    fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
        (**self).fetch(origin, dest)
    }
}

impl<C: RoutingClient + ?Sized> RoutingClient for Box<C> {
    fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
        (**self).fetch(origin, dest)
    }
}

// ── StraightLineClient ────────────────────────────────────────────────────────

/// Offline client returning `segments + 1` evenly spaced points on the
/// straight line from origin to destination.
///
/// Endpoints are copied exactly rather than interpolated.
pub struct StraightLineClient {
    pub segments: usize,
}

impl StraightLineClient {
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }
}

impl RoutingClient for StraightLineClient {
    fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
        if self.segments == 0 {
            return Err(RouteError::Malformed("zero segments requested".into()));
        }
        let n = self.segments;
        let mut points = Vec::with_capacity(n + 1);
        points.push(origin);
        for i in 1..n {
            points.push(origin.lerp(dest, i as f64 / n as f64));
        }
        points.push(dest);
        Ok(points)
    }
}
