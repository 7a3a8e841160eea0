//! `Route` and `RouteSet` — the candidate paths offered for one tracking
//! request.

use tr_core::{GeoPoint, RouteId, TrafficLevel, path_length_km};

use crate::{RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// One candidate path from provider to customer.
///
/// `distance_km` is always the haversine length of `waypoints`; it is
/// computed here and never supplied by callers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    /// Ordered waypoints, origin first, destination last.
    pub waypoints: Vec<GeoPoint>,
    pub distance_km: f64,
    pub duration_min: f64,
    pub traffic: TrafficLevel,
}

impl Route {
    /// Build a route, deriving distance from the geometry and duration from
    /// distance, `speed_kmh`, the traffic weighting and `duration_multiplier`.
    pub fn new(
        id:                  RouteId,
        name:                impl Into<String>,
        waypoints:           Vec<GeoPoint>,
        traffic:             TrafficLevel,
        speed_kmh:           f64,
        duration_multiplier: f64,
    ) -> Self {
        let distance_km  = path_length_km(&waypoints);
        let duration_min =
            distance_km / speed_kmh * 60.0 * traffic.duration_factor() * duration_multiplier;
        Self {
            id,
            name: name.into(),
            waypoints,
            distance_km,
            duration_min,
            traffic,
        }
    }

    /// First waypoint.
    ///
    /// # Panics
    /// Panics if the route has no waypoints.
    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.waypoints[0]
    }

    /// Last waypoint.
    ///
    /// # Panics
    /// Panics if the route has no waypoints.
    #[inline]
    pub fn destination(&self) -> GeoPoint {
        self.waypoints[self.waypoints.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// `true` if the route can be driven: at least two waypoints.
    #[inline]
    pub fn is_drivable(&self) -> bool {
        self.waypoints.len() >= 2
    }
}

// ── RouteSet ──────────────────────────────────────────────────────────────────

/// The primary route plus its alternatives, with one marked as selected.
///
/// Invariant: `routes[i].id == RouteId(i)`, `routes[0]` is the primary, and
/// the set is never empty.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSet {
    routes:   Vec<Route>,
    selected: RouteId,
}

impl RouteSet {
    /// Assemble a set from the primary and its alternatives.  The primary is
    /// selected.
    ///
    /// Returns [`RouteError::NoRoutes`] if the primary is not drivable.
    pub fn new(primary: Route, alternatives: Vec<Route>) -> RouteResult<Self> {
        if !primary.is_drivable() {
            return Err(RouteError::NoRoutes);
        }
        let mut routes = Vec::with_capacity(1 + alternatives.len());
        routes.push(primary);
        routes.extend(alternatives);
        for (i, route) in routes.iter_mut().enumerate() {
            route.id = RouteId(i as u32);
        }
        Ok(Self { routes, selected: RouteId(0) })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn primary(&self) -> &Route {
        &self.routes[0]
    }

    pub fn selected_id(&self) -> RouteId {
        self.selected
    }

    pub fn selected(&self) -> &Route {
        &self.routes[self.selected.index()]
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.index())
    }

    /// Mark `id` as the selected route.
    pub fn select(&mut self, id: RouteId) -> RouteResult<&Route> {
        if id.index() >= self.routes.len() {
            return Err(RouteError::UnknownRoute(id));
        }
        self.selected = id;
        Ok(&self.routes[id.index()])
    }

    /// Alternatives only (everything except the primary).
    pub fn alternatives(&self) -> &[Route] {
        &self.routes[1..]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
