//! `TrackingSession` and its builder.
//!
//! A session is one tracking request: a route set fetched once at build
//! time and the simulator that drives the selected route.  The builder does
//! all fallible work up front, so a `TrackingSession` value always has a
//! usable route set.

use tracing::info;

use tr_core::{GeoPoint, RouteId, SessionId, SessionRng, SimTime, TrackingConfig};
use tr_route::{RouteProvider, RouteSet, RoutingClient};

use crate::{
    MovementSimulator, SimError, SimResult, SimulationState, Ticker, TrackingObserver,
};

pub struct TrackingSession {
    id:     SessionId,
    routes: RouteSet,
    sim:    MovementSimulator,
}

impl TrackingSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    pub fn state(&self) -> &SimulationState {
        self.sim.state()
    }

    pub fn simulator(&self) -> &MovementSimulator {
        &self.sim
    }

    /// Publish the route set and begin driving the selected route at `now`.
    pub fn start<O: TrackingObserver + ?Sized>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        observer.on_routes(&self.routes);
        self.sim.start(self.routes.selected(), now)
    }

    /// Switch to route `id` and restart the simulation on it at `now`.
    ///
    /// Fails with [`SimError::Route`] if `id` is not part of the set; the
    /// current run is left untouched in that case.
    pub fn select_route<O: TrackingObserver + ?Sized>(
        &mut self,
        id:       RouteId,
        now:      SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        self.routes.select(id)?;
        observer.on_routes(&self.routes);
        self.sim.select_route(self.routes.selected(), now)
    }

    pub fn cancel(&mut self) -> bool {
        self.sim.cancel()
    }

    pub fn advance_to<O: TrackingObserver + ?Sized>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> usize {
        self.sim.advance_to(now, observer)
    }

    pub fn run<T, O>(&mut self, ticker: &mut T, observer: &mut O) -> usize
    where
        T: Ticker + ?Sized,
        O: TrackingObserver + ?Sized,
    {
        self.sim.run(ticker, observer)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for a [`TrackingSession`].
///
/// # Example
///
/// ```rust,ignore
/// let mut session = TrackingSessionBuilder::new(config, StraightLineClient::new(8))
///     .origin(GeoPoint::new(120.9842, 14.5995))
///     .destination(GeoPoint::new(121.0223, 14.6091))
///     .session_id(SessionId(7))
///     .build()?;
///
/// let mut ticker = ManualTicker::new();
/// session.start(ticker.now(), &mut NoopObserver)?;
/// session.run(&mut ticker, &mut NoopObserver);
/// ```
pub struct TrackingSessionBuilder<C: RoutingClient> {
    config:      TrackingConfig,
    client:      C,
    origin:      Option<GeoPoint>,
    destination: Option<GeoPoint>,
    session_id:  SessionId,
}

impl<C: RoutingClient> TrackingSessionBuilder<C> {
    pub fn new(config: TrackingConfig, client: C) -> Self {
        Self {
            config,
            client,
            origin:      None,
            destination: None,
            session_id:  SessionId(0),
        }
    }

    /// The provider's position.
    pub fn origin(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The customer's position.
    pub fn destination(mut self, destination: GeoPoint) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Mixed with the config seed to give the session its own RNG stream.
    pub fn session_id(mut self, id: SessionId) -> Self {
        self.session_id = id;
        self
    }

    /// Validate the config, fetch the route set, and assemble the session.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if the configuration is invalid.
    /// - [`SimError::MissingEndpoint`] if origin or destination is unset.
    /// - [`SimError::Route`] if no route set can be produced (non-finite
    ///   coordinates).  Collaborator failures do not error; they degrade to
    ///   the straight-line fallback.
    pub fn build(self) -> SimResult<TrackingSession> {
        self.config.validate()?;
        let origin = self.origin.ok_or(SimError::MissingEndpoint("origin"))?;
        let destination = self.destination.ok_or(SimError::MissingEndpoint("destination"))?;

        let mut provider = RouteProvider::new(self.client, &self.config);
        let routes = provider.build_route_set(origin, destination)?;

        let rng = SessionRng::new(self.config.seed, self.session_id);
        let sim = MovementSimulator::new(self.config, rng)?;

        info!(
            session = %self.session_id,
            routes = routes.len(),
            primary_waypoints = routes.primary().len(),
            traffic = %routes.primary().traffic,
            "tracking session built"
        );
        Ok(TrackingSession { id: self.session_id, routes, sim })
    }
}
