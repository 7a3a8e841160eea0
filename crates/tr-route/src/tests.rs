//! Unit tests for tr-route.
//!
//! All tests use in-process routing clients so they run without a network.

#[cfg(test)]
mod helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tr_core::{GeoPoint, TrackingConfig};

    use crate::{RouteError, RouteResult, RoutingClient};

    pub const ORIGIN: GeoPoint = GeoPoint { lon: 120.9842, lat: 14.5995 };
    pub const DEST:   GeoPoint = GeoPoint { lon: 121.0223, lat: 14.6091 };

    /// Always unreachable; counts how often it was asked.
    #[derive(Default)]
    pub struct DownClient {
        pub calls: AtomicUsize,
    }

    impl RoutingClient for DownClient {
        fn fetch(&self, _: GeoPoint, _: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RouteError::Unreachable("connection refused".into()))
        }
    }

    /// Returns a fixed geometry regardless of the request.
    pub struct CannedClient(pub Vec<GeoPoint>);

    impl RoutingClient for CannedClient {
        fn fetch(&self, _: GeoPoint, _: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
            Ok(self.0.clone())
        }
    }

    /// Fails with HTTP 503 on the first call, then draws a straight line.
    #[derive(Default)]
    pub struct FlakyClient {
        pub calls: AtomicUsize,
    }

    impl RoutingClient for FlakyClient {
        fn fetch(&self, origin: GeoPoint, dest: GeoPoint) -> RouteResult<Vec<GeoPoint>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(RouteError::Status(503));
            }
            crate::StraightLineClient::new(8).fetch(origin, dest)
        }
    }

    pub fn config() -> TrackingConfig {
        TrackingConfig::default()
    }

    pub fn assert_distance_invariant(route: &crate::Route) {
        let summed: f64 = route
            .waypoints
            .windows(2)
            .map(|w| tr_core::distance_km(w[0], w[1]))
            .sum();
        assert!(
            (summed - route.distance_km).abs() < 1e-6,
            "{}: summed {summed} vs recorded {}",
            route.name,
            route.distance_km
        );
    }
}

// ── Straight-line client ──────────────────────────────────────────────────────

#[cfg(test)]
mod straight_line {
    use super::helpers::{DEST, ORIGIN};
    use crate::{RoutingClient, StraightLineClient};

    #[test]
    fn evenly_spaced_points() {
        let pts = StraightLineClient::new(4).fetch(ORIGIN, DEST).unwrap();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], ORIGIN);
        assert_eq!(pts[4], DEST);
        let d01 = pts[0].distance_km(pts[1]);
        let d34 = pts[3].distance_km(pts[4]);
        assert!((d01 - d34).abs() < 1e-3, "{d01} vs {d34}");
    }

    #[test]
    fn zero_segments_is_malformed() {
        let err = StraightLineClient::new(0).fetch(ORIGIN, DEST).unwrap_err();
        assert!(err.is_collaborator_failure());
    }
}

// ── Primary route and fallback ────────────────────────────────────────────────

#[cfg(test)]
mod primary {
    use std::sync::atomic::Ordering;

    use tr_core::{GeoPoint, RouteId, TrafficLevel};

    use super::helpers::*;
    use crate::{RouteProvider, StraightLineClient};

    #[test]
    fn fetched_route_is_moderate() {
        let provider = RouteProvider::new(StraightLineClient::new(4), &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(route.id, RouteId(0));
        assert_eq!(route.len(), 5);
        assert_eq!(route.traffic, TrafficLevel::Moderate);
        assert_distance_invariant(&route);
    }

    #[test]
    fn duration_uses_assumed_speed() {
        let provider = RouteProvider::new(StraightLineClient::new(4), &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        let expected = route.distance_km / 30.0 * 60.0;
        assert!((route.duration_min - expected).abs() < 1e-9);
    }

    #[test]
    fn unreachable_falls_back_to_two_points() {
        let provider = RouteProvider::new(DownClient::default(), &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(route.waypoints, vec![ORIGIN, DEST]);
        assert_eq!(route.traffic, TrafficLevel::Unknown);
        assert_distance_invariant(&route);
    }

    #[test]
    fn every_attempt_is_used_before_fallback() {
        let client = DownClient::default();
        let cfg = tr_core::TrackingConfig { fetch_attempts: 3, ..config() };
        let provider = RouteProvider::new(&client, &cfg);
        provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn retry_recovers_from_transient_error() {
        let client = FlakyClient::default();
        let provider = RouteProvider::new(&client, &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(route.traffic, TrafficLevel::Moderate);
        assert_eq!(route.len(), 9);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn single_point_geometry_is_malformed() {
        let provider = RouteProvider::new(CannedClient(vec![ORIGIN]), &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(route.len(), 2);
        assert_eq!(route.traffic, TrafficLevel::Unknown);
    }

    #[test]
    fn non_finite_geometry_is_malformed() {
        let bad = vec![ORIGIN, GeoPoint::new(f64::NAN, 14.6), DEST];
        let provider = RouteProvider::new(CannedClient(bad), &config());
        let route = provider.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(route.waypoints, vec![ORIGIN, DEST]);
    }
}

// ── Alternatives ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod alternatives {
    use tr_core::{GeoPoint, RouteId, TrafficLevel};

    use super::helpers::*;
    use crate::provider::{bow, densify};
    use crate::{MAX_ROUTES, RouteProvider, StraightLineClient};

    fn provider(segments: usize) -> RouteProvider<StraightLineClient> {
        RouteProvider::new(StraightLineClient::new(segments), &config())
    }

    #[test]
    fn endpoints_match_primary_exactly() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        for alt in p.derive_alternatives(&primary, 3) {
            assert_eq!(alt.origin(), primary.origin());
            assert_eq!(alt.destination(), primary.destination());
        }
    }

    #[test]
    fn count_minus_one_alternatives() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(p.derive_alternatives(&primary, 1).len(), 0);
        assert_eq!(p.derive_alternatives(&primary, 2).len(), 1);
        assert_eq!(p.derive_alternatives(&primary, 3).len(), 2);
        // Clamped to the number of profiles.
        assert_eq!(p.derive_alternatives(&primary, 10).len(), MAX_ROUTES - 1);
        assert_eq!(p.derive_alternatives(&primary, 0).len(), 0);
    }

    #[test]
    fn distinct_traffic_levels_and_ids() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        let alts = p.derive_alternatives(&primary, 3);
        assert_eq!(alts[0].id, RouteId(1));
        assert_eq!(alts[1].id, RouteId(2));
        assert_eq!(alts[0].traffic, TrafficLevel::Light);
        assert_eq!(alts[1].traffic, TrafficLevel::Heavy);
        assert_ne!(alts[0].traffic, primary.traffic);
        assert_ne!(alts[1].traffic, primary.traffic);
    }

    #[test]
    fn distance_invariant_holds() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        for alt in p.derive_alternatives(&primary, 3) {
            assert_distance_invariant(&alt);
            assert!(alt.distance_km > primary.distance_km, "{} should detour", alt.name);
        }
    }

    #[test]
    fn fast_alternative_beats_short_on_duration() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        let alts = p.derive_alternatives(&primary, 3);
        assert!(alts[0].duration_min < alts[1].duration_min);
        assert!(alts[1].distance_km < alts[0].distance_km);
    }

    #[test]
    fn alternatives_bow_to_opposite_sides() {
        let mut p = provider(10);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        let alts = p.derive_alternatives(&primary, 3);
        let mid = 5;
        // Chord runs east-north-east; its left normal points north-west, so
        // the side shows in the latitude offset.
        let d0 = alts[0].waypoints[mid].lat - primary.waypoints[mid].lat;
        let d1 = alts[1].waypoints[mid].lat - primary.waypoints[mid].lat;
        assert!(d0 * d1 < 0.0, "expected opposite sides: {d0} vs {d1}");
    }

    #[test]
    fn outer_fifths_untouched() {
        let pts: Vec<GeoPoint> = (0..=10)
            .map(|i| ORIGIN.lerp(DEST, i as f64 / 10.0))
            .collect();
        let bowed = bow(&pts, 0.1);
        for i in [0, 1, 2, 8, 9, 10] {
            assert_eq!(bowed[i], pts[i], "waypoint {i} moved");
        }
        for i in 3..=7 {
            assert_ne!(bowed[i], pts[i], "waypoint {i} not displaced");
        }
    }

    #[test]
    fn degenerate_chord_is_left_alone() {
        let pts = vec![ORIGIN, ORIGIN.lerp(DEST, 0.5), ORIGIN];
        assert_eq!(bow(&pts, 0.1), pts);
    }

    #[test]
    fn densify_preserves_endpoints() {
        let dense = densify(&[ORIGIN, DEST], 5);
        assert_eq!(dense.len(), 5);
        assert_eq!(dense[0], ORIGIN);
        assert_eq!(dense[4], DEST);
        // Already dense enough: untouched.
        let seven: Vec<GeoPoint> = (0..7).map(|i| ORIGIN.lerp(DEST, i as f64 / 6.0)).collect();
        assert_eq!(densify(&seven, 5), seven);
    }

    #[test]
    fn sparse_primary_still_gets_shaped_alternatives() {
        let mut p = provider(1);
        let primary = p.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(primary.len(), 2);
        let alts = p.derive_alternatives(&primary, 3);
        assert_eq!(alts.len(), 2);
        for alt in &alts {
            assert!(alt.len() >= 5);
            assert_eq!(alt.origin(), ORIGIN);
            assert_eq!(alt.destination(), DEST);
        }
    }

    #[test]
    fn same_seed_same_shapes() {
        let mut a = provider(10);
        let mut b = provider(10);
        let primary = a.fetch_primary_route(ORIGIN, DEST);
        assert_eq!(a.derive_alternatives(&primary, 3), b.derive_alternatives(&primary, 3));
    }
}

// ── Route sets ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_set {
    use tr_core::{GeoPoint, RouteId, TrafficLevel};

    use super::helpers::*;
    use crate::{RouteError, RouteProvider, StraightLineClient};

    #[test]
    fn full_set_for_reachable_service() {
        let mut p = RouteProvider::new(StraightLineClient::new(4), &config());
        let set = p.build_route_set(ORIGIN, DEST).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.selected_id(), RouteId(0));
        assert_eq!(set.primary().len(), 5);
        for (i, route) in set.routes().iter().enumerate() {
            assert_eq!(route.id, RouteId(i as u32));
            assert_distance_invariant(route);
        }
    }

    #[test]
    fn fallback_set_has_single_two_point_route() {
        let mut p = RouteProvider::new(DownClient::default(), &config());
        let set = p.build_route_set(ORIGIN, DEST).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.primary().len(), 2);
        assert_eq!(set.primary().traffic, TrafficLevel::Unknown);
        assert_eq!(set.primary().traffic.as_str(), "unknown");
        assert!(set.alternatives().is_empty());
    }

    #[test]
    fn non_finite_endpoint_is_fatal() {
        let mut p = RouteProvider::new(StraightLineClient::new(4), &config());
        let err = p.build_route_set(GeoPoint::new(f64::NAN, 0.0), DEST).unwrap_err();
        assert!(matches!(err, RouteError::InvalidCoordinate(_)));
        assert!(!err.is_collaborator_failure());
    }

    #[test]
    fn select_switches_and_rejects_unknown_ids() {
        let mut p = RouteProvider::new(StraightLineClient::new(4), &config());
        let mut set = p.build_route_set(ORIGIN, DEST).unwrap();
        let name = set.select(RouteId(2)).unwrap().name.clone();
        assert_eq!(set.selected().name, name);
        assert_eq!(set.selected_id(), RouteId(2));

        let err = set.select(RouteId(9)).unwrap_err();
        assert!(matches!(err, RouteError::UnknownRoute(RouteId(9))));
        assert_eq!(set.selected_id(), RouteId(2));
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use tr_core::{GeoPoint, TrackingConfig};

    use super::helpers::assert_distance_invariant;
    use crate::{RouteProvider, StraightLineClient};

    fn city_point() -> impl Strategy<Value = GeoPoint> {
        (120.9f64..121.1, 14.5f64..14.7).prop_map(|(lon, lat)| GeoPoint::new(lon, lat))
    }

    proptest! {
        #[test]
        fn every_route_keeps_invariants(
            origin in city_point(),
            dest in city_point(),
            segments in 1usize..40,
            seed in any::<u64>(),
        ) {
            let cfg = TrackingConfig { seed, ..TrackingConfig::default() };
            let mut p = RouteProvider::new(StraightLineClient::new(segments), &cfg);
            let set = p.build_route_set(origin, dest).unwrap();
            let primary = set.primary();
            for route in set.routes() {
                assert_distance_invariant(route);
                prop_assert!(route.len() >= 2);
                prop_assert_eq!(route.origin(), primary.origin());
                prop_assert_eq!(route.destination(), primary.destination());
            }
        }
    }
}

// ── OSRM decoding ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osrm"))]
mod osrm {
    use tr_core::GeoPoint;

    use crate::RouteError;
    use crate::osrm::{OsrmClient, parse_route_response};

    #[test]
    fn parses_geojson_geometry() {
        let body = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[120.9842, 14.5995], [121.0, 14.6], [121.0223, 14.6091]]
                },
                "distance": 4321.0,
                "duration": 600.0
            }],
            "waypoints": []
        }"#;
        let pts = parse_route_response(body).unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], GeoPoint::new(120.9842, 14.5995));
        assert_eq!(pts[2], GeoPoint::new(121.0223, 14.6091));
    }

    #[test]
    fn error_code_is_malformed() {
        let body = r#"{"code": "NoRoute", "message": "Impossible route"}"#;
        assert!(matches!(parse_route_response(body), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn empty_geometry_is_malformed() {
        let body = r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": []}}]}"#;
        assert!(matches!(parse_route_response(body), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(parse_route_response("<html>"), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn url_is_lon_lat_ordered() {
        let client = OsrmClient::new("http://localhost:5000/").unwrap();
        let url = client.route_url(GeoPoint::new(120.5, 14.5), GeoPoint::new(121.0, 14.75));
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/driving/120.5,14.5;121,14.75?overview=full&geometries=geojson"
        );
    }
}
