//! Unit tests for tr-nav.

#[cfg(test)]
mod helpers {
    use tr_core::GeoPoint;

    /// A straight line of `n` points heading due north from the equator.
    pub fn northbound(n: usize) -> Vec<GeoPoint> {
        (0..n).map(|i| GeoPoint::new(0.0, i as f64 * 0.01)).collect()
    }

    /// Three points: north for one leg, then a leg at `turn_deg` clockwise
    /// from north.  Close to the equator bearings are near-planar.
    pub fn dogleg(turn_deg: f64) -> Vec<GeoPoint> {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.01);
        let rad = turn_deg.to_radians();
        let c = GeoPoint::new(b.lon + 0.01 * rad.sin(), b.lat + 0.01 * rad.cos());
        vec![a, b, c]
    }
}

// ── Turn classification ───────────────────────────────────────────────────────

#[cfg(test)]
mod classify {
    use crate::{Maneuver, classify_turn};

    #[test]
    fn straight_below_thirty() {
        assert_eq!(classify_turn(0.0), Maneuver::Straight);
        assert_eq!(classify_turn(29.9), Maneuver::Straight);
        assert_eq!(classify_turn(-29.9), Maneuver::Straight);
    }

    #[test]
    fn right_and_left_bands() {
        assert_eq!(classify_turn(30.0), Maneuver::TurnRight);
        assert_eq!(classify_turn(149.9), Maneuver::TurnRight);
        assert_eq!(classify_turn(-30.0), Maneuver::TurnLeft);
        assert_eq!(classify_turn(-149.9), Maneuver::TurnLeft);
    }

    #[test]
    fn u_turn_from_one_fifty() {
        assert_eq!(classify_turn(150.0), Maneuver::UTurn);
        assert_eq!(classify_turn(-150.0), Maneuver::UTurn);
        assert_eq!(classify_turn(180.0), Maneuver::UTurn);
    }

    #[test]
    fn instruction_text() {
        assert_eq!(Maneuver::Straight.instruction(), "Continue straight");
        assert_eq!(Maneuver::TurnRight.to_string(), "Turn right");
        assert_eq!(Maneuver::TurnLeft.to_string(), "Turn left");
        assert_eq!(Maneuver::UTurn.to_string(), "Make a U-turn");
        assert_eq!(Maneuver::Arrive.to_string(), "Arriving at destination");
    }
}

// ── NavigationAdvisor ─────────────────────────────────────────────────────────

#[cfg(test)]
mod advisor {
    use super::helpers::{dogleg, northbound};
    use crate::{Maneuver, NavigationAdvisor};

    #[test]
    fn arriving_near_end_of_ten_point_route() {
        let wps = northbound(10);
        let nav = NavigationAdvisor::new();
        assert_eq!(nav.instruction(8, &wps), "Arriving at destination");
        assert_eq!(nav.advise(9, &wps), Maneuver::Arrive);
        assert_eq!(nav.advise(7, &wps), Maneuver::Straight);
    }

    #[test]
    fn forty_five_degree_right() {
        let nav = NavigationAdvisor::new();
        assert_eq!(nav.instruction(0, &dogleg(45.0)), "Turn right");
    }

    #[test]
    fn left_turn_and_u_turn() {
        let nav = NavigationAdvisor::new();
        assert_eq!(nav.advise(0, &dogleg(-90.0)), Maneuver::TurnLeft);
        assert_eq!(nav.advise(0, &dogleg(175.0)), Maneuver::UTurn);
        assert_eq!(nav.advise(0, &dogleg(10.0)), Maneuver::Straight);
    }

    #[test]
    fn turn_across_north_wraps() {
        // Heading 350° then 25°: a 35° right turn, not a 325° left.
        let nav = NavigationAdvisor::new();
        let a = tr_core::GeoPoint::new(0.0, 0.0);
        let r1 = 350f64.to_radians();
        let b = tr_core::GeoPoint::new(0.01 * r1.sin(), 0.01 * r1.cos());
        let r2 = 25f64.to_radians();
        let c = tr_core::GeoPoint::new(b.lon + 0.01 * r2.sin(), b.lat + 0.01 * r2.cos());
        assert_eq!(nav.advise(0, &[a, b, c]), Maneuver::TurnRight);
    }

    #[test]
    fn short_routes_are_final_approach() {
        let nav = NavigationAdvisor::new();
        assert_eq!(nav.advise(0, &northbound(2)), Maneuver::Arrive);
        assert_eq!(nav.advise(0, &northbound(1)), Maneuver::Arrive);
        assert_eq!(nav.advise(0, &[]), Maneuver::Arrive);
    }
}

// ── EtaEstimator ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod eta {
    use tr_core::{GeoPoint, path_length_km};

    use super::helpers::northbound;
    use crate::{EtaEstimator, NavError};

    #[test]
    fn remaining_distance_matches_path_suffix() {
        let wps = northbound(6);
        let eta = EtaEstimator::new(&wps, 30.0).unwrap();
        for i in 0..wps.len() {
            let expected = path_length_km(&wps[i..]);
            assert!((eta.remaining_distance_km(i) - expected).abs() < 1e-9);
        }
        assert_eq!(eta.remaining_distance_km(5), 0.0);
    }

    #[test]
    fn minutes_round_up() {
        // 0.01° of latitude ≈ 1.112 km; 5 legs ≈ 5.56 km; at 30 km/h ≈ 11.1 min.
        let wps = northbound(6);
        let eta = EtaEstimator::new(&wps, 30.0).unwrap();
        assert_eq!(eta.eta_minutes(0), 12);
    }

    #[test]
    fn floor_of_one_minute() {
        let wps = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0001)];
        let eta = EtaEstimator::new(&wps, 30.0).unwrap();
        assert_eq!(eta.eta_minutes(0), 1);
        assert_eq!(eta.eta_minutes(1), 1);
    }

    #[test]
    fn faster_speed_shorter_eta() {
        let wps = northbound(20);
        let slow = EtaEstimator::new(&wps, 20.0).unwrap();
        let fast = EtaEstimator::new(&wps, 60.0).unwrap();
        assert!(fast.eta_minutes(0) < slow.eta_minutes(0));
    }

    #[test]
    fn rejects_bad_speed() {
        let wps = northbound(3);
        assert!(matches!(EtaEstimator::new(&wps, 0.0), Err(NavError::InvalidSpeed(_))));
        assert!(matches!(EtaEstimator::new(&wps, f64::NAN), Err(NavError::InvalidSpeed(_))));
    }

    #[test]
    fn empty_route_has_empty_table() {
        let eta = EtaEstimator::new(&[], 30.0).unwrap();
        assert_eq!(eta.speed_kmh(), 30.0);
    }
}

#[cfg(test)]
mod eta_properties {
    use proptest::prelude::*;
    use tr_core::GeoPoint;

    use crate::EtaEstimator;

    proptest! {
        #[test]
        fn eta_is_non_increasing_and_at_least_one(
            coords in prop::collection::vec((120.9f64..121.1, 14.5f64..14.7), 2..40),
            speed in 5.0f64..120.0,
        ) {
            let wps: Vec<GeoPoint> = coords.into_iter().map(|(lon, lat)| GeoPoint::new(lon, lat)).collect();
            let eta = EtaEstimator::new(&wps, speed).unwrap();
            let mut prev = u32::MAX;
            for i in 0..wps.len() {
                let m = eta.eta_minutes(i);
                prop_assert!(m >= 1);
                prop_assert!(m <= prev);
                prev = m;
            }
        }
    }
}
