//! Remaining-distance ETA.
//!
//! # Precomputation
//!
//! The estimator is built once per selected route and stores the distance
//! left from every waypoint to the end:
//!
//! ```text
//!   remaining_km[n-1] = 0
//!   remaining_km[i]   = remaining_km[i+1] + d(wp[i], wp[i+1])
//! ```
//!
//! Each entry is the next one plus a non-negative term, so the table is
//! non-increasing in `i` even under floating-point rounding, and so is the
//! ETA derived from it.

use tr_core::GeoPoint;

use crate::{NavError, NavResult};

/// Converts the agent's position along a route into whole minutes.
#[derive(Debug, Clone)]
pub struct EtaEstimator {
    speed_kmh:    f64,
    remaining_km: Vec<f64>,
}

impl EtaEstimator {
    /// Build the suffix-distance table for `waypoints` at `speed_kmh`.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidSpeed`] if the speed is not a positive finite
    /// number.
    pub fn new(waypoints: &[GeoPoint], speed_kmh: f64) -> NavResult<Self> {
        if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
            return Err(NavError::InvalidSpeed(speed_kmh));
        }
        let mut remaining_km = vec![0.0; waypoints.len()];
        for i in (0..waypoints.len().saturating_sub(1)).rev() {
            remaining_km[i] = remaining_km[i + 1] + waypoints[i].distance_km(waypoints[i + 1]);
        }
        Ok(Self { speed_kmh, remaining_km })
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Distance from waypoint `index` to the destination along the route.
    ///
    /// # Panics
    /// Panics if `index` is past the end of the route.
    #[inline]
    pub fn remaining_distance_km(&self, index: usize) -> f64 {
        self.remaining_km[index]
    }

    /// `ceil(remaining / speed * 60)`, never less than 1.
    ///
    /// The floor of 1 holds right up to the destination; callers report 0
    /// themselves once the agent has arrived.
    pub fn eta_minutes(&self, index: usize) -> u32 {
        let minutes = (self.remaining_distance_km(index) / self.speed_kmh * 60.0).ceil();
        (minutes as u32).max(1)
    }
}
