//! Turn-by-turn instructions from the bearing change at the next waypoint.

use std::fmt;

use tr_core::{bearing_deg, normalize_delta_deg, GeoPoint};

/// Bearing changes below this magnitude read as "Continue straight".
pub const STRAIGHT_THRESHOLD_DEG: f64 = 30.0;

/// Bearing changes at or above this magnitude read as "Make a U-turn".
pub const U_TURN_THRESHOLD_DEG: f64 = 150.0;

/// The next thing the driver has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    Straight,
    TurnRight,
    TurnLeft,
    UTurn,
    Arrive,
}

impl Maneuver {
    /// Text shown to the customer.
    pub fn instruction(self) -> &'static str {
        match self {
            Maneuver::Straight  => "Continue straight",
            Maneuver::TurnRight => "Turn right",
            Maneuver::TurnLeft  => "Turn left",
            Maneuver::UTurn     => "Make a U-turn",
            Maneuver::Arrive    => "Arriving at destination",
        }
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.instruction())
    }
}

/// Classify a signed bearing change in `(-180, 180]` (positive = clockwise).
pub fn classify_turn(delta_deg: f64) -> Maneuver {
    let magnitude = delta_deg.abs();
    if magnitude < STRAIGHT_THRESHOLD_DEG {
        Maneuver::Straight
    } else if magnitude >= U_TURN_THRESHOLD_DEG {
        Maneuver::UTurn
    } else if delta_deg > 0.0 {
        Maneuver::TurnRight
    } else {
        Maneuver::TurnLeft
    }
}

/// Derives the instruction for an agent sitting on waypoint `current_index`.
///
/// Looks two segments ahead: the turn is the change from the heading of
/// `wp[i] → wp[i+1]` to the heading of `wp[i+1] → wp[i+2]`.  Once fewer than
/// two segments remain the agent is on its final approach.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationAdvisor;

impl NavigationAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn advise(&self, current_index: usize, waypoints: &[GeoPoint]) -> Maneuver {
        // `current_index >= len - 2`, written to avoid underflow on 0/1-point
        // routes.  Routes under three waypoints are always on final approach.
        if current_index + 2 >= waypoints.len() {
            return Maneuver::Arrive;
        }
        let here  = waypoints[current_index];
        let next  = waypoints[current_index + 1];
        let after = waypoints[current_index + 2];

        let delta = normalize_delta_deg(bearing_deg(next, after) - bearing_deg(here, next));
        classify_turn(delta)
    }

    /// Convenience wrapper returning the instruction text.
    pub fn instruction(&self, current_index: usize, waypoints: &[GeoPoint]) -> &'static str {
        self.advise(current_index, waypoints).instruction()
    }
}
