//! Simulation status, per-session state, and the frames sent to the map.

use std::fmt;

use tr_core::{GeoPoint, RouteId, SimTime};
use tr_nav::Maneuver;

/// Lifecycle of one simulation run.
///
/// ```text
/// Idle → Moving ⇄ Paused
///          ↓
///       Arrived   (terminal for the run)
/// ```
///
/// `cancel` returns any state to `Idle`; `start`/`select_route` begin a new
/// run from `Idle` or `Arrived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimStatus {
    #[default]
    Idle,
    Moving,
    Paused,
    Arrived,
}

impl SimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SimStatus::Idle    => "idle",
            SimStatus::Moving  => "moving",
            SimStatus::Paused  => "paused",
            SimStatus::Arrived => "arrived",
        }
    }

    /// `true` while a tick or resume can still be pending.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, SimStatus::Moving | SimStatus::Paused)
    }
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Mutable state of a session's movement simulator.
///
/// Only the simulator's tick, resume, start, select and cancel paths write
/// to it.  Within one run `current_index` never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub current_index: usize,
    pub status:        SimStatus,
    /// At least 1 until `Arrived`, then 0.
    pub eta_minutes:   u32,
    pub maneuver:      Maneuver,
    /// Heading of the agent, degrees in `[0, 360)`.
    pub bearing_deg:   f64,
    /// Ticks fired in the current run (departure tick included).
    pub ticks:         u64,
}

impl SimulationState {
    /// The state before any route has been started.
    pub fn idle() -> Self {
        Self {
            current_index: 0,
            status:        SimStatus::Idle,
            eta_minutes:   0,
            maneuver:      Maneuver::Straight,
            bearing_deg:   0.0,
            ticks:         0,
        }
    }

    /// Instruction text for the current maneuver.
    #[inline]
    pub fn next_instruction(&self) -> &'static str {
        self.maneuver.instruction()
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Everything the rendering collaborator needs to draw one update.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// The route being driven; the full set arrives via `on_routes`.
    pub route_id:    RouteId,
    pub index:       usize,
    pub position:    GeoPoint,
    pub bearing_deg: f64,
    pub maneuver:    Maneuver,
    pub eta_minutes: u32,
    pub status:      SimStatus,
    /// Virtual time the frame was produced.
    pub at:          SimTime,
}

impl Frame {
    #[inline]
    pub fn instruction(&self) -> &'static str {
        self.maneuver.instruction()
    }
}
