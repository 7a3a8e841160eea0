//! Plain data row types written by output backends.

use tr_core::SessionId;
use tr_route::Route;
use tr_sim::Frame;

/// One simulator frame, flattened for tabular output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub session_id:  u32,
    /// Virtual time of the frame, ms.
    pub at_ms:       u64,
    pub route_id:    u32,
    pub index:       u64,
    pub lon:         f64,
    pub lat:         f64,
    pub bearing_deg: f64,
    pub instruction: &'static str,
    pub eta_minutes: u32,
    pub status:      &'static str,
}

impl FrameRow {
    pub fn new(session: SessionId, frame: &Frame) -> Self {
        Self {
            session_id:  session.0,
            at_ms:       frame.at.as_millis(),
            route_id:    frame.route_id.0,
            index:       frame.index as u64,
            lon:         frame.position.lon,
            lat:         frame.position.lat,
            bearing_deg: frame.bearing_deg,
            instruction: frame.instruction(),
            eta_minutes: frame.eta_minutes,
            status:      frame.status.as_str(),
        }
    }
}

/// Summary of one candidate route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub session_id:   u32,
    pub route_id:     u32,
    pub name:         String,
    pub traffic:      &'static str,
    pub distance_km:  f64,
    pub duration_min: f64,
    pub waypoints:    u64,
    pub selected:     bool,
}

impl RouteRow {
    pub fn new(session: SessionId, route: &Route, selected: bool) -> Self {
        Self {
            session_id:   session.0,
            route_id:     route.id.0,
            name:         route.name.clone(),
            traffic:      route.traffic.as_str(),
            distance_km:  route.distance_km,
            duration_min: route.duration_min,
            waypoints:    route.len() as u64,
            selected,
        }
    }
}
