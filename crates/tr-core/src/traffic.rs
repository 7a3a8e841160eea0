//! Coarse traffic classification attached to every route.
//!
//! The level is cosmetic for display, but it also weights a route's
//! estimated duration through [`TrafficLevel::duration_factor`].

/// Traffic conditions along a route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
    /// No live data: the route is the straight-line fallback.
    #[default]
    Unknown,
}

impl TrafficLevel {
    /// Multiplier applied to free-flow duration.
    pub fn duration_factor(self) -> f64 {
        match self {
            TrafficLevel::Light    => 0.85,
            TrafficLevel::Moderate => 1.0,
            TrafficLevel::Heavy    => 1.35,
            TrafficLevel::Unknown  => 1.0,
        }
    }

    /// Lowercase label, as shown on the map legend and written to output.
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLevel::Light    => "light",
            TrafficLevel::Moderate => "moderate",
            TrafficLevel::Heavy    => "heavy",
            TrafficLevel::Unknown  => "unknown",
        }
    }
}

impl std::fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
