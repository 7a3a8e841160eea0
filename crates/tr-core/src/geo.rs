//! Geographic coordinate type and great-circle utilities.
//!
//! `GeoPoint` stores longitude first (GeoJSON order) because that is the
//! order routing services return geometry in.  Everything is `f64`: route
//! distances are summed over many short segments and the summed length must
//! match a route's recorded `distance_km` to within 1e-6 km.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `false` if either coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Initial compass bearing from `self` toward `other`, in `[0, 360)`.
    ///
    /// Coincident points have no defined heading; they return `0.0`.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        if self == other {
            return 0.0;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
        // rem_euclid can round a tiny negative up to exactly 360.0.
        if deg >= 360.0 { 0.0 } else { deg }
    }

    /// Planar interpolation in lon/lat space.  Adequate for the short
    /// segments of a city-scale route; not a geodesic.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lon: self.lon + (other.lon - self.lon) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Haversine distance between `a` and `b` in kilometres.
#[inline]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_km(b)
}

/// Initial bearing from `a` to `b`, normalised to `[0, 360)`.
#[inline]
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    a.bearing_deg(b)
}

/// Map an angle difference in degrees into `(-180, 180]`.
///
/// Positive results are clockwise (a right turn), negative counter-clockwise.
pub fn normalize_delta_deg(delta: f64) -> f64 {
    let d = delta.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Sum of consecutive haversine distances along `points`, in kilometres.
///
/// Returns `0.0` for fewer than two points.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].distance_km(w[1]))
        .sum()
}
