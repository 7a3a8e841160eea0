//! Named Manila locations for the demo, plus `lon,lat` parsing.
//!
//! Both the provider and customer flags accept either a name from
//! [`PLACES`] or a raw `lon,lat` pair.

use anyhow::{Context, Result, bail};

use tr_core::GeoPoint;

/// `(name, lon, lat)`.
pub const PLACES: &[(&str, f64, f64)] = &[
    ("quiapo",     120.9842, 14.5995),
    ("san-juan",   121.0223, 14.6091),
    ("intramuros", 120.9753, 14.5896),
    ("makati",     121.0244, 14.5547),
    ("bgc",        121.0509, 14.5509),
    ("cubao",      121.0527, 14.6190),
];

/// Resolve a place name or a `lon,lat` pair.
pub fn parse_point(s: &str) -> Result<GeoPoint> {
    if let Some(&(_, lon, lat)) = PLACES.iter().find(|(name, ..)| name.eq_ignore_ascii_case(s)) {
        return Ok(GeoPoint::new(lon, lat));
    }
    let Some((lon, lat)) = s.split_once(',') else {
        let names: Vec<&str> = PLACES.iter().map(|(n, ..)| *n).collect();
        bail!("unknown place {s:?}; use lon,lat or one of: {}", names.join(", "));
    };
    let lon: f64 = lon.trim().parse().with_context(|| format!("bad longitude in {s:?}"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude in {s:?}"))?;
    Ok(GeoPoint::new(lon, lat))
}
