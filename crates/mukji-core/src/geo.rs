//! Coordinates, viewport bounds, and the viewport filter.
//!
//! Distances are converted to degrees with a flat-earth approximation: one
//! degree of latitude is ~111 km everywhere, while one degree of longitude
//! shrinks with the cosine of the latitude. At the scale of a map viewport
//! (a few hundred meters) the error is negligible.

use serde::{Deserialize, Serialize};

/// Meters spanned by one degree of latitude.
pub const METERS_PER_LAT_DEGREE: f64 = 111_320.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// The region currently visible on the map.
///
/// Containment is owned by the map surface that produced the bounds; the
/// filter only asks the question.
pub trait ViewportBounds {
    fn contains(&self, point: LatLng) -> bool;
}

/// Axis-aligned south-west / north-east rectangle with inclusive edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl LatLngBounds {
    #[must_use]
    pub const fn new(sw: LatLng, ne: LatLng) -> Self {
        Self { sw, ne }
    }

    /// Builds a square viewport of `half_span_meters` on each side of `center`.
    ///
    /// The longitude half-width widens with latitude so both axes cover the
    /// same physical distance.
    #[must_use]
    pub fn around(center: LatLng, half_span_meters: f64) -> Self {
        let lat_delta = half_span_meters / METERS_PER_LAT_DEGREE;
        let lng_delta = half_span_meters / meters_per_lng_degree(center.lat);
        Self {
            sw: LatLng::new(center.lat - lat_delta, center.lng - lng_delta),
            ne: LatLng::new(center.lat + lat_delta, center.lng + lng_delta),
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }
}

impl ViewportBounds for LatLngBounds {
    fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
            && point.lng >= self.sw.lng
            && point.lng <= self.ne.lng
    }
}

/// Meters spanned by one degree of longitude at `lat`.
///
/// Clamped away from zero so callers near the poles never divide by zero.
#[must_use]
pub fn meters_per_lng_degree(lat: f64) -> f64 {
    (METERS_PER_LAT_DEGREE * lat.to_radians().cos()).max(f64::EPSILON)
}

/// Anything that sits at a single map coordinate.
pub trait Located {
    fn position(&self) -> LatLng;
}

/// Returns the candidates whose position lies inside `bounds`.
///
/// Input order is preserved and the input slice is left untouched.
pub fn filter_in_bounds<T, B>(candidates: &[T], bounds: &B) -> Vec<T>
where
    T: Located + Clone,
    B: ViewportBounds + ?Sized,
{
    candidates
        .iter()
        .filter(|c| bounds.contains(c.position()))
        .cloned()
        .collect()
}
