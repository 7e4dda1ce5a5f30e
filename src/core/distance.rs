use geo::{GeodesicDistance, HaversineDistance};
use serde::Deserialize;
use crate::models::GeoPoint;

/// Meters in one international mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle formula used to compute distances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceFormula {
    /// Geodesic on the WGS-84 ellipsoid (Karney)
    #[default]
    Geodesic,
    /// Spherical approximation using the mean earth radius
    Haversine,
}

/// Distance between two points in miles
///
/// Operands are put in a canonical order first, so the result is bit-for-bit
/// symmetric for either formula.
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint, formula: DistanceFormula) -> f64 {
    if a == b {
        return 0.0;
    }

    let (from, to) = canonical_order(a, b);
    match formula {
        DistanceFormula::Geodesic => geodesic_distance_miles(from, to),
        DistanceFormula::Haversine => haversine_distance_miles(from, to),
    }
}

/// Ellipsoidal distance in miles, without canonical ordering
#[inline]
pub fn geodesic_distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let from: geo::Point<f64> = (*a).into();
    let to: geo::Point<f64> = (*b).into();
    from.geodesic_distance(&to) / METERS_PER_MILE
}

/// Spherical distance in miles, without canonical ordering
#[inline]
pub fn haversine_distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let from: geo::Point<f64> = (*a).into();
    let to: geo::Point<f64> = (*b).into();
    from.haversine_distance(&to) / METERS_PER_MILE
}

#[inline]
fn canonical_order<'a>(a: &'a GeoPoint, b: &'a GeoPoint) -> (&'a GeoPoint, &'a GeoPoint) {
    let order = a
        .latitude()
        .total_cmp(&b.latitude())
        .then_with(|| a.longitude().total_cmp(&b.longitude()));

    if order.is_gt() {
        (b, a)
    } else {
        (a, b)
    }
}
