use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors raised when building a [`GeoPoint`] from raw components
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
}

/// A validated latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range components
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

/// A food truck row as read from the candidate source
///
/// Only `id` and the coordinates are interpreted; every other column is
/// carried through untouched in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LocationRecord {
    pub fn new(id: i64, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            id,
            latitude,
            longitude,
            attributes: Map::new(),
        }
    }

    /// Add a passthrough attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The record's location, if it has a usable one
    ///
    /// The permit dataset stores `0` for unknown coordinates, so a zero
    /// component counts as missing, the same as NULL.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => GeoPoint::new(lat, lon).ok(),
            _ => None,
        }
    }
}

/// A record annotated with its distance from the query origin, in miles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: LocationRecord,
    #[serde(serialize_with = "serialize_distance")]
    pub distance: Option<f64>,
}

impl ScoredRecord {
    #[inline]
    pub fn id(&self) -> i64 {
        self.record.id
    }
}

// Clients expect an empty string for records without a location.
fn serialize_distance<S>(distance: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match distance {
        Some(miles) => serializer.serialize_f64(*miles),
        None => serializer.serialize_str(""),
    }
}

/// Normalized input of the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchQuery {
    pub origin: GeoPoint,
    /// Search radius in miles; `None` means unbounded
    pub max_distance: Option<f64>,
    pub offset: usize,
    pub limit: usize,
}

impl MatchQuery {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            max_distance: None,
            offset: 0,
            limit: 10,
        }
    }

    pub fn with_max_distance(mut self, miles: f64) -> Self {
        self.max_distance = Some(miles);
        self
    }

    pub fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(GeoPoint::new(37.79, -122.39).is_ok());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert_eq!(GeoPoint::new(90.5, 0.0), Err(GeoError::InvalidLatitude(90.5)));
        assert_eq!(GeoPoint::new(0.0, -180.1), Err(GeoError::InvalidLongitude(-180.1)));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_geo_point_display() {
        let point = GeoPoint::new(37.7901490737, -122.3986581846).unwrap();
        assert_eq!(point.to_string(), "37.7901490737,-122.3986581846");
    }

    #[test]
    fn test_coordinates_require_both_components() {
        assert!(LocationRecord::new(1, Some(37.7), Some(-122.4)).coordinates().is_some());
        assert!(LocationRecord::new(2, Some(37.7), None).coordinates().is_none());
        assert!(LocationRecord::new(3, None, Some(-122.4)).coordinates().is_none());
        assert!(LocationRecord::new(4, None, None).coordinates().is_none());
    }

    #[test]
    fn test_zero_coordinates_are_missing() {
        assert!(LocationRecord::new(1, Some(0.0), Some(0.0)).coordinates().is_none());
        assert!(LocationRecord::new(2, Some(37.7), Some(0.0)).coordinates().is_none());
    }

    #[test]
    fn test_out_of_range_coordinates_are_missing() {
        assert!(LocationRecord::new(1, Some(137.7), Some(-122.4)).coordinates().is_none());
    }

    #[test]
    fn test_scored_record_serialization() {
        let record = LocationRecord::new(7, Some(37.79), Some(-122.39))
            .with_attribute("applicant", "Tacos El Primo")
            .with_attribute("status", "APPROVED");

        let located = ScoredRecord { record: record.clone(), distance: Some(0.25) };
        assert_eq!(
            serde_json::to_value(&located).unwrap(),
            json!({
                "id": 7,
                "latitude": 37.79,
                "longitude": -122.39,
                "applicant": "Tacos El Primo",
                "status": "APPROVED",
                "distance": 0.25,
            })
        );

        let unlocated = ScoredRecord { record, distance: None };
        let value = serde_json::to_value(&unlocated).unwrap();
        assert_eq!(value["distance"], json!(""));
    }
}
