use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::domain::{GeoPoint, MatchQuery};

/// Problems with the mandatory `location` parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("no search location given")]
    Missing,

    #[error("{0}")]
    Invalid(String),
}

/// Raw query string of `GET /api/food_trucks`
///
/// Everything is kept as text so that malformed optional values can fall
/// back to defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruckSearchParams {
    pub location: Option<String>,
    pub max_dist: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl TruckSearchParams {
    /// Collect the known parameters from decoded query pairs
    ///
    /// The first occurrence of a repeated key wins and unknown keys are
    /// ignored, so `?limit=5&limit=abc` behaves like `?limit=5`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "location" => &mut params.location,
                "max_dist" => &mut params.max_dist,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }

        params
    }

    /// Validate and normalize the parameters into an engine query
    ///
    /// Only the location can fail; `max_dist`, `limit` and `offset` are
    /// silently replaced by their defaults when negative or unparseable.
    /// `max_limit`, when set, caps the effective limit.
    pub fn to_match_query(
        &self,
        default_limit: usize,
        max_limit: Option<usize>,
    ) -> Result<MatchQuery, LocationError> {
        let origin = parse_location(self.location.as_deref())?;

        let limit = parse_count(self.limit.as_deref()).unwrap_or(default_limit);
        let limit = match max_limit {
            Some(cap) => limit.min(cap),
            None => limit,
        };

        Ok(MatchQuery {
            origin,
            max_distance: parse_max_distance(self.max_dist.as_deref()),
            offset: parse_count(self.offset.as_deref()).unwrap_or(0),
            limit,
        })
    }
}

/// Parse a `"<lat>,<lon>"` pair
pub fn parse_location(raw: Option<&str>) -> Result<GeoPoint, LocationError> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(LocationError::Missing),
    };

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [lat, lon] = parts.as_slice() else {
        return Err(LocationError::Invalid(format!(
            "expected latitude and longitude separated by a comma, got '{}'",
            raw
        )));
    };

    let latitude = parse_coordinate(lat)?;
    let longitude = parse_coordinate(lon)?;

    GeoPoint::new(latitude, longitude).map_err(|e| LocationError::Invalid(e.to_string()))
}

fn parse_coordinate(raw: &str) -> Result<f64, LocationError> {
    raw.parse::<f64>()
        .map_err(|_| LocationError::Invalid(format!("'{}' is not a number", raw)))
}

/// Radius in miles; negative, NaN or unparseable values mean "no bound"
pub fn parse_max_distance(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|miles| *miles >= 0.0)
}

/// Non-negative integer, `None` when absent, negative or unparseable
///
/// Values too large for `usize` saturate instead of being rejected.
pub fn parse_count(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value = digits.parse::<u128>().unwrap_or(u128::MAX);
    Some(usize::try_from(value).unwrap_or(usize::MAX))
}
