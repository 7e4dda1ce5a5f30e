//! Food Truck Locator - proximity search over a fixed set of food trucks
//!
//! Given a point, the service scores every truck by distance, applies an
//! optional radius, orders by proximity and returns one page of results
//! together with the total number of matches.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance_miles, DistanceFormula, MatchResult, Matcher, UnlocatedPolicy};
pub use crate::error::ApiError;
pub use crate::models::{GeoPoint, LocationRecord, MatchQuery, ScoredRecord, TruckSearchResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let origin = GeoPoint::new(37.7901, -122.3986).unwrap();
        let result = Matcher::default().find_matches(&MatchQuery::new(origin), vec![]);
        assert_eq!(result.total_matched, 0);
    }
}
