// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoError, GeoPoint, LocationRecord, MatchQuery, ScoredRecord};
pub use requests::{LocationError, TruckSearchParams};
pub use responses::{ErrorDetail, ErrorResponse, HealthResponse, TruckSearchResponse};
