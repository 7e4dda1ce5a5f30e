// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;

pub use distance::{distance_miles, DistanceFormula};
pub use filters::{compare_proximity, within_bound, UnlocatedPolicy};
pub use matcher::{MatchResult, Matcher};
