//! Comparison rules for distances that may be missing.
//!
//! Records without coordinates carry no distance. Every decision about how
//! such a record filters or sorts lives here.

use serde::Deserialize;
use std::cmp::Ordering;

/// Placement of records without a location in unbounded searches
///
/// A record without a location never satisfies a radius bound, whatever the
/// policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlocatedPolicy {
    /// Ahead of every located record
    #[default]
    First,
    /// Behind every located record
    Last,
    /// Left out of the results
    Exclude,
}

/// Check whether a distance satisfies a radius bound
#[inline]
pub fn within_bound(distance: Option<f64>, max_distance: f64) -> bool {
    matches!(distance, Some(miles) if miles <= max_distance)
}

/// Check whether a record survives a search without a radius bound
#[inline]
pub fn retained_unbounded(distance: Option<f64>, policy: UnlocatedPolicy) -> bool {
    distance.is_some() || policy != UnlocatedPolicy::Exclude
}

/// Proximity ordering of two distances, nearest first
#[inline]
pub fn compare_proximity(a: Option<f64>, b: Option<f64>, policy: UnlocatedPolicy) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => unlocated_ordering(policy),
        (Some(_), None) => unlocated_ordering(policy).reverse(),
    }
}

// Ordering of an unlocated record relative to a located one.
#[inline]
fn unlocated_ordering(policy: UnlocatedPolicy) -> Ordering {
    match policy {
        UnlocatedPolicy::First => Ordering::Less,
        // Excluded records never reach the sort; keep them last regardless.
        UnlocatedPolicy::Last | UnlocatedPolicy::Exclude => Ordering::Greater,
    }
}
