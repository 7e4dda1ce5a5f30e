use crate::models::{GeoPoint, LocationRecord, MatchQuery, ScoredRecord};
use crate::core::{
    distance::{distance_miles, DistanceFormula},
    filters::{compare_proximity, retained_unbounded, within_bound, UnlocatedPolicy},
};

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The requested page, nearest first
    pub page: Vec<ScoredRecord>,
    /// Records that passed the distance filter, before pagination
    pub total_matched: usize,
    /// Records read from the candidate source
    pub total_candidates: usize,
    pub query: MatchQuery,
}

/// Proximity matching engine
///
/// # Pipeline Stages
/// 1. Score every candidate with its distance from the origin
/// 2. Filter by the optional radius
/// 3. Stable sort, nearest first
/// 4. Count, then cut the requested page
///
/// The matcher holds configuration only and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    formula: DistanceFormula,
    unlocated: UnlocatedPolicy,
}

impl Matcher {
    pub fn new(formula: DistanceFormula, unlocated: UnlocatedPolicy) -> Self {
        Self { formula, unlocated }
    }

    pub fn formula(&self) -> DistanceFormula {
        self.formula
    }

    pub fn unlocated(&self) -> UnlocatedPolicy {
        self.unlocated
    }

    /// Annotate every candidate with its distance from `origin`
    ///
    /// Candidates without coordinates are kept with no distance.
    pub fn score(&self, origin: &GeoPoint, candidates: Vec<LocationRecord>) -> Vec<ScoredRecord> {
        candidates
            .into_iter()
            .map(|record| {
                let distance = record
                    .coordinates()
                    .map(|coords| distance_miles(origin, &coords, self.formula));
                ScoredRecord { record, distance }
            })
            .collect()
    }

    /// Find the candidates nearest to the query origin
    ///
    /// # Arguments
    /// * `query` - Origin, optional radius and page window
    /// * `candidates` - The full, unfiltered record set
    ///
    /// # Returns
    /// MatchResult with the requested page and the pre-pagination match count
    pub fn find_matches(&self, query: &MatchQuery, candidates: Vec<LocationRecord>) -> MatchResult {
        let total_candidates = candidates.len();

        let mut matched: Vec<ScoredRecord> = self
            .score(&query.origin, candidates)
            .into_iter()
            .filter(|scored| match query.max_distance {
                Some(bound) => within_bound(scored.distance, bound),
                None => retained_unbounded(scored.distance, self.unlocated),
            })
            .collect();

        // `sort_by` is stable, so equidistant records keep their source order
        matched.sort_by(|a, b| compare_proximity(a.distance, b.distance, self.unlocated));

        let total_matched = matched.len();

        let page = matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        MatchResult {
            page,
            total_matched,
            total_candidates,
            query: *query,
        }
    }
}
