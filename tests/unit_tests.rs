// Unit tests for the matching engine and distance function

use food_truck_locator::core::{distance_miles, DistanceFormula, Matcher, UnlocatedPolicy};
use food_truck_locator::models::{GeoPoint, LocationRecord, MatchQuery, TruckSearchParams};
use std::collections::HashSet;

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn origin() -> GeoPoint {
    point(37.7901490737, -122.3986581846)
}

/// A deterministic spread of trucks around downtown San Francisco, with
/// every seventh one missing its coordinates
fn downtown_trucks(count: i64) -> Vec<LocationRecord> {
    (0..count)
        .map(|i| {
            if i % 7 == 3 {
                return LocationRecord::new(i, None, None);
            }
            let lat = 37.7901 + ((i * 37) % 101) as f64 * 0.0007 - 0.035;
            let lon = -122.3986 + ((i * 53) % 97) as f64 * 0.0009 - 0.043;
            LocationRecord::new(i, Some(lat), Some(lon))
                .with_attribute("applicant", format!("Truck {}", i))
        })
        .collect()
}

#[test]
fn test_distance_zero_for_same_point() {
    for formula in [DistanceFormula::Geodesic, DistanceFormula::Haversine] {
        assert_eq!(distance_miles(&origin(), &origin(), formula), 0.0);
    }
}

#[test]
fn test_distance_symmetry_across_pairs() {
    let points: Vec<GeoPoint> = downtown_trucks(40)
        .iter()
        .filter_map(LocationRecord::coordinates)
        .chain([point(-33.8688, 151.2093), point(64.1466, -21.9426), point(0.5, 179.9)])
        .collect();

    for formula in [DistanceFormula::Geodesic, DistanceFormula::Haversine] {
        for a in &points {
            for b in &points {
                assert_eq!(distance_miles(a, b, formula), distance_miles(b, a, formula));
            }
        }
    }
}

#[test]
fn test_distance_san_francisco_to_los_angeles() {
    // Roughly 347 miles as the crow flies
    let sf = point(37.7749, -122.4194);
    let la = point(34.0522, -118.2437);

    let distance = distance_miles(&sf, &la, DistanceFormula::Geodesic);
    assert!((distance - 347.0).abs() < 5.0, "Expected ~347mi, got {}", distance);
}

#[test]
fn test_page_never_exceeds_limit_or_total() {
    let matcher = Matcher::default();
    let candidates = downtown_trucks(60);

    for max_distance in [None, Some(0.0), Some(0.5), Some(1.5), Some(100.0)] {
        for (offset, limit) in [(0, 0), (0, 10), (5, 10), (55, 10), (100, 10), (0, 1000)] {
            let mut query = MatchQuery::new(origin()).with_page(offset, limit);
            query.max_distance = max_distance;

            let result = matcher.find_matches(&query, candidates.clone());

            assert!(result.page.len() <= limit);
            assert!(result.total_matched >= result.page.len());
            assert_eq!(
                result.page.len(),
                result.total_matched.saturating_sub(offset).min(limit)
            );
        }
    }
}

#[test]
fn test_radius_filter_is_exact() {
    let matcher = Matcher::default();
    let candidates = downtown_trucks(60);
    let max_distance = 1.0;

    let expected: HashSet<i64> = candidates
        .iter()
        .filter(|record| {
            record
                .coordinates()
                .map(|coords| distance_miles(&origin(), &coords, DistanceFormula::Geodesic) <= max_distance)
                .unwrap_or(false)
        })
        .map(|record| record.id)
        .collect();

    let query = MatchQuery::new(origin())
        .with_max_distance(max_distance)
        .with_page(0, usize::MAX);
    let result = matcher.find_matches(&query, candidates);

    let returned: HashSet<i64> = result.page.iter().map(|scored| scored.id()).collect();
    assert_eq!(returned, expected);
    assert_eq!(result.total_matched, expected.len());
    for scored in &result.page {
        assert!(scored.distance.unwrap() <= max_distance);
    }
}

#[test]
fn test_consecutive_pages_are_disjoint_and_contiguous() {
    let matcher = Matcher::default();
    let candidates = downtown_trucks(45);
    let page_size = 10;

    let everything = matcher.find_matches(
        &MatchQuery::new(origin()).with_page(0, usize::MAX),
        candidates.clone(),
    );

    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let query = MatchQuery::new(origin()).with_page(offset, page_size);
        let page = matcher.find_matches(&query, candidates.clone()).page;
        if page.is_empty() {
            break;
        }
        seen.extend(page.iter().map(|scored| scored.id()));
        offset += page_size;
    }

    let all_ids: Vec<i64> = everything.page.iter().map(|scored| scored.id()).collect();
    assert_eq!(seen, all_ids);
}

#[test]
fn test_unbounded_results_sorted_with_unlocated_first() {
    let result = Matcher::default().find_matches(
        &MatchQuery::new(origin()).with_page(0, usize::MAX),
        downtown_trucks(50),
    );

    let first_located = result
        .page
        .iter()
        .position(|scored| scored.distance.is_some())
        .unwrap();
    assert!(result.page[..first_located].iter().all(|scored| scored.distance.is_none()));

    let distances: Vec<f64> = result.page[first_located..]
        .iter()
        .map(|scored| scored.distance.unwrap())
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(result.total_matched, 50);
}

#[test]
fn test_unlocated_excluded_by_policy() {
    let matcher = Matcher::new(DistanceFormula::Haversine, UnlocatedPolicy::Exclude);
    let candidates = downtown_trucks(50);
    let located = candidates.iter().filter(|r| r.coordinates().is_some()).count();

    let result = matcher.find_matches(&MatchQuery::new(origin()).with_page(0, usize::MAX), candidates);

    assert_eq!(result.total_matched, located);
    assert!(result.page.iter().all(|scored| scored.distance.is_some()));
}

#[test]
fn test_request_normalization_feeds_engine() {
    let params = TruckSearchParams {
        location: Some("37.7901490737,-122.3986581846".to_string()),
        max_dist: Some("-1".to_string()),
        limit: Some("abc".to_string()),
        offset: Some("-3".to_string()),
    };

    let query = params.to_match_query(10, None).unwrap();
    let result = Matcher::default().find_matches(&query, downtown_trucks(30));

    assert_eq!(result.page.len(), 10);
    assert_eq!(result.total_matched, 30);
}
