use actix_web::{web, HttpResponse};
use crate::error::ApiError;
use crate::models::{TruckSearchParams, TruckSearchResponse};
use crate::routes::AppState;
use crate::services::fetch_all_records;

/// Configure food truck routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/food_trucks", web::get().to(find_food_trucks));
}

/// Find food trucks near a location
///
/// GET /api/food_trucks?location={lat},{lon}&max_dist={miles}&limit={n}&offset={n}
///
/// Only `location` is required. Bad `max_dist`, `limit` or `offset` values
/// fall back to their defaults, and a repeated parameter keeps its first value.
async fn find_food_trucks(
    state: web::Data<AppState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let params = TruckSearchParams::from_pairs(pairs.into_inner());

    let query = params
        .to_match_query(state.default_limit, state.max_limit)
        .map_err(|e| {
            tracing::info!("Rejected food truck search {:?}: {}", params.location, e);
            ApiError::from(e)
        })?;

    tracing::info!(
        "Searching food trucks near {} (max_dist: {:?}, offset: {}, limit: {})",
        query.origin,
        query.max_distance,
        query.offset,
        query.limit
    );

    // The connection is released when this block ends, on success or error
    let candidates = {
        let mut conn = state.store.acquire().await.map_err(log_storage_error)?;
        fetch_all_records(&mut conn).await.map_err(log_storage_error)?
    };

    let result = state.matcher.find_matches(&query, candidates);

    tracing::info!(
        "Returning {} of {} matching food trucks (from {} candidates)",
        result.page.len(),
        result.total_matched,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(TruckSearchResponse::from(result)))
}

fn log_storage_error(err: crate::services::StoreError) -> ApiError {
    tracing::error!("Failed to load food trucks: {}", err);
    ApiError::from(err)
}
