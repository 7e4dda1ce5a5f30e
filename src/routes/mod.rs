// Route exports
pub mod health;
pub mod trucks;

use actix_web::web;
use std::sync::Arc;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::services::TruckStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TruckStore>,
    pub matcher: Matcher,
    pub default_limit: usize,
    pub max_limit: Option<usize>,
}

impl AppState {
    pub fn new(store: Arc<TruckStore>, matching: &MatchingSettings) -> Self {
        Self {
            store,
            matcher: Matcher::new(matching.distance_formula, matching.unlocated),
            default_limit: matching.default_limit,
            max_limit: matching.max_limit,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .service(web::scope("/api").configure(trucks::configure));
}
