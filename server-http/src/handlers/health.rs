use crate::api::HealthResponse;
use crate::state::AppState;
use axum::{extract::State, Json};
use geocache::CoordinateLookup;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.lookup.stats();
    Json(HealthResponse {
        message: "OK".into(),
        cache_hits: stats.cache_hits,
        cache_misses: stats.cache_misses,
        expired_records: stats.expired_records,
        cache_write_failures: stats.cache_write_failures,
    })
}
