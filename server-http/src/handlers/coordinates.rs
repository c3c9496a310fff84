use crate::api::CoordinatesQuery;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use geocache::{CoordinateLookup, LookupResult};
use tracing::debug;

/// GET /coordinates?address=...
pub async fn get_coordinates(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<LookupResult>, ApiError> {
    let address = query.address().ok_or_else(ApiError::missing_address)?;

    let result = state.lookup.lookup(address).await?;
    debug!(
        "LOOKUP: address={}, source={}",
        address,
        result.source.as_str()
    );

    Ok(Json(result))
}
