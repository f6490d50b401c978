//! State map endpoint.

use axum::{extract::State, response::IntoResponse};

use super::json_body;
use crate::state::SharedState;

/// GET /api/v1/mapa_brasil — GeoJSON FeatureCollection of the 27 states,
/// `{}` when the map could not be built at startup.
pub async fn mapa_brasil(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.mapa())
}
