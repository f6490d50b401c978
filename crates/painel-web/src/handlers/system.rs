//! Liveness and snapshot status.

use axum::{extract::State, response::Json};
use painel_data::Domain;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// Analyses served in their empty shape because loading failed.
    pub degraded: Vec<&'static str>,
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    let degraded = Domain::ALL
        .into_iter()
        .filter(|d| state.snapshot.domain(*d).is_empty())
        .map(|d| d.as_str())
        .collect();
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        degraded,
    })
}
