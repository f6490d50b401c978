//! The five dashboard pages. Each returns the cached document of its
//! analysis: `{"kpis": {...}, "<table>": [...]}`.

use axum::{extract::State, response::IntoResponse};
use painel_data::Domain;

use super::json_body;
use crate::state::SharedState;

/// GET /api/v1/page1_vendas
pub async fn page1_vendas(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.page(Domain::Vendas))
}

/// GET /api/v1/page2_logistica
pub async fn page2_logistica(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.page(Domain::Logistica))
}

/// GET /api/v1/page3_satisfacao
pub async fn page3_satisfacao(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.page(Domain::Satisfacao))
}

/// GET /api/v1/page4_financeiro
pub async fn page4_financeiro(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.page(Domain::Financeiro))
}

/// GET /api/v1/page5_marketing
pub async fn page5_marketing(State(state): State<SharedState>) -> impl IntoResponse {
    json_body(state.page(Domain::Marketing))
}
