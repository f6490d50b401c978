//! Axum router — maps all URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{
    mapa::mapa_brasil,
    paginas::{page1_vendas, page2_logistica, page3_satisfacao, page4_financeiro, page5_marketing},
    system::health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let index = ServeFile::new(state.frontend_dir.join("index.html"));
    let assets = ServeDir::new(&state.frontend_dir);
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Landing page
        .route_service("/", index)

        // Dashboard pages
        .route("/api/v1/page1_vendas",     get(page1_vendas))
        .route("/api/v1/page2_logistica",  get(page2_logistica))
        .route("/api/v1/page3_satisfacao", get(page3_satisfacao))
        .route("/api/v1/page4_financeiro", get(page4_financeiro))
        .route("/api/v1/page5_marketing",  get(page5_marketing))
        .route("/api/v1/mapa_brasil",      get(mapa_brasil))

        .route("/health", get(health))

        // Static files
        .nest_service("/static", assets)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
