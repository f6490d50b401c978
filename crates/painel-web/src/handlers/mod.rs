//! HTTP handlers for all web routes.

pub mod mapa;
pub mod paginas;
pub mod system;

use axum::{body::Bytes, http::header, response::IntoResponse};

/// A pre-serialized JSON body.
pub(crate) fn json_body(body: Bytes) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}
