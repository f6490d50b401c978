//! painel-web — Read-only HTTP API over the dashboard snapshot.
//! Serves:
//!   - One JSON document per dashboard page (`/api/v1/page*`)
//!   - The Brazilian state map as GeoJSON (`/api/v1/mapa_brasil`)
//!   - The landing page and its static assets

pub mod handlers;
pub mod router;
pub mod state;
