//! Shared application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use painel_data::{DataSnapshot, Domain};

/// Shared state injected into every Axum handler.
///
/// Page bodies are serialized once here so repeated requests return
/// byte-identical responses without touching the snapshot again.
#[derive(Debug, Clone)]
pub struct AppState {
    pub snapshot: Arc<DataSnapshot>,
    /// Indexed by `Domain as usize`, in `Domain::ALL` order.
    pages: Vec<Bytes>,
    mapa: Bytes,
    /// Directory holding `index.html` and the static assets.
    pub frontend_dir: PathBuf,
}

impl AppState {
    pub fn new(snapshot: DataSnapshot, frontend_dir: impl Into<PathBuf>) -> serde_json::Result<Self> {
        let pages = Domain::ALL
            .into_iter()
            .map(|domain| serde_json::to_vec(snapshot.domain(domain)).map(Bytes::from))
            .collect::<serde_json::Result<Vec<_>>>()?;
        let mapa = Bytes::from(snapshot.mapa_geojson.clone());

        Ok(Self {
            snapshot: Arc::new(snapshot),
            pages,
            mapa,
            frontend_dir: frontend_dir.into(),
        })
    }

    /// Serialized `{"kpis": ..., <tables>}` document of one page.
    pub fn page(&self, domain: Domain) -> Bytes {
        self.pages[domain as usize].clone()
    }

    /// Serialized GeoJSON FeatureCollection, or `{}`.
    pub fn mapa(&self) -> Bytes {
        self.mapa.clone()
    }
}

pub type SharedState = Arc<AppState>;
