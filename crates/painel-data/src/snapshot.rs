//! The immutable, load-once view of every dashboard dataset.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::analises::{Financeiro, Logistica, Marketing, Satisfacao, Vendas};
use crate::domain::{load_or_default, Domain, DomainData};
use crate::mapa;

/// All page payloads plus the serialized state map.
///
/// Built once at startup and only read afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSnapshot {
    pub vendas: DomainData,
    pub logistica: DomainData,
    pub satisfacao: DomainData,
    pub financeiro: DomainData,
    pub marketing: DomainData,
    /// GeoJSON FeatureCollection, or `{}` when the map failed to load.
    pub mapa_geojson: String,
}

impl DataSnapshot {
    /// Load every analysis and the map. Never fails: a domain that cannot be
    /// loaded is logged and served in its empty shape.
    pub fn load(data_dir: &Path, map_dir: &Path) -> Self {
        let started = Instant::now();
        info!("Loading dashboard data from {:?} and {:?}", data_dir, map_dir);

        let snapshot = Self {
            mapa_geojson: mapa::load_or_empty(map_dir),
            vendas: load_or_default::<Vendas>(data_dir),
            logistica: load_or_default::<Logistica>(data_dir),
            satisfacao: load_or_default::<Satisfacao>(data_dir),
            financeiro: load_or_default::<Financeiro>(data_dir),
            marketing: load_or_default::<Marketing>(data_dir),
        };

        let failed: Vec<&str> = Domain::ALL
            .iter()
            .filter(|d| snapshot.domain(**d).kpis.is_empty())
            .map(Domain::as_str)
            .collect();
        info!(
            "Data loading finished in {:?} ({} of {} analyses degraded: {:?})",
            started.elapsed(),
            failed.len(),
            Domain::ALL.len(),
            failed
        );
        snapshot
    }

    pub fn domain(&self, domain: Domain) -> &DomainData {
        match domain {
            Domain::Vendas => &self.vendas,
            Domain::Logistica => &self.logistica,
            Domain::Satisfacao => &self.satisfacao,
            Domain::Financeiro => &self.financeiro,
            Domain::Marketing => &self.marketing,
        }
    }
}
