//! painel-data — Startup-time loading of the dashboard datasets.
//!
//! Each analysis (`a1`..`a5`) is read from its CSV files, its KPIs are
//! derived and formatted, and the result is frozen into a [`DataSnapshot`].
//! The state map is dissolved per state and reprojected to WGS 84.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use painel_data::{DataSnapshot, Domain};
//!
//! let snapshot = DataSnapshot::load(Path::new("data"), Path::new("data_uf"));
//! let vendas = snapshot.domain(Domain::Vendas);
//! println!("{:?}", vendas.kpi("total_geral_vendas"));
//! ```

pub mod analises;
pub mod crs;
pub mod domain;
pub mod mapa;
pub mod snapshot;
pub mod table;

pub use domain::{Analysis, Domain, DomainData, Kpis};
pub use snapshot::DataSnapshot;
pub use table::{Row, Table};
