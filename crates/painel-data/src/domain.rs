//! Analysis domains and their cached payloads.

use std::path::Path;

use painel_common::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::table::{Row, Table};

/// KPI name → pre-formatted display string, in insertion order.
pub type Kpis = Map<String, Value>;

/// The five dashboard pages backed by CSV analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Vendas,
    Logistica,
    Satisfacao,
    Financeiro,
    Marketing,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Vendas,
        Domain::Logistica,
        Domain::Satisfacao,
        Domain::Financeiro,
        Domain::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Vendas => "vendas",
            Domain::Logistica => "logistica",
            Domain::Satisfacao => "satisfacao",
            Domain::Financeiro => "financeiro",
            Domain::Marketing => "marketing",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one page serves: its KPIs and its tables, keyed by the
/// response field name.
///
/// Serializes as `{"kpis": {...}, "<table>": [...], ...}` with `kpis` first
/// and tables in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainData {
    pub kpis: Kpis,
    pub tables: Vec<(&'static str, Vec<Row>)>,
}

impl DomainData {
    /// The degraded shape: no KPIs and every table present but empty.
    pub fn empty(table_keys: &[&'static str]) -> Self {
        Self {
            kpis: Kpis::new(),
            tables: table_keys.iter().map(|key| (*key, Vec::new())).collect(),
        }
    }

    pub fn table(&self, key: &str) -> Option<&[Row]> {
        self.tables
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn kpi(&self, name: &str) -> Option<&str> {
        self.kpis.get(name).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty() && self.tables.iter().all(|(_, rows)| rows.is_empty())
    }
}

impl Serialize for DomainData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len() + 1))?;
        map.serialize_entry("kpis", &self.kpis)?;
        for (key, rows) in &self.tables {
            map.serialize_entry(key, rows)?;
        }
        map.end()
    }
}

/// Builder for a domain payload that keeps the table order fixed by the
/// analysis definition.
#[derive(Debug, Default)]
pub struct DomainBuilder {
    kpis: Kpis,
    tables: Vec<(&'static str, Vec<Row>)>,
}

impl DomainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kpi(mut self, name: &str, value: impl Into<String>) -> Self {
        self.kpis.insert(name.to_string(), Value::String(value.into()));
        self
    }

    pub fn table(mut self, key: &'static str, table: Table) -> Self {
        self.tables.push((key, table.into_rows()));
        self
    }

    pub fn build(self) -> DomainData {
        DomainData {
            kpis: self.kpis,
            tables: self.tables,
        }
    }
}

/// One CSV-backed analysis: where its files live, which tables it serves and
/// how its KPIs are derived.
pub trait Analysis {
    const DOMAIN: Domain;
    /// Subdirectory of the data directory, e.g. `a1`.
    const SUBDIR: &'static str;
    /// Response keys of the served tables, in response order.
    const TABLE_KEYS: &'static [&'static str];

    /// Read every file and derive the KPIs. `dir` is the analysis subdirectory.
    fn load(dir: &Path) -> Result<DomainData>;
}

/// Load one analysis, degrading to [`DomainData::empty`] on any failure.
pub fn load_or_default<A: Analysis>(data_dir: &Path) -> DomainData {
    let dir = data_dir.join(A::SUBDIR);
    match A::load(&dir) {
        Ok(data) => {
            let rows: usize = data.tables.iter().map(|(_, rows)| rows.len()).sum();
            info!(
                "Loaded {} ({}): {} KPIs, {} tables, {} rows",
                A::DOMAIN,
                A::SUBDIR,
                data.kpis.len(),
                data.tables.len(),
                rows
            );
            data
        }
        Err(e) => {
            error!("Failed to load {} ({}): {}", A::DOMAIN, A::SUBDIR, e);
            DomainData::empty(A::TABLE_KEYS)
        }
    }
}
