//! Brazilian state map: WKT shapes dissolved per state, reprojected to
//! WGS 84 and serialized as one GeoJSON FeatureCollection.

use std::collections::BTreeMap;
use std::path::Path;

use geo::{BooleanOps, CoordsIter, MapCoords};
use geo_types::{Coord, Geometry, MultiPolygon};
use geojson::{feature::Id, Feature, FeatureCollection, JsonObject};
use painel_common::estados::nome_estado;
use painel_common::{DataError, Result};
use serde_json::Value;
use tracing::{debug, error, info};
use wkt::TryFromWkt;

use crate::crs::{self, GeographicCrs, Transformer};
use crate::table::{Row, Table};

pub const MAP_FILE: &str = "br_geobr_mapas_uf.csv";

/// Body served when the map cannot be built.
pub const EMPTY_MAP: &str = "{}";

/// CRS the source geometries are declared in, regardless of what the file
/// implies.
pub const SOURCE_CRS: GeographicCrs = crs::SIRGAS_2000;
pub const TARGET_CRS: GeographicCrs = crs::WGS_84;

/// Build the GeoJSON map, or [`EMPTY_MAP`] if anything fails.
pub fn load_or_empty(map_dir: &Path) -> String {
    match build_geojson(&map_dir.join(MAP_FILE)) {
        Ok(geojson) => geojson,
        Err(e) => {
            error!("Failed to load state map from {:?}: {}", map_dir, e);
            EMPTY_MAP.to_string()
        }
    }
}

/// Read the map CSV (`sigla_uf`, `geometria`, any other attributes) and
/// produce the serialized FeatureCollection, one feature per state code.
pub fn build_geojson(path: &Path) -> Result<String> {
    let table = Table::from_path(path)?;
    let estados = dissolve(&table)?;

    let transformer = Transformer::new(SOURCE_CRS, TARGET_CRS)?;
    let features = estados
        .into_iter()
        .enumerate()
        .map(|(idx, (sigla, estado))| {
            let shape = estado
                .shape
                .map(|shape| reproject(&shape, &transformer))
                .transpose()?;
            Ok(state_feature(idx, &sigla, shape.as_ref(), estado.attributes))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Built state map: {} features", features.len());
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    serde_json::to_string(&collection).map_err(|e| DataError::Geometry(e.to_string()))
}

/// One dissolved state.
#[derive(Debug, Clone, PartialEq)]
pub struct Estado {
    /// Union of every non-null shape of the state; `None` when all were null.
    pub shape: Option<MultiPolygon<f64>>,
    /// Remaining source columns, each taking its first non-null value.
    pub attributes: Row,
}

/// Merge every shape sharing a `sigla_uf` into one multipolygon per state,
/// ordered by state code. Rows without a code are skipped; rows without a
/// geometry contribute only their attributes.
pub fn dissolve(table: &Table) -> Result<BTreeMap<String, Estado>> {
    table.require_columns(&["sigla_uf", "geometria"])?;

    let mut grouped: BTreeMap<String, (Vec<MultiPolygon<f64>>, Row)> = BTreeMap::new();
    for idx in 0..table.len() {
        let Some(row) = table.row(idx) else { break };
        let Some(sigla) = row.str("sigla_uf")? else {
            debug!("Skipping map row {} without sigla_uf", idx);
            continue;
        };
        let (shapes, attributes) = grouped.entry(sigla.to_string()).or_default();

        for column in table.columns() {
            if column == "sigla_uf" || column == "geometria" {
                continue;
            }
            let value = row.get(column)?;
            let slot = attributes.entry(column.clone()).or_insert(Value::Null);
            if slot.is_null() {
                *slot = value.clone();
            }
        }

        match row.str("geometria")? {
            Some(wkt) => shapes.push(parse_shape(wkt)?),
            None => debug!("Map row {} ({}) has no geometry", idx, sigla),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(sigla, (shapes, attributes))| {
            let shape = (!shapes.is_empty()).then(|| union_all(shapes));
            (sigla, Estado { shape, attributes })
        })
        .collect())
}

/// Parse a WKT (or `SRID=...;`-prefixed EWKT) polygon or multipolygon.
pub fn parse_shape(raw: &str) -> Result<MultiPolygon<f64>> {
    let body = match raw.split_once(';') {
        Some((prefix, rest)) if prefix.trim_start().to_ascii_uppercase().starts_with("SRID=") => rest,
        _ => raw,
    };
    let geometry = Geometry::<f64>::try_from_wkt_str(body.trim())
        .map_err(|e| DataError::Geometry(format!("invalid WKT: {}", e)))?;

    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        Geometry::GeometryCollection(gc) => gc
            .into_iter()
            .map(|g| match g {
                Geometry::Polygon(p) => Ok(vec![p]),
                Geometry::MultiPolygon(mp) => Ok(mp.0),
                _ => Err(DataError::Geometry("collection member is not areal".to_string())),
            })
            .collect::<Result<Vec<_>>>()
            .map(|parts| MultiPolygon::new(parts.into_iter().flatten().collect())),
        _ => Err(DataError::Geometry("expected POLYGON or MULTIPOLYGON".to_string())),
    }
}

fn union_all(shapes: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = shapes.into_iter();
    let first = iter.next().unwrap_or_else(|| MultiPolygon::new(Vec::new()));
    iter.fold(first, |acc, shape| acc.union(&shape))
}

/// Reproject every vertex, rejecting coordinates that are not degrees.
pub fn reproject(shape: &MultiPolygon<f64>, transformer: &Transformer) -> Result<MultiPolygon<f64>> {
    if let Some(c) = shape.coords_iter().find(|c| !crs::in_geographic_bounds(c.x, c.y)) {
        return Err(DataError::Geometry(format!(
            "coordinate ({}, {}) is not in degrees of EPSG:{}",
            c.x, c.y, SOURCE_CRS.epsg
        )));
    }
    shape.try_map_coords(|c| {
        let (x, y) = transformer.transform(c.x, c.y)?;
        Ok(Coord { x, y })
    })
}

/// Properties are `sigla_uf`, the carried attributes, then `nome_estado`.
fn state_feature(idx: usize, sigla: &str, shape: Option<&MultiPolygon<f64>>, attributes: Row) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("sigla_uf".to_string(), Value::from(sigla));
    properties.extend(attributes);
    properties.insert(
        "nome_estado".to_string(),
        nome_estado(sigla).map(Value::from).unwrap_or(Value::Null),
    );
    Feature {
        bbox: None,
        geometry: shape.map(|shape| geojson::Geometry::new(geojson::Value::from(shape))),
        id: Some(Id::String(idx.to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}
