//! Geographic coordinate reference systems and datum transformation,
//! backed by `proj4rs`.

use painel_common::{DataError, Result};
use proj4rs::proj::Proj;

/// A geographic (longitude/latitude in degrees) CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeographicCrs {
    pub epsg: u32,
    pub proj: &'static str,
}

/// SIRGAS 2000. Its published transformation to WGS 84 is a null shift.
pub const SIRGAS_2000: GeographicCrs = GeographicCrs {
    epsg: 4674,
    proj: "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs",
};

pub const WGS_84: GeographicCrs = GeographicCrs {
    epsg: 4326,
    proj: "+proj=longlat +datum=WGS84 +no_defs",
};

fn proj_error(crs: GeographicCrs, e: impl std::fmt::Display) -> DataError {
    DataError::Geometry(format!("EPSG:{}: {}", crs.epsg, e))
}

/// Reproject geographic coordinates from one CRS to another.
#[derive(Debug)]
pub struct Transformer {
    source: Proj,
    target: Proj,
    source_epsg: u32,
}

impl Transformer {
    pub fn new(source: GeographicCrs, target: GeographicCrs) -> Result<Self> {
        Ok(Self {
            source: Proj::from_proj_string(source.proj).map_err(|e| proj_error(source, e))?,
            target: Proj::from_proj_string(target.proj).map_err(|e| proj_error(target, e))?,
            source_epsg: source.epsg,
        })
    }

    /// Transform one (lon, lat) pair in degrees.
    pub fn transform(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut point).map_err(|e| {
            DataError::Geometry(format!("EPSG:{} ({}, {}): {}", self.source_epsg, lon, lat, e))
        })?;
        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }
}

/// True when (lon, lat) is a valid geographic position in degrees.
pub fn in_geographic_bounds(lon: f64, lat: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}
