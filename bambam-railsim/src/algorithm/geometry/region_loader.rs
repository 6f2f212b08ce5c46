use super::RegionPolygons;
use crate::model::ScenarioError;
use geo::{Geometry, MultiPolygon, Polygon};
use std::path::Path;
use wkt::TryFromWkt;

/// reads a region boundary file into a [`RegionPolygons`] set. ESRI shapefiles
/// (`.shp`) are read as polygon shapes, any other file is read as WKT text.
/// the file must contain at least one polygon.
pub fn read_region_file(filepath: &Path) -> Result<RegionPolygons, ScenarioError> {
    let filename = filepath.to_string_lossy();
    let is_shapefile = filepath
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("shp"))
        .unwrap_or(false);
    let polygons = if is_shapefile {
        read_shapefile_polygons(filepath)?
    } else {
        read_wkt_polygons(filepath)?
    };
    if polygons.is_empty() {
        return Err(ScenarioError::GeometryLoadError(format!(
            "{filename} contains no polygons"
        )));
    }
    log::info!("read {} region polygon(s) from {filename}", polygons.len());
    Ok(RegionPolygons::new(polygons))
}

fn read_wkt_polygons(filepath: &Path) -> Result<Vec<Polygon<f64>>, ScenarioError> {
    let filename = filepath.to_string_lossy();
    let wkt_str = std::fs::read_to_string(filepath).map_err(|e| {
        ScenarioError::GeometryLoadError(format!("unable to read file {filename}: {e}"))
    })?;
    let geometry: Geometry<f64> = Geometry::try_from_wkt_str(&wkt_str).map_err(|e| {
        ScenarioError::GeometryLoadError(format!("unable to read WKT in {filename}: {e}"))
    })?;
    collect_polygons(geometry)
}

fn read_shapefile_polygons(filepath: &Path) -> Result<Vec<Polygon<f64>>, ScenarioError> {
    let filename = filepath.to_string_lossy();
    let shapes = shapefile::read_shapes_as::<_, shapefile::Polygon>(filepath).map_err(|e| {
        ScenarioError::GeometryLoadError(format!("unable to read shapefile {filename}: {e}"))
    })?;
    let polygons = shapes
        .into_iter()
        .flat_map(|shape| MultiPolygon::<f64>::from(shape).0)
        .collect();
    Ok(polygons)
}

/// flattens areal geometries into their polygons. any non-areal member makes
/// the region invalid.
fn collect_polygons(geometry: Geometry<f64>) -> Result<Vec<Polygon<f64>>, ScenarioError> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![p]),
        Geometry::MultiPolygon(mp) => Ok(mp.0),
        Geometry::GeometryCollection(gc) => {
            let nested = gc
                .0
                .into_iter()
                .map(collect_polygons)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(nested.into_iter().flatten().collect())
        }
        _ => Err(ScenarioError::GeometryLoadError(String::from(
            "region geometry must be a POLYGON, MULTIPOLYGON or GEOMETRYCOLLECTION of those",
        ))),
    }
}
