use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use geo::{LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use crate::common::{finalize_write, open_for_write};
use crate::data::Grade;
use crate::surface::{ParcelFeature, RenderCell};

/// Export parcel polygons as a GeoJSON FeatureCollection.
/// Features carry no top-level id; the map engine assigns its own.
pub fn parcels_to_geojson(parcels: &[ParcelFeature]) -> Value {
    let features: Vec<Value> = parcels.iter()
        .map(|p| {
            let mut properties = Map::new();
            properties.insert("grade".to_string(), json!(p.grade.to_str()));
            properties.insert("zone".to_string(), json!(p.zone));
            properties.insert("area_id".to_string(), json!(p.area_id.as_str()));
            feature(multipolygon_to_geojson(&p.shape), properties)
        })
        .collect();
    feature_collection(features)
}

/// Export extrusion cells as a GeoJSON FeatureCollection, in cell order.
pub fn cells_to_geojson(cells: &[RenderCell]) -> Value {
    let features: Vec<Value> = cells.iter()
        .map(|c| {
            let mut properties = Map::new();
            properties.insert("id".to_string(), json!(c.index));
            properties.insert("area_id".to_string(), json!(c.area_id.as_str()));
            properties.insert("zone".to_string(), json!(c.zone));
            properties.insert("grade".to_string(), json!(c.grade.to_str()));
            properties.insert("category".to_string(), json!(c.category.as_deref().unwrap_or(Grade::SENTINEL)));
            properties.insert("value".to_string(), json!(c.raw_value));
            properties.insert("norm".to_string(), json!(c.normalized));
            properties.insert("height".to_string(), json!(c.height));
            let geometry = c.footprint.as_ref().map_or(Value::Null, polygon_to_geojson);
            feature(geometry, properties)
        })
        .collect();
    feature_collection(features)
}

/// Wrap features in a FeatureCollection object.
pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature(geometry: Value, properties: Map<String, Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    })
}

fn ring_coords(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Rings of a polygon, exterior first.
fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_coords)
        .collect()
}

/// GeoJSON Polygon geometry.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": polygon_rings(polygon),
    })
}

/// GeoJSON MultiPolygon geometry: polygons → rings → points.
pub fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<_> = mp.0.iter().map(polygon_rings).collect();
    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

/// Write a GeoJSON value to `path` via a temp file and rename.
/// Refuses to replace an existing file unless `force` is set.
pub fn write_geojson(path: &Path, value: &Value, force: bool) -> Result<()> {
    let mut pending = open_for_write(path, force)?;
    serde_json::to_writer(&mut pending, value)
        .with_context(|| format!("[io::geojson::write_geojson] Failed to serialize {}", path.display()))?;
    pending.flush()
        .with_context(|| format!("[io::geojson::write_geojson] Failed to flush {}", path.display()))?;
    finalize_write(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AreaId;
    use crate::geom::parse_geometry;
    use crate::surface::square_footprint;
    use geo::Coord;
    use pretty_assertions::assert_eq;

    fn cell(footprint: Option<Polygon<f64>>) -> RenderCell {
        RenderCell {
            index: 4,
            area_id: AreaId::new("z4"),
            zone: 9,
            grade: Grade::D,
            category: None,
            raw_value: None,
            normalized: 0.0,
            height: 0.0,
            footprint,
        }
    }

    #[test]
    fn multipolygon_nests_polygons_rings_points() {
        let shape = parse_geometry("MULTIPOLYGON (((0 0, 4 0, 4 4, 0 0), (1 1, 2 1, 2 2, 1 1)))");
        let geometry = multipolygon_to_geojson(&shape);
        assert_eq!(geometry["type"], "MultiPolygon");
        assert_eq!(geometry["coordinates"].as_array().unwrap().len(), 1);
        assert_eq!(geometry["coordinates"][0].as_array().unwrap().len(), 2);
        assert_eq!(geometry["coordinates"][0][1][0], json!([1.0, 1.0]));
    }

    #[test]
    fn parcel_properties() {
        let parcels = vec![ParcelFeature {
            area_id: AreaId::new("44"),
            grade: Grade::Ungraded,
            zone: 2,
            shape: parse_geometry("POLYGON ((0 0, 1 0, 1 1, 0 0))"),
        }];
        let fc = parcels_to_geojson(&parcels);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"][0]["properties"], json!({ "grade": "N/A", "zone": 2, "area_id": "44" }));
        assert!(fc["features"][0].get("id").is_none());
    }

    #[test]
    fn cell_properties_and_geometry() {
        let fc = cells_to_geojson(&[cell(Some(square_footprint(Coord { x: 0.0, y: 0.0 }, 1.0)))]);
        let f = &fc["features"][0];
        assert_eq!(f["properties"]["id"], 4);
        assert_eq!(f["properties"]["category"], "N/A");
        assert_eq!(f["properties"]["value"], Value::Null);
        assert_eq!(f["geometry"]["type"], "Polygon");
        assert_eq!(f["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);
    }

    #[test]
    fn unanchored_cell_has_null_geometry() {
        let fc = cells_to_geojson(&[cell(None)]);
        assert_eq!(fc["features"][0]["geometry"], Value::Null);
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/cells.geojson");
        let fc = cells_to_geojson(&[cell(None)]);

        write_geojson(&path, &fc, false).unwrap();
        let read: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, fc);

        assert!(write_geojson(&path, &fc, false).is_err());
        write_geojson(&path, &fc, true).unwrap();
    }
}
