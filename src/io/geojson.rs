use std::{fs, path::Path};

use ahash::AHashSet;
use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect};
use serde_json::{json, Value};

use crate::{cover::CoverReport, crs::Crs, io::fs::write_atomic, layer::{Feature, FeatureLayer}};

/// Read a GeoJSON FeatureCollection into a layer.
///
/// With `selected_only`, features carrying `"selected": true` in their
/// properties are selected; otherwise every feature is.
pub fn read_layer_geojson(path: &Path, crs: Crs, selected_only: bool) -> Result<FeatureLayer> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to read {}", path.display()))?;
    let name = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("layer");

    read_layer_from_geojson_bytes(&bytes, name, crs, selected_only)
        .with_context(|| format!("[io::geojson] Failed to parse {}", path.display()))
}

/// Parse GeoJSON bytes into a layer; see [`read_layer_geojson`].
pub fn read_layer_from_geojson_bytes(bytes: &[u8], name: &str, crs: Crs, selected_only: bool) -> Result<FeatureLayer> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    let features = if value["type"] == "FeatureCollection" {
        value["features"].as_array()
            .ok_or_else(|| anyhow!("FeatureCollection without a features array"))?
            .clone()
    } else if value["type"] == "Feature" {
        vec![value]
    } else {
        bail!("expected a FeatureCollection or Feature, got {}", value["type"])
    };

    let ids = feature_ids(&features)?;
    let mut layer = FeatureLayer::new(name, crs);
    let mut selected = Vec::new();

    for (index, (feature, id)) in features.iter().zip(ids).enumerate() {
        let geometry = match &feature["geometry"] {
            Value::Null => None,
            geometry => parse_geometry(geometry)
                .with_context(|| format!("feature {index}: invalid geometry"))?,
        };

        if !selected_only || feature["properties"]["selected"].as_bool() == Some(true) {
            selected.push(id);
        }
        layer.push(Feature { id, geometry });
    }

    layer.select(selected);
    Ok(layer)
}

/// One unique id per feature. Numeric `id` members are kept and must not
/// repeat; features without one (or with a string id) get the smallest ids
/// no other feature uses.
fn feature_ids(features: &[Value]) -> Result<Vec<u64>> {
    let mut used = AHashSet::new();
    for (index, feature) in features.iter().enumerate() {
        if let Some(id) = feature["id"].as_u64() {
            if !used.insert(id) { bail!("feature {index}: duplicate id {id}") }
        }
    }

    let mut next = 0;
    Ok(features.iter().map(|feature| match feature["id"].as_u64() {
        Some(id) => id,
        None => {
            while used.contains(&next) { next += 1 }
            used.insert(next);
            next
        }
    }).collect())
}

/// Parse a GeoJSON geometry object. Unsupported types yield `None`.
fn parse_geometry(geometry: &Value) -> Result<Option<Geometry<f64>>> {
    let coords = &geometry["coordinates"];
    let geometry = match geometry["type"].as_str() {
        Some("Point") => Geometry::Point(Point(parse_coord(coords)?)),
        Some("MultiPoint") => Geometry::MultiPoint(MultiPoint(
            parse_array(coords)?.iter().map(|c| parse_coord(c).map(Point)).collect::<Result<_>>()?,
        )),
        Some("LineString") => Geometry::LineString(parse_line(coords)?),
        Some("MultiLineString") => Geometry::MultiLineString(MultiLineString(
            parse_array(coords)?.iter().map(parse_line).collect::<Result<_>>()?,
        )),
        Some("Polygon") => Geometry::Polygon(parse_polygon(coords)?),
        Some("MultiPolygon") => Geometry::MultiPolygon(MultiPolygon(
            parse_array(coords)?.iter().map(parse_polygon).collect::<Result<_>>()?,
        )),
        _ => return Ok(None),
    };
    Ok(Some(geometry))
}

fn parse_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("expected a coordinate array"))
}

fn parse_coord(value: &Value) -> Result<Coord<f64>> {
    let pair = parse_array(value)?;
    if pair.len() < 2 { bail!("coordinate needs at least two numbers") }
    let x = pair[0].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
    let y = pair[1].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
    Ok(Coord { x, y })
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    Ok(LineString(parse_array(value)?.iter().map(parse_coord).collect::<Result<_>>()?))
}

/// Rings: `[exterior, hole, hole, ...]`.
fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let mut rings = parse_array(value)?.iter().map(parse_line);
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString(vec![]));
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn rect_ring(rect: &Rect<f64>) -> Vec<[f64; 2]> {
    let (min, max) = (rect.min(), rect.max());
    vec![[min.x, min.y], [max.x, min.y], [max.x, max.y], [min.x, max.y], [min.x, min.y]]
}

/// Page rectangles as a GeoJSON FeatureCollection, one Polygon per page.
pub fn pages_to_geojson(report: &CoverReport, crs: &Crs) -> Value {
    let features = report.pages().map(|(page, rect)| json!({
        "type": "Feature",
        "id": page,
        "geometry": {
            "type": "Polygon",
            "coordinates": [rect_ring(rect)],
        },
        "properties": {
            "page": page,
            "width": rect.width(),
            "height": rect.height(),
        },
    })).collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "crs_proj4": crs.definition(),
        "features": features,
    })
}

/// Write page rectangles to a GeoJSON file.
pub fn write_pages_geojson(path: &Path, report: &CoverReport, crs: &Crs, force: bool) -> Result<()> {
    let value = pages_to_geojson(report, crs);
    write_atomic(path, force, |writer| {
        serde_json::to_writer_pretty(writer, &value).context("Failed to serialize GeoJSON")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crs() -> Crs { Crs::utm(32, false) }

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "id": 7, "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
              "properties": { "selected": true } },
            { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 0], [10, 0]] },
              "properties": {} },
            { "type": "Feature", "geometry": null, "properties": { "selected": true } },
            { "type": "Feature", "geometry": { "type": "MultiPolygon", "coordinates":
                [[[[0, 0], [1, 0], [1, 1], [0, 0]]], [[[5, 5], [6, 5], [6, 6], [5, 5]]]] },
              "properties": { "selected": false } }
        ]
    }"#;

    #[test]
    fn reads_every_feature() {
        let layer = read_layer_from_geojson_bytes(SAMPLE.as_bytes(), "sample", crs(), false).unwrap();
        assert_eq!(layer.len(), 4);
        assert_eq!(layer.selected_count(), 4);

        let features = layer.features();
        assert_eq!(features[0].id, 7);
        assert_eq!(features[0].geometry, Some(Geometry::Point(Point::new(1.0, 2.0))));
        assert_eq!(features[1].id, 0);
        assert!(matches!(features[1].geometry, Some(Geometry::LineString(_))));
        assert_eq!(features[2].geometry, None);
        match &features[3].geometry {
            Some(Geometry::MultiPolygon(polygons)) => assert_eq!(polygons.0.len(), 2),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn selected_only_follows_properties() {
        let layer = read_layer_from_geojson_bytes(SAMPLE.as_bytes(), "sample", crs(), true).unwrap();
        let ids = layer.selected_features().map(|feature| feature.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![7, 1]);
    }

    #[test]
    fn missing_ids_never_collide_with_explicit_ones() {
        let collection = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "id": 1, "geometry": { "type": "Point", "coordinates": [5000, 5000] },
              "properties": { "selected": false } },
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [0, 0] },
              "properties": { "selected": true } },
            { "type": "Feature", "id": "road-7", "geometry": { "type": "Point", "coordinates": [9, 9] },
              "properties": { "selected": true } }
        ] }"#;
        let layer = read_layer_from_geojson_bytes(collection.as_bytes(), "mixed", crs(), true).unwrap();

        let ids = layer.features().iter().map(|feature| feature.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 0, 2]);
        assert_eq!(layer.selected_count(), 2);
        assert!(!layer.is_selected(1));
        let selected = layer.selected_features().map(|feature| feature.geometry.clone()).collect::<Vec<_>>();
        assert_eq!(selected, vec![
            Some(Geometry::Point(Point::new(0.0, 0.0))),
            Some(Geometry::Point(Point::new(9.0, 9.0))),
        ]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let collection = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "id": 3, "geometry": null, "properties": {} },
            { "type": "Feature", "id": 3, "geometry": null, "properties": {} }
        ] }"#;
        assert!(read_layer_from_geojson_bytes(collection.as_bytes(), "dup", crs(), false).is_err());
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        let bad = r#"{ "type": "Feature", "geometry": { "type": "Point", "coordinates": ["a", 1] } }"#;
        assert!(read_layer_from_geojson_bytes(bad.as_bytes(), "bad", crs(), false).is_err());
        assert!(read_layer_from_geojson_bytes(b"[]", "bad", crs(), false).is_err());
    }

    #[test]
    fn pages_become_closed_polygons() {
        let report = CoverReport {
            rectangles: vec![Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 50.0 })],
            ..Default::default()
        };
        let value = pages_to_geojson(&report, &crs());
        let feature = &value["features"][0];
        assert_eq!(feature["properties"]["page"], 1);
        assert_eq!(feature["properties"]["width"], 100.0);

        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn written_pages_can_be_read_back_as_a_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.geojson");
        let report = CoverReport {
            rectangles: vec![Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 })],
            ..Default::default()
        };

        write_pages_geojson(&path, &report, &crs(), false).unwrap();
        let layer = read_layer_geojson(&path, crs(), false).unwrap();
        assert_eq!(layer.name(), "pages");
        assert_eq!(layer.len(), 1);
        assert!(matches!(layer.features()[0].geometry, Some(Geometry::Polygon(_))));
    }
}
