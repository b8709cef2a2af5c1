//! Map preview of accepted records.
//!
//! Produces a GeoJSON FeatureCollection (one feature per record, tagged with
//! its name) or a standalone Leaflet page that renders it. Geometries are
//! simplified before rendering so large boundary files stay displayable;
//! the merged WKT output is never simplified.

use crate::config::PreviewConfig;
use crate::error::Result;
use crate::record::PolygonRecord;
use geo::Simplify;
use geo_types::{Geometry, LineString, MultiPolygon, Polygon};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Build a GeoJSON FeatureCollection for the given records.
///
/// Records whose geometry is not areal are skipped.
pub fn to_geojson(records: &[PolygonRecord], config: &PreviewConfig) -> Value {
    let features: Vec<Value> = records
        .iter()
        .filter_map(|record| {
            let geometry = match record.geometry() {
                Geometry::Polygon(p) => polygon_geometry(&simplify_polygon(p, config)),
                Geometry::MultiPolygon(mp) => {
                    multi_polygon_geometry(&simplify_multi_polygon(mp, config))
                }
                _ => return None,
            };
            Some(json!({
                "type": "Feature",
                "properties": { "name": record.name() },
                "geometry": geometry,
            }))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Render a standalone HTML map for the given records.
pub fn render_html(records: &[PolygonRecord], config: &PreviewConfig) -> String {
    let data = to_geojson(records, config);
    let (lat, lng) = config.center;
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>State boundaries</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map", {{ preferCanvas: true }}).setView([{lat}, {lng}], {zoom});
L.tileLayer({tile_url}, {{ attribution: {attribution} }}).addTo(map);
const data = {data};
L.geoJSON(data, {{
  style: () => ({{ fillColor: {fill} }}),
  onEachFeature: (feature, layer) => layer.bindTooltip(feature.properties.name),
}}).addTo(map);
</script>
</body>
</html>
"#,
        zoom = config.zoom,
        tile_url = Value::from(config.tile_url.as_str()),
        attribution = Value::from(config.tile_attribution.as_str()),
        fill = Value::from(config.fill_color.as_str()),
    )
}

/// Write a preview to `path`.
///
/// `.geojson` and `.json` paths receive GeoJSON; anything else receives HTML.
/// Returns the number of bytes written.
pub fn write_preview(path: &Path, records: &[PolygonRecord], config: &PreviewConfig) -> Result<u64> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("geojson") || e.eq_ignore_ascii_case("json"));

    let body = if is_json {
        to_geojson(records, config).to_string()
    } else {
        render_html(records, config)
    };
    fs::write(path, &body)?;
    tracing::info!(
        path = %path.display(),
        features = records.len(),
        bytes = body.len(),
        "wrote map preview"
    );
    Ok(body.len() as u64)
}

fn simplify_polygon(polygon: &Polygon<f64>, config: &PreviewConfig) -> Polygon<f64> {
    if config.simplify_tolerance > 0.0 {
        polygon.simplify(&config.simplify_tolerance)
    } else {
        polygon.clone()
    }
}

fn simplify_multi_polygon(mp: &MultiPolygon<f64>, config: &PreviewConfig) -> MultiPolygon<f64> {
    if config.simplify_tolerance > 0.0 {
        mp.simplify(&config.simplify_tolerance)
    } else {
        mp.clone()
    }
}

fn ring_coordinates(ring: &LineString<f64>) -> Value {
    Value::Array(ring.coords().map(|c| json!([c.x, c.y])).collect())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![ring_coordinates(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_coordinates));
    Value::Array(rings)
}

fn polygon_geometry(polygon: &Polygon<f64>) -> Value {
    json!({ "type": "Polygon", "coordinates": polygon_rings(polygon) })
}

fn multi_polygon_geometry(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Value> = mp.iter().map(polygon_rings).collect();
    json!({ "type": "MultiPolygon", "coordinates": polygons })
}
