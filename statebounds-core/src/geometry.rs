//! Geometry classification and summary metadata.
//!
//! This module provides:
//! - A geometry type discriminator used in error reporting
//! - Bounding boxes over boundary geometries
//! - [`GeometrySummary`]: counts, bbox, area and centroid of a merged multipolygon
//!
//! Area and centroid are planar, computed in whatever reference system the
//! source data uses (degrees for the usual NAD83 state files). They are for
//! reporting only and never feed back into the merged output.

use geo::{Area, BoundingRect, Centroid};
use geo_types::{Geometry, MultiPolygon};
use serde::{Deserialize, Serialize};

/// Geometry type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Line,
    Rect,
    Triangle,
}

impl GeometryType {
    /// Classify a geo-types Geometry.
    pub fn from_geometry(geom: &Geometry<f64>) -> Self {
        match geom {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
            Geometry::Line(_) => GeometryType::Line,
            Geometry::Rect(_) => GeometryType::Rect,
            Geometry::Triangle(_) => GeometryType::Triangle,
        }
    }

    /// Classify a parsed WKT value.
    pub fn from_wkt(wkt: &wkt::Wkt<f64>) -> Self {
        match wkt {
            wkt::Wkt::Point(_) => GeometryType::Point,
            wkt::Wkt::LineString(_) => GeometryType::LineString,
            wkt::Wkt::Polygon(_) => GeometryType::Polygon,
            wkt::Wkt::MultiPoint(_) => GeometryType::MultiPoint,
            wkt::Wkt::MultiLineString(_) => GeometryType::MultiLineString,
            wkt::Wkt::MultiPolygon(_) => GeometryType::MultiPolygon,
            wkt::Wkt::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// WKT keyword for this type.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString | GeometryType::Line => "LINESTRING",
            GeometryType::Polygon | GeometryType::Rect | GeometryType::Triangle => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// Compute from a multipolygon. `None` when it has no polygons.
    pub fn from_multi_polygon(mp: &MultiPolygon<f64>) -> Option<Self> {
        let rect = mp.bounding_rect()?;
        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }
}

/// Structural and planar metadata for a merged multipolygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    /// Number of polygons.
    pub polygons: usize,

    /// Number of rings (exteriors plus holes).
    pub rings: usize,

    /// Number of holes.
    pub holes: usize,

    /// Number of coordinates across all rings.
    pub coordinates: usize,

    /// Bounding box (absent for an empty multipolygon).
    pub bbox: Option<BBox>,

    /// Unsigned planar area in source units squared.
    pub area: f64,

    /// Centroid lat/lng (absent for an empty multipolygon).
    pub centroid: Option<(f64, f64)>,
}

impl GeometrySummary {
    /// Compute the summary of a multipolygon.
    pub fn compute(mp: &MultiPolygon<f64>) -> Self {
        let mut rings = 0;
        let mut holes = 0;
        let mut coordinates = 0;
        for polygon in mp {
            rings += 1 + polygon.interiors().len();
            holes += polygon.interiors().len();
            coordinates += polygon.exterior().0.len();
            coordinates += polygon
                .interiors()
                .iter()
                .map(|ring| ring.0.len())
                .sum::<usize>();
        }

        Self {
            polygons: mp.0.len(),
            rings,
            holes,
            coordinates,
            bbox: BBox::from_multi_polygon(mp),
            area: mp.unsigned_area(),
            centroid: mp.centroid().map(|c| (c.y(), c.x())),
        }
    }
}

/// Count polygons and rings of a record geometry without merging it.
///
/// Returns `(polygons, rings)`; non-areal geometries count as `(0, 0)`.
pub fn polygon_and_ring_counts(geom: &Geometry<f64>) -> (usize, usize) {
    match geom {
        Geometry::Polygon(p) => (1, 1 + p.interiors().len()),
        Geometry::MultiPolygon(mp) => (
            mp.0.len(),
            mp.iter().map(|p| 1 + p.interiors().len()).sum(),
        ),
        _ => (0, 0),
    }
}
