//! Record sources.
//!
//! A record source yields `(name, geometry)` records. Two implementations:
//!
//! - [`MemorySource`]: records already in memory
//! - [`ShapefileSource`]: an ESRI shapefile given as a `.shp` path, a
//!   directory holding one, or a `.zip` archive holding one
//!
//! Shapefile polygons are a flat list of rings tagged outer or inner. An
//! outer ring starts a new polygon and each inner ring becomes a hole of the
//! most recent outer ring. One resulting polygon is returned as a `Polygon`,
//! several as a `MultiPolygon`. Other shape types keep their own geometry
//! kind so the aggregator can reject them by name.

use crate::error::{BoundaryError, Result};
use crate::record::PolygonRecord;
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A finite supply of named boundary records.
pub trait RecordSource {
    /// Read every record, in source order.
    fn read_records(&mut self) -> Result<Vec<PolygonRecord>>;

    /// Description of the coordinate reference system, if the source has one.
    fn crs(&self) -> Option<&str> {
        None
    }

    /// Human-readable description of where records come from.
    fn describe(&self) -> String;
}

/// Records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<PolygonRecord>,
    crs: Option<String>,
}

impl MemorySource {
    /// Wrap a list of records.
    pub fn new(records: Vec<PolygonRecord>) -> Self {
        Self { records, crs: None }
    }

    /// Attach a CRS description.
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }
}

impl RecordSource for MemorySource {
    fn read_records(&mut self) -> Result<Vec<PolygonRecord>> {
        Ok(self.records.clone())
    }

    fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}

/// Shapefile-backed record source.
#[derive(Debug)]
pub struct ShapefileSource {
    input: PathBuf,
    shp_path: PathBuf,
    name_field: String,
    crs: Option<String>,
    // Holds the extracted archive alive; removed on drop.
    _extracted: Option<TempDir>,
}

impl ShapefileSource {
    /// Open a shapefile, a directory containing one, or a zip archive containing one.
    pub fn open(input: impl AsRef<Path>, name_field: impl Into<String>) -> Result<Self> {
        let input = input.as_ref().to_path_buf();
        if !input.exists() {
            return Err(unavailable(&input, "no such file or directory"));
        }

        let (shp_path, extracted) = if input.is_dir() {
            (find_single_shp(&input)?, None)
        } else if has_extension(&input, "zip") {
            let dir = extract_zip(&input)?;
            (find_single_shp(dir.path())?, Some(dir))
        } else if has_extension(&input, "shp") {
            (input.clone(), None)
        } else {
            return Err(unavailable(
                &input,
                "expected a .shp file, a .zip archive, or a directory",
            ));
        };

        let crs = read_prj(&shp_path);
        tracing::debug!(
            input = %input.display(),
            shp = %shp_path.display(),
            crs = crs.as_deref().unwrap_or("(none)"),
            "opened shapefile"
        );

        Ok(Self {
            input,
            shp_path,
            name_field: name_field.into(),
            crs,
            _extracted: extracted,
        })
    }
}

impl RecordSource for ShapefileSource {
    fn read_records(&mut self) -> Result<Vec<PolygonRecord>> {
        let mut reader = shapefile::Reader::from_path(&self.shp_path)
            .map_err(|e| unavailable(&self.shp_path, e))?;

        let mut records = Vec::new();
        for (index, item) in reader.iter_shapes_and_records().enumerate() {
            let (shape, attributes) = item.map_err(|e| {
                unavailable(&self.shp_path, format!("record {index}: {e}"))
            })?;
            let name = record_name(&attributes, &self.name_field)
                .map_err(|msg| unavailable(&self.shp_path, format!("record {index}: {msg}")))?;
            let geometry = shape_to_geometry(shape)
                .map_err(|msg| unavailable(&self.shp_path, format!("record {index}: {msg}")))?;
            records.push(PolygonRecord::new(name, geometry)?);
        }

        tracing::info!(
            path = %self.shp_path.display(),
            records = records.len(),
            "read shapefile records"
        );
        Ok(records)
    }

    fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    fn describe(&self) -> String {
        if self.input == self.shp_path {
            self.shp_path.display().to_string()
        } else {
            format!("{} ({})", self.input.display(), self.shp_path.display())
        }
    }
}

fn unavailable(path: &Path, detail: impl std::fmt::Display) -> BoundaryError {
    BoundaryError::RecordSourceUnavailable(format!("{}: {detail}", path.display()))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Find the one `.shp` file under `dir`, searching subdirectories.
fn find_single_shp(dir: &Path) -> Result<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| unavailable(&current, e))?;
        for entry in entries {
            let path = entry.map_err(|e| unavailable(&current, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if has_extension(&path, "shp") {
                found.push(path);
            }
        }
    }

    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(unavailable(dir, "no .shp file found")),
        n => {
            found.sort();
            let names: Vec<String> = found.iter().map(|p| p.display().to_string()).collect();
            Err(unavailable(
                dir,
                format!("found {n} .shp files, expected one: {}", names.join(", ")),
            ))
        }
    }
}

fn extract_zip(archive_path: &Path) -> Result<TempDir> {
    let file = fs::File::open(archive_path).map_err(|e| unavailable(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| unavailable(archive_path, e))?;
    let dir = tempfile::Builder::new()
        .prefix("statebounds-")
        .tempdir()
        .map_err(|e| unavailable(archive_path, e))?;
    archive
        .extract(dir.path())
        .map_err(|e| unavailable(archive_path, e))?;
    tracing::debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        dir = %dir.path().display(),
        "extracted archive"
    );
    Ok(dir)
}

fn read_prj(shp_path: &Path) -> Option<String> {
    let text = fs::read_to_string(shp_path.with_extension("prj")).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn record_name(attributes: &Record, field: &str) -> std::result::Result<String, String> {
    match attributes.get(field) {
        Some(FieldValue::Character(Some(name))) => Ok(name.clone()),
        Some(FieldValue::Memo(name)) => Ok(name.clone()),
        Some(FieldValue::Character(None)) => Err(format!("attribute '{field}' is null")),
        Some(other) => Err(format!("attribute '{field}' is not text (found {other:?})")),
        None => Err(format!("missing attribute '{field}'")),
    }
}

fn shape_to_geometry(shape: Shape) -> std::result::Result<Geometry<f64>, String> {
    Ok(match shape {
        Shape::Polygon(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y })?,
        Shape::PolygonM(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y })?,
        Shape::PolygonZ(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y })?,
        Shape::Point(pt) => Point::new(pt.x, pt.y).into(),
        Shape::PointM(pt) => Point::new(pt.x, pt.y).into(),
        Shape::PointZ(pt) => Point::new(pt.x, pt.y).into(),
        Shape::Polyline(l) => parts_to_lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y }).into(),
        Shape::PolylineM(l) => parts_to_lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y }).into(),
        Shape::PolylineZ(l) => parts_to_lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y }).into(),
        Shape::Multipoint(m) => points_to_multi(m.points(), |pt| Point::new(pt.x, pt.y)).into(),
        Shape::MultipointM(m) => points_to_multi(m.points(), |pt| Point::new(pt.x, pt.y)).into(),
        Shape::MultipointZ(m) => points_to_multi(m.points(), |pt| Point::new(pt.x, pt.y)).into(),
        Shape::Multipatch(_) | Shape::NullShape => {
            Geometry::GeometryCollection(GeometryCollection(Vec::new()))
        }
    })
}

fn rings_to_geometry<P>(
    rings: &[PolygonRing<P>],
    coord: impl Fn(&P) -> Coord<f64>,
) -> std::result::Result<Geometry<f64>, String> {
    let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for ring in rings {
        match ring {
            PolygonRing::Outer(points) => {
                polygons.push((points.iter().map(&coord).collect(), Vec::new()));
            }
            PolygonRing::Inner(points) => {
                let (_, holes) = polygons
                    .last_mut()
                    .ok_or_else(|| "inner ring before any outer ring".to_string())?;
                holes.push(points.iter().map(&coord).collect());
            }
        }
    }

    let mut polygons: Vec<Polygon<f64>> = polygons
        .into_iter()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect();
    Ok(match polygons.len() {
        0 => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
        1 => polygons.remove(0).into(),
        _ => MultiPolygon::new(polygons).into(),
    })
}

fn parts_to_lines<P>(parts: &[Vec<P>], coord: impl Fn(&P) -> Coord<f64>) -> MultiLineString<f64> {
    MultiLineString::new(
        parts
            .iter()
            .map(|part| part.iter().map(&coord).collect())
            .collect(),
    )
}

fn points_to_multi<P>(points: &[P], point: impl Fn(&P) -> Point<f64>) -> MultiPoint<f64> {
    MultiPoint::new(points.iter().map(point).collect())
}
