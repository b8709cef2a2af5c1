//! Geometry aggregation.
//!
//! Collects the geometries of accepted records into one multipolygon:
//! 1. A `Polygon` record is appended as is
//! 2. A `MultiPolygon` record is flattened, its parts appended in their own order
//! 3. Any other geometry kind fails the run with `InvalidGeometryKind`
//!
//! Every polygon is checked before it is appended: each ring must have
//! coordinates and every coordinate must be finite. Anything else has no
//! WKT form that decodes back to the same value.
//!
//! No union, simplification, or topology check is performed. The output is
//! a structural collection of the input patches, not a dissolved region.
//!
//! # Usage
//!
//! ```ignore
//! let mut aggregator = Aggregator::new();
//! for record in &accepted {
//!     aggregator.add(record)?;
//! }
//! let stats = aggregator.stats().clone();
//! let merged = aggregator.finish();
//! ```

use crate::error::{BoundaryError, Result};
use crate::geometry::GeometryType;
use crate::record::PolygonRecord;
use geo_types::{Geometry, MultiPolygon, Polygon};
use serde::Serialize;

/// Statistics collected during aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Number of records added.
    pub records: u64,

    /// Number of polygons in the output.
    pub polygons: u64,

    /// Number of multi-part records that were flattened.
    pub flattened_records: u64,

    /// Number of rings (exteriors plus holes).
    pub rings: u64,

    /// Number of coordinates across all rings.
    pub coordinates: u64,
}

/// Incremental multipolygon builder.
#[derive(Debug, Default)]
pub struct Aggregator {
    polygons: Vec<Polygon<f64>>,
    stats: AggregateStats,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current statistics.
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Append a record's geometry.
    ///
    /// On error nothing from this record has been appended.
    pub fn add(&mut self, record: &PolygonRecord) -> Result<()> {
        match record.geometry() {
            Geometry::Polygon(polygon) => {
                check_encodable(record.name(), polygon)?;
                self.push(polygon.clone());
                tracing::trace!(name = record.name(), "appended polygon");
            }
            Geometry::MultiPolygon(multi) => {
                for polygon in multi {
                    check_encodable(record.name(), polygon)?;
                }
                for polygon in multi {
                    self.push(polygon.clone());
                }
                self.stats.flattened_records += 1;
                tracing::trace!(
                    name = record.name(),
                    parts = multi.0.len(),
                    "flattened multipolygon"
                );
            }
            other => {
                return Err(BoundaryError::InvalidGeometryKind {
                    name: record.name().to_string(),
                    kind: GeometryType::from_geometry(other),
                });
            }
        }
        self.stats.records += 1;
        Ok(())
    }

    /// Finish and return the merged multipolygon.
    pub fn finish(self) -> MultiPolygon<f64> {
        MultiPolygon::new(self.polygons)
    }

    fn push(&mut self, polygon: Polygon<f64>) {
        self.stats.polygons += 1;
        self.stats.rings += 1 + polygon.interiors().len() as u64;
        self.stats.coordinates += polygon.exterior().0.len() as u64;
        for ring in polygon.interiors() {
            self.stats.coordinates += ring.0.len() as u64;
        }
        self.polygons.push(polygon);
    }
}

fn check_encodable(name: &str, polygon: &Polygon<f64>) -> Result<()> {
    let unencodable = |reason: String| BoundaryError::UnencodableGeometry {
        name: name.to_string(),
        reason,
    };

    for (index, ring) in std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .enumerate()
    {
        let label = if index == 0 {
            "exterior ring".to_string()
        } else {
            format!("hole {index}")
        };
        if ring.0.is_empty() {
            return Err(unencodable(format!("{label} is empty")));
        }
        if let Some(c) = ring.0.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(unencodable(format!(
                "{label} has a non-finite coordinate ({} {})",
                c.x, c.y
            )));
        }
    }
    Ok(())
}

/// Aggregate records into one multipolygon in input order.
pub fn aggregate(records: &[PolygonRecord]) -> Result<MultiPolygon<f64>> {
    aggregate_with_stats(records).map(|(merged, _)| merged)
}

/// Aggregate records and return the collected statistics alongside.
pub fn aggregate_with_stats(
    records: &[PolygonRecord],
) -> Result<(MultiPolygon<f64>, AggregateStats)> {
    let mut aggregator = Aggregator::new();
    for record in records {
        aggregator.add(record)?;
    }
    let stats = aggregator.stats().clone();
    tracing::debug!(
        records = stats.records,
        polygons = stats.polygons,
        flattened = stats.flattened_records,
        "aggregated records"
    );
    Ok((aggregator.finish(), stats))
}
