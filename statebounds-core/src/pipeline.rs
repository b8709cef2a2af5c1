//! End-to-end boundary pipeline.
//!
//! read records → filter by name → aggregate → (preview) → encode → write →
//! read back → decode → verify.
//!
//! Every stage is synchronous and runs once; the first failure ends the run.
//! Nothing is written to disk until aggregation has accepted every record.

use crate::aggregate::{aggregate_with_stats, AggregateStats};
use crate::config::PipelineConfig;
use crate::error::{BoundaryError, Result};
use crate::geometry::GeometrySummary;
use crate::names::{filter_records, rejected_names};
use crate::preview::write_preview;
use crate::source::RecordSource;
use crate::verify::verify_round_trip;
use crate::wkt_codec::{read_wkt_file, write_wkt_file};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Description of the record source.
    pub source: String,

    /// CRS reported by the source, passed through untouched.
    pub crs: Option<String>,

    /// Number of records read.
    pub records_read: usize,

    /// Number of records accepted by the name filter.
    pub records_accepted: usize,

    /// Distinct names the filter rejected, in first-seen order.
    pub rejected_names: Vec<String>,

    /// Aggregation statistics.
    pub aggregate: AggregateStats,

    /// Path of the WKT output.
    pub output: PathBuf,

    /// Bytes written to the WKT output.
    pub bytes_written: u64,

    /// Path of the map preview, if one was written.
    pub preview: Option<PathBuf>,

    /// Summary of the reloaded multipolygon.
    pub summary: GeometrySummary,
}

/// Boundary pipeline driver.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage against `source`, writing the merged WKT to `output`.
    pub fn run(&self, source: &mut dyn RecordSource, output: &Path) -> Result<PipelineReport> {
        self.config.validate()?;
        let accepted_names = self.config.accepted_names()?;

        let records = source.read_records()?;
        let crs = source.crs().map(str::to_string);
        tracing::info!(
            source = %source.describe(),
            records = records.len(),
            crs = crs.as_deref().unwrap_or("(unknown)"),
            "read records"
        );

        let accepted = filter_records(&records, &accepted_names);
        let rejected = rejected_names(&records, &accepted_names);
        tracing::info!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "filtered records by name"
        );
        if accepted.is_empty() {
            if self.config.require_matches {
                return Err(BoundaryError::NoMatchingRecords);
            }
            tracing::warn!("no records matched the accepted name set");
        }

        let (merged, stats) = aggregate_with_stats(&accepted)?;
        tracing::info!(polygons = stats.polygons, rings = stats.rings, "aggregated");

        let preview = match &self.config.preview_path {
            Some(path) => {
                write_preview(path, &accepted, &self.config.preview)?;
                Some(path.clone())
            }
            None => None,
        };

        let bytes_written = write_wkt_file(output, &merged)?;
        let reloaded = read_wkt_file(output)?;
        verify_round_trip(&merged, &reloaded)?;
        tracing::info!(
            path = %output.display(),
            bytes = bytes_written,
            "wrote and verified WKT"
        );

        Ok(PipelineReport {
            source: source.describe(),
            crs,
            records_read: records.len(),
            records_accepted: accepted.len(),
            rejected_names: rejected,
            aggregate: stats,
            output: output.to_path_buf(),
            bytes_written,
            preview,
            summary: GeometrySummary::compute(&reloaded),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NameSetKind;
    use crate::record::PolygonRecord;
    use crate::source::MemorySource;
    use crate::wkt_codec::decode;
    use geo_types::{polygon, Geometry, LineString, MultiPolygon, Polygon};

    fn square(x: f64, y: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + 1.5, y: y),
            (x: x + 1.5, y: y + 1.25),
            (x: x, y: y + 1.25),
            (x: x, y: y),
        ]
    }

    fn source(records: Vec<(&str, Geometry<f64>)>) -> MemorySource {
        MemorySource::new(
            records
                .into_iter()
                .map(|(name, geom)| PolygonRecord::new(name, geom).unwrap())
                .collect(),
        )
        .with_crs("EPSG:4269")
    }

    #[test]
    fn test_two_state_run() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("us-boundaries.wkt");
        let a = square(-88.0, 31.0);
        let b = square(-110.0, 41.0);
        let mut src = source(vec![
            ("Alabama", a.clone().into()),
            ("Puerto Rico", square(-66.0, 18.0).into()),
            ("Wyoming", b.clone().into()),
        ]);

        let report = Pipeline::default().run(&mut src, &output).unwrap();
        assert_eq!(report.records_read, 3);
        assert_eq!(report.records_accepted, 2);
        assert_eq!(report.rejected_names, vec!["Puerto Rico".to_string()]);
        assert_eq!(report.crs.as_deref(), Some("EPSG:4269"));
        assert_eq!(report.aggregate.polygons, 2);
        assert_eq!(report.summary.polygons, 2);

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.len() as u64, report.bytes_written);
        assert_eq!(decode(&text).unwrap(), MultiPolygon::new(vec![a, b]));
    }

    #[test]
    fn test_zero_matches_writes_empty() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.wkt");
        let mut src = source(vec![("Ontario", square(0.0, 0.0).into())]);

        let report = Pipeline::default().run(&mut src, &output).unwrap();
        assert_eq!(report.records_accepted, 0);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "MULTIPOLYGON EMPTY"
        );
    }

    #[test]
    fn test_zero_matches_can_be_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.wkt");
        let mut src = source(vec![("Ontario", square(0.0, 0.0).into())]);
        let pipeline = Pipeline::new(PipelineConfig::default().with_require_matches(true));

        let err = pipeline.run(&mut src, &output).unwrap_err();
        assert!(matches!(err, BoundaryError::NoMatchingRecords));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_geometry_stops_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wkt");
        let line = LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]);
        let mut src = source(vec![
            ("Alabama", square(0.0, 0.0).into()),
            ("Texas", line.into()),
        ]);

        let preview = dir.path().join("map.geojson");
        let pipeline = Pipeline::new(PipelineConfig::default().with_preview_path(&preview));

        let err = pipeline.run(&mut src, &output).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidGeometryKind { .. }));
        assert!(!output.exists());
        assert!(!preview.exists());
    }

    #[test]
    fn test_unencodable_polygon_stops_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wkt");
        let preview = dir.path().join("map.html");
        let hollow = Polygon::new(
            square(0.0, 0.0).exterior().clone(),
            vec![LineString::new(vec![])],
        );
        let mut src = source(vec![
            ("Alabama", square(5.0, 0.0).into()),
            ("Texas", hollow.into()),
        ]);
        let pipeline = Pipeline::new(PipelineConfig::default().with_preview_path(&preview));

        let err = pipeline.run(&mut src, &output).unwrap_err();
        match err {
            BoundaryError::UnencodableGeometry { name, .. } => assert_eq!(name, "Texas"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!output.exists());
        assert!(!preview.exists());
    }

    #[test]
    fn test_all_states_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wkt");
        let preview = dir.path().join("map.html");
        let islands = MultiPolygon::new(vec![square(-160.0, 21.0), square(-157.0, 20.0)]);
        let mut src = source(vec![
            ("Hawaii", islands.into()),
            ("Ohio", square(-84.0, 39.0).into()),
        ]);

        let conus = Pipeline::default().run(&mut src, &output).unwrap();
        assert_eq!(conus.aggregate.polygons, 1);

        let config = PipelineConfig::default()
            .with_name_set(NameSetKind::AllStates)
            .with_preview_path(&preview);
        let all = Pipeline::new(config).run(&mut src, &output).unwrap();
        assert_eq!(all.records_accepted, 2);
        assert_eq!(all.aggregate.polygons, 3);
        assert_eq!(all.aggregate.flattened_records, 1);
        assert_eq!(all.preview.as_deref(), Some(preview.as_path()));
        assert!(preview.exists());
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wkt");
        let mut src = source(vec![("Ohio", square(0.0, 0.0).into())]);
        let pipeline = Pipeline::new(PipelineConfig::default().with_name_field(""));

        let err = pipeline.run(&mut src, &output).unwrap_err();
        assert!(matches!(err, BoundaryError::Config(_)));
    }
}
