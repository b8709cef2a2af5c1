//! State boundary merging for statebounds.
//!
//! This crate turns a file of named state boundary polygons into one
//! multipolygon serialized as WKT, and proves the output reloads exactly.
//! It supports:
//!
//! - **Exact name filtering** against a fixed, immutable name set
//! - **Order-preserving aggregation** with multi-part records flattened
//! - **Lossless WKT round-tripping** of the merged geometry
//! - **Shapefile input** as a `.shp`, a directory, or a `.zip` archive
//!
//! # Architecture
//!
//! ```text
//!  ShapefileSource / MemorySource
//!               │  PolygonRecord { name, geometry }
//!               ▼
//!        filter_records ◄── NameSet
//!               │
//!       ┌───────┴────────┐
//!       ▼                ▼
//!   Aggregator      write_preview (GeoJSON / HTML, optional)
//!       │  MultiPolygon
//!       ▼
//!   wkt_codec::encode ──► file ──► wkt_codec::decode
//!                                        │
//!                                        ▼
//!                               verify_round_trip
//! ```
//!
//! # Modules
//!
//! - [`config`]: Pipeline and preview configuration
//! - [`names`]: Accepted name sets and the name filter
//! - [`record`]: Named boundary records
//! - [`source`]: Record sources (memory, shapefile)
//! - [`aggregate`]: Multipolygon aggregation
//! - [`wkt_codec`]: WKT encode/decode and file helpers
//! - [`verify`]: Structural round-trip comparison
//! - [`geometry`]: Geometry classification and summaries
//! - [`preview`]: Map preview rendering
//! - [`pipeline`]: End-to-end driver
//! - [`error`]: Error types

pub mod config;
pub mod error;

pub mod aggregate;
pub mod geometry;
pub mod names;
pub mod pipeline;
pub mod preview;
pub mod record;
pub mod source;
pub mod verify;
pub mod wkt_codec;

// Re-export key types
pub use aggregate::{aggregate, aggregate_with_stats, AggregateStats, Aggregator};
pub use config::{NameSetKind, PipelineConfig, PreviewConfig, DEFAULT_NAME_FIELD};
pub use error::{BoundaryError, Result};
pub use geometry::{BBox, GeometrySummary, GeometryType};
pub use names::{filter_records, rejected_names, NameSet};
pub use pipeline::{Pipeline, PipelineReport};
pub use record::PolygonRecord;
pub use source::{MemorySource, RecordSource, ShapefileSource};
pub use verify::verify_round_trip;
pub use wkt_codec::{decode, encode, read_wkt_file, write_wkt_file};
