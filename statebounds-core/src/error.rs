//! Error types for the boundary pipeline.

use crate::geometry::GeometryType;
use thiserror::Error;

/// Boundary pipeline errors.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// Input container missing, corrupt, or unreadable.
    #[error("Record source unavailable: {0}")]
    RecordSourceUnavailable(String),

    /// A filtered record carries a geometry that is not a polygon or multipolygon.
    #[error("Invalid geometry kind for '{name}': expected Polygon or MultiPolygon, found {kind:?}")]
    InvalidGeometryKind { name: String, kind: GeometryType },

    /// A polygon the WKT codec cannot represent (empty ring, non-finite coordinate).
    #[error("Unencodable geometry for '{name}': {reason}")]
    UnencodableGeometry { name: String, reason: String },

    /// WKT text does not match the MULTIPOLYGON grammar.
    #[error("Malformed WKT: {0}")]
    MalformedWkt(String),

    /// Reloaded geometry differs from the geometry that was written.
    #[error("Round-trip mismatch: {0}")]
    RoundTripMismatch(String),

    /// The name filter accepted nothing and the caller asked for at least one match.
    #[error("No records matched the accepted name set")]
    NoMatchingRecords,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing or reading output files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for boundary operations.
pub type Result<T> = std::result::Result<T, BoundaryError>;
