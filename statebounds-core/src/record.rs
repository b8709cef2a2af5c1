//! Named boundary records.

use crate::error::{BoundaryError, Result};
use crate::geometry::GeometryType;
use geo_types::Geometry;

/// A named geometry read from a record source.
///
/// The name is checked once here; everything downstream trusts it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    name: String,
    geometry: Geometry<f64>,
}

impl PolygonRecord {
    /// Create a record. Fails if the name is empty.
    pub fn new(name: impl Into<String>, geometry: Geometry<f64>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BoundaryError::RecordSourceUnavailable(
                "record has an empty name".into(),
            ));
        }
        Ok(Self { name, geometry })
    }

    /// Record name, exactly as the source supplied it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record geometry.
    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// Geometry type of this record.
    pub fn geometry_type(&self) -> GeometryType {
        GeometryType::from_geometry(&self.geometry)
    }
}
