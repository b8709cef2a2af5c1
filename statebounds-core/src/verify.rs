//! Structural comparison of a reloaded multipolygon against the value that was written.

use crate::error::{BoundaryError, Result};
use geo_types::{LineString, MultiPolygon};

/// Check that `actual` has the same polygons, rings and coordinates as `expected`.
///
/// Coordinates are compared exactly. The error names the first difference.
pub fn verify_round_trip(expected: &MultiPolygon<f64>, actual: &MultiPolygon<f64>) -> Result<()> {
    if expected.0.len() != actual.0.len() {
        return Err(mismatch(format!(
            "polygon count {} != {}",
            expected.0.len(),
            actual.0.len()
        )));
    }

    for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        if e.interiors().len() != a.interiors().len() {
            return Err(mismatch(format!(
                "polygon {i}: ring count {} != {}",
                1 + e.interiors().len(),
                1 + a.interiors().len()
            )));
        }
        compare_ring(i, 0, e.exterior(), a.exterior())?;
        for (k, (er, ar)) in e.interiors().iter().zip(a.interiors()).enumerate() {
            compare_ring(i, k + 1, er, ar)?;
        }
    }
    Ok(())
}

fn compare_ring(
    polygon: usize,
    ring: usize,
    expected: &LineString<f64>,
    actual: &LineString<f64>,
) -> Result<()> {
    if expected.0.len() != actual.0.len() {
        return Err(mismatch(format!(
            "polygon {polygon} ring {ring}: coordinate count {} != {}",
            expected.0.len(),
            actual.0.len()
        )));
    }
    for (j, (e, a)) in expected.0.iter().zip(actual.0.iter()).enumerate() {
        if e != a {
            return Err(mismatch(format!(
                "polygon {polygon} ring {ring} coordinate {j}: ({} {}) != ({} {})",
                e.x, e.y, a.x, a.y
            )));
        }
    }
    Ok(())
}

fn mismatch(detail: String) -> BoundaryError {
    BoundaryError::RoundTripMismatch(detail)
}
