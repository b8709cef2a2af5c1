//! WKT encoding and decoding of merged boundaries.
//!
//! The codec itself is pure: [`encode`] turns a multipolygon into text and
//! [`decode`] turns text back into a multipolygon. Coordinates are written
//! with Rust's shortest round-trip float formatting, so
//! `decode(&encode(&m))` reproduces `m` exactly for any multipolygon the
//! aggregator accepts.
//!
//! Decoding is strict: the text must hold exactly one two-dimensional
//! geometry, with nothing but whitespace around it.
//!
//! File helpers are kept separate from the codec and own their handles for
//! the duration of a single call.

use crate::error::{BoundaryError, Result};
use crate::geometry::GeometryType;
use geo_types::{Geometry, MultiPolygon};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Literal written for a multipolygon with no polygons.
pub const EMPTY_MULTIPOLYGON: &str = "MULTIPOLYGON EMPTY";

/// Encode a multipolygon as WKT.
pub fn encode(mp: &MultiPolygon<f64>) -> String {
    if mp.0.is_empty() {
        return EMPTY_MULTIPOLYGON.to_string();
    }
    mp.wkt_string()
}

/// Decode a `MULTIPOLYGON` WKT literal.
///
/// Leading and trailing whitespace is ignored. Any other geometry keyword,
/// and any Z or M ordinate, is rejected rather than coerced.
pub fn decode(text: &str) -> Result<MultiPolygon<f64>> {
    match parse_literal(text)? {
        Wkt::MultiPolygon(mp) => {
            let extra_ordinates = mp
                .0
                .iter()
                .flat_map(|polygon| &polygon.0)
                .flat_map(|ring| &ring.0)
                .any(|c| c.z.is_some() || c.m.is_some());
            if extra_ordinates {
                return Err(BoundaryError::MalformedWkt(
                    "MULTIPOLYGON must be two-dimensional (no Z or M ordinates)".into(),
                ));
            }
            Ok(mp.into())
        }
        other => Err(BoundaryError::MalformedWkt(format!(
            "expected MULTIPOLYGON, found {}",
            GeometryType::from_wkt(&other).wkt_keyword()
        ))),
    }
}

/// Parse WKT string to geo-types Geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>> {
    parse_literal(wkt).and_then(|w| {
        w.try_into()
            .map_err(|e: wkt::conversion::Error| BoundaryError::MalformedWkt(format!("{:?}", e)))
    })
}

fn parse_literal(text: &str) -> Result<Wkt<f64>> {
    let text = text.trim();
    check_extent(text)?;
    Wkt::<f64>::from_str(text).map_err(|e| BoundaryError::MalformedWkt(format!("{:?}", e)))
}

/// Reject text that does not end where its first geometry ends.
///
/// The `wkt` parser stops after one complete geometry and ignores whatever
/// follows, so trailing tokens and surplus closing parentheses are caught here.
fn check_extent(text: &str) -> Result<()> {
    let Some(open) = text.find('(') else {
        // `KEYWORD [Z|M|ZM] EMPTY` is the only form without parentheses
        let mut words = text.split_whitespace();
        let ends_empty = words
            .next_back()
            .is_some_and(|w| w.eq_ignore_ascii_case("EMPTY"));
        if ends_empty && (1..=2).contains(&words.count()) {
            return Ok(());
        }
        return Err(BoundaryError::MalformedWkt(format!(
            "expected a parenthesized geometry or EMPTY: {text:?}"
        )));
    };

    let mut depth = 0usize;
    for (offset, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let rest = text[open + offset + 1..].trim();
                    if rest.is_empty() {
                        return Ok(());
                    }
                    return Err(BoundaryError::MalformedWkt(format!(
                        "unexpected text after geometry: {rest:?}"
                    )));
                }
            }
            _ => {}
        }
    }
    Err(BoundaryError::MalformedWkt("unbalanced parentheses".into()))
}

/// Encode `mp` and write it to `path`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn write_wkt_file(path: &Path, mp: &MultiPolygon<f64>) -> Result<u64> {
    let text = encode(mp);
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote WKT file");
    Ok(text.len() as u64)
}

/// Read `path` and decode its contents.
pub fn read_wkt_file(path: &Path) -> Result<MultiPolygon<f64>> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read WKT file");
    decode(&text)
}
