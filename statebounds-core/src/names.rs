//! Accepted state names and the name filter.
//!
//! Membership is an exact, case-sensitive string comparison against the
//! record's name. Names are never trimmed, folded, or otherwise normalized.

use crate::error::{BoundaryError, Result};
use crate::record::PolygonRecord;
use std::collections::BTreeSet;

/// The contiguous states, in the order the boundary pipeline has always listed them.
pub const CONUS_STATES: [&str; 48] = [
    "Alabama",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// States outside the contiguous set.
pub const NONCONTIGUOUS_STATES: [&str; 2] = ["Alaska", "Hawaii"];

/// Immutable set of accepted record names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    names: BTreeSet<String>,
}

impl NameSet {
    /// The 48 contiguous states.
    pub fn conus() -> Self {
        Self {
            names: CONUS_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// All 50 states.
    pub fn all_states() -> Self {
        Self {
            names: CONUS_STATES
                .iter()
                .chain(NONCONTIGUOUS_STATES.iter())
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Build a set from arbitrary names.
    ///
    /// Fails if the set would be empty or any name is the empty string.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(BoundaryError::Config(
                    "accepted names must not contain an empty string".into(),
                ));
            }
            set.insert(name);
        }
        if set.is_empty() {
            return Err(BoundaryError::Config(
                "accepted name set must not be empty".into(),
            ));
        }
        Ok(Self { names: set })
    }

    /// Exact membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Keep the records whose name is in `accepted`, preserving source order.
pub fn filter_records(records: &[PolygonRecord], accepted: &NameSet) -> Vec<PolygonRecord> {
    let kept: Vec<PolygonRecord> = records
        .iter()
        .filter(|record| {
            let keep = accepted.contains(record.name());
            tracing::debug!(name = record.name(), accepted = keep, "name filter");
            keep
        })
        .cloned()
        .collect();

    tracing::debug!(
        input = records.len(),
        accepted = kept.len(),
        "filtered records"
    );
    kept
}

/// Distinct record names that the filter rejected, in first-seen order.
pub fn rejected_names(records: &[PolygonRecord], accepted: &NameSet) -> Vec<String> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .map(PolygonRecord::name)
        .filter(|name| !accepted.contains(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
