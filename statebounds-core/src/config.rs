//! Pipeline configuration types.
//!
//! Defines which records are accepted, how the record source is read, and
//! how the optional map preview is rendered.

use crate::error::{BoundaryError, Result};
use crate::names::NameSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default attribute holding the state name in boundary shapefiles.
pub const DEFAULT_NAME_FIELD: &str = "STATE";

/// Which built-in name set to filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameSetKind {
    /// The 48 contiguous states.
    #[default]
    Conus,
    /// The contiguous states plus Alaska and Hawaii.
    AllStates,
}

/// Configuration for the map preview side artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Douglas-Peucker tolerance applied before rendering, in source units.
    /// Default: 0.001
    pub simplify_tolerance: f64,

    /// Map center as (lat, lng).
    /// Default: geographic center of the contiguous US
    pub center: (f64, f64),

    /// Initial zoom level.
    /// Default: 4
    pub zoom: u8,

    /// Fill color for state polygons.
    pub fill_color: String,

    /// Tile layer URL template.
    pub tile_url: String,

    /// Tile layer attribution.
    pub tile_attribution: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            simplify_tolerance: 0.001,
            center: (39.8283, -98.5795),
            zoom: 4,
            fill_color: "orange".to_string(),
            tile_url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
                .to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors &copy; CARTO".to_string(),
        }
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Attribute that carries the record name.
    pub name_field: String,

    /// Built-in name set, used when `names` is empty.
    pub name_set: NameSetKind,

    /// Explicit accepted names; overrides `name_set` when non-empty.
    pub names: Vec<String>,

    /// Fail with `NoMatchingRecords` when the filter accepts nothing.
    pub require_matches: bool,

    /// Where to write the map preview, if anywhere.
    pub preview_path: Option<PathBuf>,

    /// Map preview settings.
    pub preview: PreviewConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name_field: DEFAULT_NAME_FIELD.to_string(),
            name_set: NameSetKind::default(),
            names: Vec::new(),
            require_matches: false,
            preview_path: None,
            preview: PreviewConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the attribute carrying record names.
    pub fn with_name_field(mut self, field: impl Into<String>) -> Self {
        self.name_field = field.into();
        self
    }

    /// Select a built-in name set.
    pub fn with_name_set(mut self, kind: NameSetKind) -> Self {
        self.name_set = kind;
        self
    }

    /// Use an explicit list of accepted names.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Treat a zero-match filter result as an error.
    pub fn with_require_matches(mut self, require: bool) -> Self {
        self.require_matches = require;
        self
    }

    /// Write a map preview next to the WKT output.
    pub fn with_preview_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preview_path = Some(path.into());
        self
    }

    /// Set map preview settings.
    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    /// Build the accepted name set for this configuration.
    pub fn accepted_names(&self) -> Result<NameSet> {
        if self.names.is_empty() {
            return Ok(match self.name_set {
                NameSetKind::Conus => NameSet::conus(),
                NameSetKind::AllStates => NameSet::all_states(),
            });
        }
        NameSet::from_names(self.names.iter().cloned())
    }

    /// Check settings that would otherwise fail deep inside a run.
    pub fn validate(&self) -> Result<()> {
        if self.name_field.trim().is_empty() {
            return Err(BoundaryError::Config("name_field must not be empty".into()));
        }
        let tolerance = self.preview.simplify_tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(BoundaryError::Config(format!(
                "preview.simplify_tolerance must be a non-negative number, got {}",
                self.preview.simplify_tolerance
            )));
        }
        self.accepted_names().map(|_| ())
    }
}
