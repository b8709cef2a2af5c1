use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "statebounds",
    about = "Merge state boundary polygons into one WKT multipolygon",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file (defaults to ./statebounds.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Record selection flags shared by commands that read a shapefile.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Attribute holding the state name
    #[arg(long)]
    pub name_field: Option<String>,

    /// Accept Alaska and Hawaii in addition to the contiguous states
    #[arg(long)]
    pub all_states: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter, merge, write and verify a WKT multipolygon
    Run {
        /// Shapefile (.shp), directory, or .zip archive
        input: PathBuf,

        /// Output WKT file
        output: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Also write a map preview (.html, or .geojson/.json for GeoJSON)
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Fail if no record matches the accepted names
        #[arg(long)]
        require_matches: bool,
    },

    /// List the records in a shapefile and whether each would be accepted
    Inspect {
        /// Shapefile (.shp), directory, or .zip archive
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Decode a WKT file and print a summary of its contents
    Verify {
        /// WKT file to decode
        wkt: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the accepted state names, after config file overrides
    Names {
        /// Include Alaska and Hawaii
        #[arg(long)]
        all_states: bool,
    },
}
