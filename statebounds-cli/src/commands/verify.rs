use crate::error::CliResult;
use crate::output;
use statebounds_core::{read_wkt_file, GeometrySummary};
use std::path::Path;

pub fn run(wkt: &Path, json: bool) -> CliResult<()> {
    let merged = read_wkt_file(wkt)?;
    let summary = GeometrySummary::compute(&merged);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("File:           {}", wkt.display());
        println!("{}", output::format_summary(&summary));
    }
    Ok(())
}
