use crate::cli::SelectionArgs;
use crate::config;
use crate::error::CliResult;
use crate::output::{self, RecordRow};
use statebounds_core::geometry::polygon_and_ring_counts;
use statebounds_core::{RecordSource, ShapefileSource};
use std::path::Path;

pub fn run(input: &Path, selection: &SelectionArgs, config_path: Option<&Path>) -> CliResult<()> {
    let pipeline_config = config::apply_selection(config::load_config(config_path)?, selection);
    pipeline_config.validate()?;
    let accepted = pipeline_config.accepted_names()?;

    let mut source = ShapefileSource::open(input, pipeline_config.name_field.clone())?;
    let records = source.read_records()?;

    let rows: Vec<RecordRow<'_>> = records
        .iter()
        .map(|record| {
            let (polygons, rings) = polygon_and_ring_counts(record.geometry());
            RecordRow {
                record,
                polygons,
                rings,
                accepted: accepted.contains(record.name()),
            }
        })
        .collect();
    let accepted_count = rows.iter().filter(|r| r.accepted).count();

    println!("Source:   {}", source.describe());
    println!("CRS:      {}", source.crs().unwrap_or("(unknown)"));
    println!("Records:  {} ({} accepted)", records.len(), accepted_count);
    println!("{}", output::format_records(&rows));
    Ok(())
}
