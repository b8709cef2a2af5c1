use crate::cli::SelectionArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output;
use statebounds_core::{Pipeline, ShapefileSource};
use std::fs;
use std::path::Path;

pub fn run(
    input: &Path,
    output_path: &Path,
    selection: &SelectionArgs,
    preview: Option<&Path>,
    require_matches: bool,
    config_path: Option<&Path>,
    quiet: bool,
) -> CliResult<()> {
    if same_file(input, output_path) {
        return Err(CliError::Usage(
            "output path must differ from the input path".into(),
        ));
    }

    let mut pipeline_config = config::apply_selection(config::load_config(config_path)?, selection);
    if let Some(p) = preview {
        pipeline_config = pipeline_config.with_preview_path(p);
    }
    if require_matches {
        pipeline_config = pipeline_config.with_require_matches(true);
    }

    let mut source = ShapefileSource::open(input, pipeline_config.name_field.clone())?;
    let report = Pipeline::new(pipeline_config).run(&mut source, output_path)?;

    if quiet {
        println!("{}", report.output.display());
    } else {
        println!("{}", output::format_report(&report));
    }
    Ok(())
}

/// Whether two paths name the same file, allowing for `./`, `..` and symlinks.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
