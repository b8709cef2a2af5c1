use crate::cli::SelectionArgs;
use crate::config;
use crate::error::CliResult;
use std::path::Path;

/// Print the name set `run` and `inspect` would filter by.
pub fn run(all_states: bool, config_path: Option<&Path>) -> CliResult<()> {
    let selection = SelectionArgs {
        name_field: None,
        all_states,
    };
    let pipeline_config = config::apply_selection(config::load_config(config_path)?, &selection);
    for name in pipeline_config.accepted_names()?.iter() {
        println!("{name}");
    }
    Ok(())
}
