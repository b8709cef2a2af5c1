use crate::cli::SelectionArgs;
use crate::error::{CliError, CliResult};
use statebounds_core::{NameSetKind, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "statebounds.toml";

/// Resolve which config file to read, if any.
///
/// An explicit `--config` must exist. Without one, `./statebounds.toml` is
/// used when present.
fn resolve_config_path(explicit: Option<&Path>) -> CliResult<Option<PathBuf>> {
    if let Some(p) = explicit {
        if p.is_file() {
            return Ok(Some(p.to_path_buf()));
        }
        return Err(CliError::Config(format!(
            "config file not found: {}",
            p.display()
        )));
    }

    let local = std::env::current_dir()?.join(CONFIG_FILE);
    Ok(local.is_file().then_some(local))
}

/// Load the pipeline configuration from disk, falling back to defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<PipelineConfig> {
    let Some(path) = resolve_config_path(explicit)? else {
        return Ok(PipelineConfig::default());
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
    let config: PipelineConfig = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Apply command-line selection flags on top of file configuration.
pub fn apply_selection(mut config: PipelineConfig, selection: &SelectionArgs) -> PipelineConfig {
    if let Some(field) = &selection.name_field {
        config = config.with_name_field(field.clone());
    }
    if selection.all_states {
        config = config.with_name_set(NameSetKind::AllStates);
    }
    config
}
