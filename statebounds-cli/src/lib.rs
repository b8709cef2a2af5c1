//! statebounds CLI library.
//!
//! This crate provides the argument types, command handlers, and output
//! formatting behind the `statebounds` binary. The pipeline itself lives in
//! `statebounds-core`; this crate only wires files, flags and config to it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use cli::{Cli, Commands};

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
pub fn run(cli: Cli) -> error::CliResult<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            input,
            output,
            selection,
            preview,
            require_matches,
        } => commands::run::run(
            &input,
            &output,
            &selection,
            preview.as_deref(),
            require_matches,
            config_path,
            cli.quiet,
        ),

        Commands::Inspect { input, selection } => {
            commands::inspect::run(&input, &selection, config_path)
        }

        Commands::Verify { wkt, json } => commands::verify::run(&wkt, json),

        Commands::Names { all_states } => commands::names::run(all_states, config_path),
    }
}
