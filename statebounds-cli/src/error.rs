use colored::Colorize;
use statebounds_core::BoundaryError;
use std::fmt;
use std::process;

/// Exit codes for the CLI.
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
pub enum CliError {
    /// Error from the boundary pipeline.
    Boundary(BoundaryError),
    /// Configuration file issues.
    Config(String),
    /// Bad file path, unreadable input.
    Input(String),
    /// Argument / usage errors.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Boundary(BoundaryError::NoMatchingRecords) => write!(
                f,
                "{} no records matched the accepted state names\n  {} check --name-field, or drop --require-matches",
                "error:".red().bold(),
                "help:".cyan().bold(),
            ),
            CliError::Boundary(BoundaryError::InvalidGeometryKind { name, kind }) => write!(
                f,
                "{} record '{name}' has a {} geometry; only polygons can be merged",
                "error:".red().bold(),
                kind.wkt_keyword(),
            ),
            CliError::Boundary(e) => write!(f, "{} {e}", "error:".red().bold()),
            CliError::Config(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Input(msg) => write!(f, "{} {msg}", "error:".red().bold()),
            CliError::Usage(msg) => write!(f, "{} {msg}", "error:".red().bold()),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<BoundaryError> for CliError {
    fn from(e: BoundaryError) -> Self {
        match e {
            BoundaryError::Config(msg) => CliError::Config(msg),
            other => CliError::Boundary(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(format!("failed to parse config: {e}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Input(format!("JSON error: {e}"))
    }
}

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("{err}");
    let code = match &err {
        CliError::Usage(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    };
    process::exit(code)
}

pub type CliResult<T> = std::result::Result<T, CliError>;
