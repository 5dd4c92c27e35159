use clap::{Args, Parser, Subcommand, ValueEnum};
use protmod::core::models::category::{ModificationCategory, OccurrenceType};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "protmod - Look up protein modification definitions by RESID, PSI-MOD and PDB Chemical Component identifiers.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the platform configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read the catalog from this directory instead of the bundled copy.
    #[arg(long, global = true, value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Register the definitions of a TOML extension catalog. Can be used multiple times.
    #[arg(long = "extension", global = true, value_name = "PATH")]
    pub extensions: Vec<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.format=csv
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered modifications, optionally filtered.
    List(ListArgs),
    /// Show the modification(s) matching an identifier.
    Show(ShowArgs),
    /// Print every identifier of one lookup index, sorted.
    Ids(IdsArgs),
    /// Find modifications whose identifiers, names or description contain a text.
    Search(SearchArgs),
    /// Write all modifications to a CSV file.
    Export(ExportArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Toml,
    Csv,
}

/// Which identifier a lookup key is matched against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdKind {
    #[default]
    Id,
    Resid,
    Psimod,
    Pdbcc,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list modifications of this category (e.g., 'attachment', 'crosslink').
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<ModificationCategory>,

    /// Only list modifications of this occurrence type (e.g., 'natural', 'artifact').
    #[arg(long, value_name = "OCCURRENCE")]
    pub occurrence: Option<OccurrenceType>,

    /// Override `output.format` from the config file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// The identifier to look up.
    #[arg(required = true)]
    pub key: String,

    /// The kind of identifier given.
    #[arg(short, long, value_enum, default_value_t = IdKind::Id)]
    pub by: IdKind,

    /// Override `output.format` from the config file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `ids` subcommand.
#[derive(Args, Debug)]
pub struct IdsArgs {
    /// The index to enumerate.
    #[arg(value_enum)]
    pub scheme: IdKind,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive text to look for.
    #[arg(required = true)]
    pub query: String,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
