use clap::{Args, Parser, Subcommand};
use hydrostruct::core::hydraulics::friction::FrictionType;
use serde::Deserialize;
use serde::de::IntoDeserializer;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "hydrostruct developers",
    version,
    about = "hydrostruct CLI - imports legacy hydraulic-structure records into composite structures on network branches.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import the structures of a record bundle and print the resulting network.
    Import(ImportArgs),
    /// Report the locations of a record bundle that an import would skip.
    Check(CheckArgs),
}

/// Arguments for the `import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the record bundle (branches and legacy record sets) in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an import configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the friction type given to bridges and culverts without usable friction data.
    #[arg(long, value_name = "TYPE", value_parser = parse_friction_type)]
    pub friction_type: Option<FrictionType>,

    /// Override the friction value that goes with the default friction type.
    #[arg(long, value_name = "FLOAT")]
    pub friction_value: Option<f64>,

    /// Override the suffix appended to a location id to name its composite.
    #[arg(long, value_name = "TEXT")]
    pub composite_suffix: Option<String>,

    /// Run the import a second time against its own result.
    #[arg(long)]
    pub repeat: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the record bundle in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

fn parse_friction_type(value: &str) -> Result<FrictionType, String> {
    FrictionType::deserialize(value.into_deserializer())
        .map_err(|e: serde::de::value::Error| e.to_string())
}
