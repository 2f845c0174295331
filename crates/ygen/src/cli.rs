//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// ygen - generate YAML files from templates via interactive questions
#[derive(Parser, Debug)]
#[command(name = "ygen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config file (default: ./.ygen/config.yaml or ./.ygen/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer questions and generate files from a template
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Answer for a question, in key=value form (repeatable; multi-select
    /// values comma-separated)
    #[arg(long = "answer", value_name = "KEY=VALUE")]
    pub answers: Vec<String>,

    /// Skip prompts and use provided answers
    #[arg(short, long)]
    pub yes: bool,

    /// Show the preview but write nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate(ConfigValidateArgs),

    /// Show the normalized configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigValidateArgs {
    /// Path to config file (overrides --config)
    #[arg(short, long)]
    pub file: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
