//! Spur CLI - inspect the build-time optimizer pipeline.
//!
//! Provides `spur scan` to print the property-access plans computed from a
//! type model, and `spur inspect` to verify the synthesized artifacts in the
//! build output against their manifest.

#![warn(missing_docs)]

mod inspect;
mod logging;
mod project;
mod scan;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Spur: build-time specialization of construction and property access.
#[derive(Parser, Debug)]
#[command(name = "spur", version, about = "Spur optimizer build tooling")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `spur.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a type model and print its property-access plans.
    Scan(ScanArgs),
    /// Verify the synthesized artifacts in the build output.
    Inspect(InspectArgs),
}

/// Arguments for the `spur scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to the JSON type model.
    pub model: String,

    /// Override `build.property_order` from `spur.toml`.
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Custom access-strategy identifiers to accept (e.g., `--strategy com.acme.Audited`).
    #[arg(long = "strategy", num_args = 1..)]
    pub strategies: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `spur inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Build output directory (default: `artifacts.output_dir` from `spur.toml`).
    pub dir: Option<String>,

    /// Delete artifacts the manifest does not list.
    #[arg(long)]
    pub prune: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Property ordering selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Sort properties by name.
    Sorted,
    /// Keep the model's declaration order.
    Declared,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Scan(ref args) => scan::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
