//! jdeps-guard CLI tool.
//!
//! Usage:
//! ```bash
//! jdeps-guard check [OPTIONS] <FACTS>
//! jdeps-guard list-rules
//! jdeps-guard init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod facts;

/// Judges dependencies on JDK-internal APIs reported by jdeps
#[derive(Parser)]
#[command(name = "jdeps-guard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge internal dependencies and fail on forbidden ones
    Check {
        /// JSON file mapping each type to its internal dependencies ("-" for stdin)
        facts: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the configured rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per internal dependency.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { facts, format } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            if commands::check::run(&facts, format, &source)? == commands::check::Outcome::Failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::list_rules::run(&source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
