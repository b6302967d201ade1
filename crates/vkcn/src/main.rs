//! # vkcn
//!
//! Class naming linter for Vue Single File Components.
//!
//! ## Name Origin
//!
//! **vkcn** reads as "Vue Kebab Class Names": the one rule every other rule
//! here grows out of is that a component's classes are kebab-case names under
//! the component's own prefix.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "VKCN_LOG";

#[derive(Parser)]
#[command(name = "vkcn")]
#[command(about = "Class naming linter for Vue SFC files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug information to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Vue SFC files (default command)
    Lint(commands::lint::LintArgs),

    /// List the built-in rules
    Rules,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Some(Commands::Lint(args)) => commands::lint::run(args),
        Some(Commands::Rules) => commands::rules::run(),
        None => commands::lint::run(commands::lint::LintArgs::default()),
    };
    std::process::exit(code);
}
