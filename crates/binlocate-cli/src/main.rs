#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::fn_params_excessive_bools)]

mod commands;
mod logging;

use binlocate_core::{Config, Platform};
use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "binlocate")]
#[command(author, version, long_about = None)]
#[command(about = "Find the real script behind npm, pnpm and yarn launchers")]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Search this PATH value instead of the process PATH
    #[arg(long = "path", global = true, value_name = "PATH")]
    search_path: Option<String>,

    /// Apply the wrapper conventions of this platform (windows, posix)
    #[arg(long, global = true, env = "BINLOCATE_PLATFORM", value_name = "PLATFORM")]
    platform: Option<Platform>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve a binary or launcher path to the file it runs
    Resolve {
        /// Path to a binary, .cmd/.ps1 wrapper or shell shim
        bin: PathBuf,
    },

    /// Find a binary on PATH and resolve it
    Which {
        /// Binary name (e.g., "pnpm", "tsc")
        name: String,

        /// Report every match instead of the first
        #[arg(long)]
        all: bool,

        /// Print nothing and succeed when the binary is not found
        #[arg(long)]
        nothrow: bool,
    },

    /// Find the globally installed npm, pnpm or yarn, skipping node_modules/.bin
    Real {
        /// "npm", "pnpm", "yarn" or any other binary name
        name: String,
    },

    /// Resolve a binary from node_modules/.bin or PATH and run it
    Exec {
        /// Binary name to execute (e.g., "jest", "eslint", "tsc")
        binary: String,

        /// Arguments to pass to the binary (after --)
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Build config
    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_platform(cli.platform.unwrap_or_default())
        .with_search_path(cli.search_path);

    // Logs go to stderr; stdout carries only command output.
    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(config.platform, cli.json),
        Some(Commands::Resolve { bin }) => {
            let span = tracing::info_span!("resolve", cmd = "resolve", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::resolve::run(&config, &bin, cli.json)
        }
        Some(Commands::Which { name, all, nothrow }) => {
            let span = tracing::info_span!("which", cmd = "which", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::which::run(&config, &name, all, nothrow, cli.json)
        }
        Some(Commands::Real { name }) => {
            let span = tracing::info_span!("real", cmd = "real", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::real::run(&config, &name, cli.json)
        }
        Some(Commands::Exec { binary, args }) => {
            let span = tracing::info_span!("exec", cmd = "exec", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::exec::run(&config, &binary, &args, cli.json)
        }
    }
}
