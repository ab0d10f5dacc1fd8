//! gitsweeper CLI - clean up remote branches already merged into master

mod cli;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cli::{CleanupOptions, PreviewOptions, TargetOverrides};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Commit the binary was built from, when the build provides it
const BUILD_COMMIT: &str = match option_env!("GITSWEEPER_BUILD_COMMIT") {
    Some(commit) => commit,
    None => "development",
};

#[derive(Parser)]
#[command(name = "gitsweeper")]
#[command(about = "A command-line tool for cleaning up merged branches")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the remote branches that have been merged into master
    Preview {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the remote branches that have been merged into master
    Cleanup {
        #[command(flatten)]
        target: TargetArgs,

        /// Delete without asking for confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show the version and the commit it was built from
    Version,
}

#[derive(Args, Debug, Clone, Default)]
struct TargetArgs {
    /// Name of the remote to clean up
    #[arg(long)]
    origin: Option<String>,

    /// Name of the master branch
    #[arg(long)]
    master: Option<String>,

    /// Comma-separated branch names to leave alone
    #[arg(long)]
    skip: Option<String>,
}

impl From<TargetArgs> for TargetOverrides {
    fn from(args: TargetArgs) -> Self {
        Self {
            origin: args.origin,
            master: args.master,
            skip: args.skip,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
        Some(Commands::Version) => {
            anstream::println!("{} {BUILD_COMMIT}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Preview { target, json }) => {
            cli::run_preview(&path, &target.into(), PreviewOptions { json }).await
        }
        Some(Commands::Cleanup { target, force }) => {
            cli::run_cleanup(&path, &target.into(), CleanupOptions { force }).await
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--debug`
fn init_tracing(debug: bool) {
    let default_level = if debug { "gitsweeper=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if debug {
        info!("--debug setting detected - Info level logs enabled");
    }
}
