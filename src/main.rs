use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medusa_config::Mode;
use medusa_config::cli::Output;

#[derive(Parser)]
#[command(name = "medusa-config")]
#[command(
    version,
    about = "Resolve and inspect the startup configuration of a Medusa backend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assembled configuration object
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "json",
            help = "Output format: json, yaml"
        )]
        format: String,
        #[arg(long, help = "Mode override: production, staging, test, development")]
        mode: Option<Mode>,
        #[arg(long, help = "Directory containing the env files (default: current dir)")]
        root: Option<PathBuf>,
    },

    /// Show which env file is selected for the current mode
    EnvFile {
        #[arg(long, help = "Mode override: production, staging, test, development")]
        mode: Option<Mode>,
        #[arg(long, help = "Directory containing the env files (default: current dir)")]
        root: Option<PathBuf>,
    },

    /// Validate an exported configuration file
    Check {
        #[arg(help = "Path to a JSON or YAML export")]
        file: PathBuf,
        #[arg(short = 'f', long, help = "Input format: json, yaml (default: from extension)")]
        format: Option<String>,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // Logs go to stderr so `show` output stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Show { format, mode, root } => {
            medusa_config::cli::commands::config::show(root, mode, &format)?;
        }
        Commands::EnvFile { mode, root } => {
            medusa_config::cli::commands::config::env_file(root, mode)?;
        }
        Commands::Check { file, format } => {
            medusa_config::cli::commands::config::check(&file, format.as_deref())?;
        }
    }

    Ok(())
}
