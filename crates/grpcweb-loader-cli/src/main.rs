//! grpcweb-loader CLI - Host for the generation pipeline
//!
//! Commands:
//! - `grpcweb-loader generate` - Generate one artifact
//! - `grpcweb-loader batch` - Generate many artifacts concurrently
//! - `grpcweb-loader resolve` - Run the companion request a dependency reference names
//! - `grpcweb-loader check` - Validate grpcweb-loader.toml and locate the tools

use clap::{Parser, Subcommand};
use grpcweb_loader_core::{GenerationMode, LoaderError, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use config::ProjectConfig;

#[derive(Parser)]
#[command(name = "grpcweb-loader")]
#[command(author, version, about = "Generate grpc-web message codecs and service stubs", long_about = None)]
struct Cli {
    /// Path to grpcweb-loader.toml (default: ./grpcweb-loader.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the artifact for one schema file
    Generate {
        /// Schema file to compile
        source: PathBuf,

        /// Root import directory (overrides [options] basePath)
        #[arg(short, long)]
        base_path: Option<PathBuf>,

        /// What to generate: message or service
        #[arg(short, long)]
        mode: Option<GenerationMode>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate artifacts for many schema files concurrently
    Batch {
        /// Schema files to compile
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Root import directory (overrides [options] basePath)
        #[arg(short, long)]
        base_path: Option<PathBuf>,

        /// What to generate: message or service
        #[arg(short, long)]
        mode: Option<GenerationMode>,

        /// Directory artifacts are written to, at their module paths
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Generate the companion artifact named by a dependency reference
    Resolve {
        /// The JSON reference literal found in a service stub
        reference: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and locate the compiler and plugin
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let logging = grpcweb_loader_logging::init_logging(cli.log_level.unwrap_or_default());
    let config = ProjectConfig::load(cli.config.as_deref())?;
    // --log-level wins over the configuration file
    if let (None, Some(logging)) = (cli.log_level, &logging) {
        logging.reload_level(config.log_level()?)?;
    }

    match cli.command {
        Commands::Generate {
            source,
            base_path,
            mode,
            output,
        } => {
            commands::generate::run(&config, source, base_path, mode, output).await?;
        }
        Commands::Batch {
            sources,
            base_path,
            mode,
            out_dir,
        } => {
            commands::batch::run(&config, sources, base_path, mode, &out_dir).await?;
        }
        Commands::Resolve { reference, output } => {
            commands::resolve::run(&config, &reference, output).await?;
        }
        Commands::Check => {
            commands::check::run(&config, cli.config.as_deref()).await?;
        }
    }

    Ok(())
}

/// Exit status for a failed command: the loader error code when there is one
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<LoaderError>())
        .and_then(|e| u8::try_from(e.error_code()).ok())
        .unwrap_or(1)
}
