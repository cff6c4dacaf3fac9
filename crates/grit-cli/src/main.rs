//! Grit CLI - command-line front end for the grit distortion.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grit")]
#[command(author, version, about = "Click-free distortion for WAV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the distortion
    Process(commands::process::ProcessArgs),

    /// List the distortion's parameters
    Params(commands::params::ParamsArgs),

    /// List, show and export factory presets
    Presets(commands::presets::PresetsArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(&args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Info(args) => commands::info::run(&args),
    }
}
