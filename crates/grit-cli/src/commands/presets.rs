//! Preset commands.
//!
//! Lists and shows factory presets and exports any preset to a TOML file
//! for editing.

use crate::commands::common::load_preset;
use clap::{Args, Subcommand};
use grit_config::{Preset, factory_presets};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show the settings of a preset
    Show {
        /// Factory preset name or TOML path
        name: String,
    },

    /// Write a preset to a TOML file
    Export {
        /// Factory preset name or TOML path
        name: String,

        /// Destination file
        #[arg(value_name = "OUT")]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => {
            list_presets();
            Ok(())
        }
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export { name, out, force } => export_preset(&name, &out, force),
    }
}

fn list_presets() {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:12} - {}", preset.name.to_lowercase(), desc);
    }
    println!();
    println!("Use one with: grit process in.wav out.wav --preset <name>");
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    print_preset(&preset);
    Ok(())
}

fn print_preset(preset: &Preset) {
    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    for (desc, value) in preset.settings.values() {
        println!("  {:10} {}", desc.name, desc.format_value(value));
    }
    println!("  {:10} {}", "Model", preset.settings.model);
    if preset.settings.bypassed {
        println!("  Bypassed");
    }
}

fn export_preset(name: &str, out: &Path, force: bool) -> anyhow::Result<()> {
    if out.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            out.display()
        );
    }

    let preset = load_preset(name)?;
    preset.save(out)?;
    tracing::info!(preset = %preset.name, path = %out.display(), "preset exported");
    println!("Wrote '{}' to {}", preset.name, out.display());
    Ok(())
}
