//! Parameter layout listing command.

use clap::Args;
use grit_config::{PARAMETER_LAYOUT, ParamDescriptor};
use grit_core::{DistortionModel, RAMP_SECONDS};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show a single parameter by id
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    if let Some(id) = &args.param {
        let desc = grit_config::find_param(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {id}"))?;
        show_param(desc);
        return Ok(());
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:10}  {:10}  {:>8}  {:>8}  {:>8}  {}",
        "Id", "Name", "Min", "Max", "Default", "Unit"
    );
    println!(
        "  {:10}  {:10}  {:>8}  {:>8}  {:>8}  {}",
        "--", "----", "---", "---", "-------", "----"
    );
    for desc in &PARAMETER_LAYOUT {
        println!(
            "  {:10}  {:10}  {:>8}  {:>8}  {:>8}  {}",
            desc.id,
            desc.name,
            desc.min,
            desc.max,
            desc.default,
            desc.unit.label()
        );
    }

    println!();
    println!("Models:");
    for model in DistortionModel::ALL {
        let note = if model.is_implemented() {
            ""
        } else {
            " (renders as hard_clip)"
        };
        println!("  {model}{note}");
    }

    println!();
    println!(
        "Every change ramps linearly over {:.0} ms.",
        RAMP_SECONDS * 1000.0
    );
    Ok(())
}

fn show_param(desc: &ParamDescriptor) {
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  Id:      {}", desc.id);
    println!("  Range:   {} .. {}", desc.format_value(desc.min), desc.format_value(desc.max));
    println!("  Default: {}", desc.format_value(desc.default));
    println!("  Step:    {}", desc.step);
    println!();
    println!("Example usage:");
    println!();
    println!(
        "  grit process input.wav output.wav --param {}={}",
        desc.id, desc.default
    );
}
