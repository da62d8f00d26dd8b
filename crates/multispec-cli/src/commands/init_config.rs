//! Default configuration file generation.

use clap::Args;
use multispec_core::PowerSpectrumConfig;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output TOML file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    PowerSpectrumConfig::default().save(&args.output)?;
    println!("Wrote default configuration to {}", args.output.display());
    Ok(())
}
