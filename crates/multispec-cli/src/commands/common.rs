//! Shared CLI helpers used across multiple commands.

use clap::Args;
use multispec_core::{Normalisation, PowerSpectrumConfig};
use std::path::PathBuf;

/// Spectrum parameters shared by `analyze` and `plan`.
#[derive(Args, Debug, Clone)]
pub struct SpectrumOptions {
    /// TOML configuration file (defaults to the Glasberg & Moore 2002 layout)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Share one frame-length FFT across all bands
    #[arg(long)]
    pub uniform: bool,

    /// Normalisation: none, energy or average_power
    #[arg(long)]
    pub normalisation: Option<String>,

    /// Reference amplitude for dB values
    #[arg(long)]
    pub reference: Option<f64>,
}

impl SpectrumOptions {
    /// Load the configuration file (or the default) and apply overrides.
    pub fn load(&self) -> anyhow::Result<PowerSpectrumConfig> {
        let mut config = match &self.config {
            Some(path) => PowerSpectrumConfig::load(path)?,
            None => PowerSpectrumConfig::default(),
        };

        if self.uniform {
            config.uniform_sampling = true;
        }
        if let Some(name) = &self.normalisation {
            config.normalisation = Normalisation::from_name(name);
        }
        if let Some(reference) = self.reference {
            config.reference_value = reference;
        }

        config.validate()?;
        Ok(config)
    }
}
