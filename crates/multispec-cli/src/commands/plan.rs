//! Bin layout inspection.

use super::common::SpectrumOptions;
use clap::Args;
use multispec_core::{BankShape, SpectrumPlan};

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    spectrum: SpectrumOptions,

    /// Sample rate in Hz
    #[arg(long, default_value = "32000")]
    sample_rate: f64,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> anyhow::Result<()> {
    let config = args.spectrum.load()?;
    let shape = BankShape::new(
        1,
        config.n_bands(),
        config.largest_window(),
        args.sample_rate,
    );
    let plan = SpectrumPlan::build(&config, &shape)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "Spectrum plan at {} Hz ({}, reference {}, {})",
        args.sample_rate,
        config.normalisation,
        config.reference_value,
        if plan.uniform_sampling {
            "uniform sampling"
        } else {
            "per-band FFT"
        }
    );
    println!();
    println!(
        "  {:>4}  {:>6}  {:>6}  {:>11}  {:>10}  {:>10}  {:>8}  {:>12}",
        "Band", "Window", "FFT", "Bins", "Low (Hz)", "High (Hz)", "Res (Hz)", "Norm factor"
    );
    println!(
        "  {:>4}  {:>6}  {:>6}  {:>11}  {:>10}  {:>10}  {:>8}  {:>12}",
        "----", "------", "---", "----", "--------", "---------", "--------", "-----------"
    );
    for (i, band) in plan.channels.iter().enumerate() {
        println!(
            "  {:>4}  {:>6}  {:>6}  {:>11}  {:>10.2}  {:>10.2}  {:>8.2}  {:>12.4e}",
            i,
            band.window_size,
            band.fft_size,
            format!("{}..{}", band.bin_lo, band.bin_hi),
            band.low_hz(),
            band.high_hz(),
            band.resolution_hz(),
            band.norm_factor
        );
    }
    println!();
    println!("Total bins: {}", plan.total_bins);

    Ok(())
}
