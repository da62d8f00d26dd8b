//! Banded power spectrum of an audio file.

use super::common::SpectrumOptions;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use multispec_core::{MultiWindowFramer, PowerSpectrum, SignalBank, Window, power_db};
use multispec_io::{SpectrumCsvWriter, read_wav_ears, read_wav_info};
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    spectrum: SpectrumOptions,

    /// Hop between frames in samples (default: 1 ms)
    #[arg(long)]
    hop: Option<usize>,

    /// Maximum number of ears (file channels) to analyse
    #[arg(long, default_value = "2")]
    ears: usize,

    /// Analysis window function
    #[arg(long, default_value = "hann")]
    window: String,

    /// Output CSV file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write raw powers instead of dB to the CSV
    #[arg(long)]
    linear: bool,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = args.spectrum.load()?;

    println!("Analyzing {}...", args.input.display());
    let info = read_wav_info(&args.input)?;
    println!(
        "  {} samples, {} Hz, {} channel(s), {:.2}s",
        info.num_frames, info.spec.sample_rate, info.spec.channels, info.duration_secs
    );

    let (ears, spec) = read_wav_ears(&args.input, args.ears)?;
    let fs = f64::from(spec.sample_rate);
    let n_samples = ears.first().map_or(0, Vec::len);
    if n_samples == 0 {
        anyhow::bail!("{} contains no samples", args.input.display());
    }

    let window = Window::from_name(&args.window).unwrap_or_else(|| {
        tracing::warn!(window = %args.window, "unknown window, using Hann");
        Window::Hann
    });
    let hop = args.hop.unwrap_or_else(|| ((fs / 1000.0).round() as usize).max(1));

    let framer = MultiWindowFramer::new(config.window_sizes.clone(), hop, window, fs)?;
    let shape = framer.output_shape(ears.len());
    let mut spectrum = PowerSpectrum::from_config(config);
    let out_shape = spectrum.configure(&shape)?;
    tracing::info!(
        bins = out_shape.n_channels,
        hop,
        frame_rate = out_shape.frame_rate,
        "spectrum configured"
    );

    let plan = spectrum
        .plan()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("spectrum plan missing after configure"))?;

    let mut csv = match (&args.output, spectrum.output()) {
        (Some(path), Some(layout)) => Some(SpectrumCsvWriter::create(path, layout, !args.linear)?),
        _ => None,
    };

    let n_frames = framer.frame_count(n_samples);
    let pb = ProgressBar::new(n_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")?
            .progress_chars("##-"),
    );

    let views: Vec<&[f32]> = ears.iter().map(Vec::as_slice).collect();
    let mut frame = SignalBank::new(shape);
    let mut band_sums = vec![0.0f64; plan.channels.len()];

    for index in 0..n_frames {
        framer.fill(&views, index, &mut frame)?;
        let out = spectrum.process(&frame)?;

        for ear in 0..out.n_ears() {
            let powers = out.ear(ear);
            let mut start = 0;
            for (sum, band) in band_sums.iter_mut().zip(&plan.channels) {
                let end = start + band.width();
                *sum += powers[start..end].iter().map(|&p| f64::from(p)).sum::<f64>();
                start = end;
            }
        }

        if let Some(csv) = csv.as_mut() {
            csv.write_frame(framer.frame_time(index), out)?;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("\nMean band level over {} frames:", n_frames);
    println!("  {:>4}  {:>10}  {:>10}  {:>10}", "Band", "Low (Hz)", "High (Hz)", "Level (dB)");
    println!("  {:>4}  {:>10}  {:>10}  {:>10}", "----", "--------", "---------", "----------");
    let denom = (n_frames * ears.len()) as f64;
    for (i, (sum, band)) in band_sums.iter().zip(&plan.channels).enumerate() {
        println!(
            "  {:>4}  {:>10.1}  {:>10.1}  {:>10.1}",
            i,
            band.low_hz(),
            band.high_hz(),
            power_db((sum / denom) as f32)
        );
    }

    if let (Some(csv), Some(path)) = (csv, &args.output) {
        csv.finish()?;
        println!("\nWrote spectrum to {}", path.display());
    }

    Ok(())
}
