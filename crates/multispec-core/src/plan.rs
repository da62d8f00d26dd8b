//! Bin selection and scaling derived at configure time.
//!
//! A band `[lo_hz, hi_hz)` analysed with an FFT of size `N` at sample rate
//! `fs` selects bins
//!
//! ```text
//! bin_lo = ceil(lo_hz · N / fs)
//! bin_hi = ceil(hi_hz · N / fs)      (exclusive)
//! ```
//!
//! i.e. every bin whose centre frequency `k · fs / N` lies in the band, not the
//! nearest bins to the edges. A bin centred exactly on `hi_hz` is excluded.
//! DC is never selected (`bin_lo` is raised to 1) and neither is anything at
//! or above the Nyquist index `N/2 + N%2`. Both adjustments are warnings; a
//! band left with no bins is an error.

use serde::Serialize;
use std::ops::Range;

use crate::config::PowerSpectrumConfig;
use crate::error::{Result, SpectrumError};
use crate::fft::next_power_of_two;
use crate::signal_bank::BankShape;

/// Bin range and scaling for one input channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelPlan {
    /// Transform size used for this channel.
    pub fft_size: usize,
    /// Number of input samples fed to the transform.
    pub window_size: usize,
    /// First selected bin.
    pub bin_lo: usize,
    /// One past the last selected bin.
    pub bin_hi: usize,
    /// Factor applied to `re² + im²`.
    pub norm_factor: f64,
    /// Sample rate the bins refer to.
    pub fs: f64,
}

impl ChannelPlan {
    /// Selected bin indices.
    pub fn bins(&self) -> Range<usize> {
        self.bin_lo..self.bin_hi
    }

    /// Number of selected bins.
    pub fn width(&self) -> usize {
        self.bin_hi - self.bin_lo
    }

    /// Centre frequency of bin `k` in Hz.
    pub fn bin_freq(&self, k: usize) -> f64 {
        k as f64 * self.fs / self.fft_size as f64
    }

    /// Centre frequency of the lowest selected bin.
    pub fn low_hz(&self) -> f64 {
        self.bin_freq(self.bin_lo)
    }

    /// Centre frequency of the highest selected bin.
    pub fn high_hz(&self) -> f64 {
        self.bin_freq(self.bin_hi - 1)
    }

    /// Bin spacing in Hz.
    pub fn resolution_hz(&self) -> f64 {
        self.fs / self.fft_size as f64
    }
}

/// First bin index at or above the Nyquist frequency for a transform size.
pub fn nyquist_index(fft_size: usize) -> usize {
    fft_size / 2 + fft_size % 2
}

/// `ceil(freq_hz · fft_size / fs)` as a signed bin index.
fn ceil_bin(freq_hz: f64, fft_size: usize, fs: f64) -> i64 {
    (freq_hz * fft_size as f64 / fs).ceil() as i64
}

/// Everything a power spectrum derives from its parameters and input shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumPlan {
    /// Per-channel bin ranges, in channel order.
    pub channels: Vec<ChannelPlan>,
    /// Centre frequency of every output slot, channel-major.
    pub centre_freqs: Vec<f64>,
    /// Output width (sum of channel widths).
    pub total_bins: usize,
    /// Whether one transform is shared by all channels.
    pub uniform_sampling: bool,
    /// Shape of the input the plan was built for.
    #[serde(skip)]
    pub input: BankShape,
}

impl SpectrumPlan {
    /// Validate `config` against `input` and derive the plan.
    ///
    /// Fails with `ShapeMismatch` when the channel or edge counts disagree,
    /// `InvalidParameter` for out-of-domain values, and `EmptyBand` when a
    /// channel selects no bins.
    pub fn build(config: &PowerSpectrumConfig, input: &BankShape) -> Result<Self> {
        let n_windows = config.window_sizes.len();
        if input.n_channels != n_windows {
            return Err(SpectrumError::shape(format!(
                "number of channels ({}) does not match number of windows ({})",
                input.n_channels, n_windows
            )));
        }
        config.validate()?;

        if input.n_ears == 0 {
            return Err(SpectrumError::invalid("input has no ears"));
        }
        if !(input.fs.is_finite() && input.fs > 0.0) {
            return Err(SpectrumError::invalid(format!(
                "sample rate must be positive, got {}",
                input.fs
            )));
        }
        let largest_window = config.largest_window();
        if largest_window > input.n_samples {
            return Err(SpectrumError::invalid(format!(
                "largest window ({}) exceeds samples per channel ({})",
                largest_window, input.n_samples
            )));
        }

        let fs = input.fs;
        let fft_sizes: Vec<usize> = if config.uniform_sampling {
            vec![next_power_of_two(input.n_samples); n_windows]
        } else {
            config
                .window_sizes
                .iter()
                .map(|&w| next_power_of_two(w))
                .collect()
        };

        let mut channels = Vec::with_capacity(n_windows);
        let mut total_bins = 0;
        for (i, (&fft_size, &window_size)) in
            fft_sizes.iter().zip(&config.window_sizes).enumerate()
        {
            let mut bin_lo = ceil_bin(config.band_edges_hz[i], fft_size, fs);
            let mut bin_hi = ceil_bin(config.band_edges_hz[i + 1], fft_size, fs);

            let nyquist = nyquist_index(fft_size) as i64;
            if bin_lo <= 0 {
                tracing::warn!(band = i, "DC found, excluding");
                bin_lo = 1;
            }
            if bin_hi > nyquist {
                tracing::warn!(band = i, bin_hi, nyquist, "bin is >= Nyquist, excluding");
                bin_hi = nyquist;
            }
            if bin_hi <= bin_lo {
                return Err(SpectrumError::EmptyBand {
                    channel: i,
                    bin_lo,
                    bin_hi,
                });
            }

            let norm_factor =
                config
                    .normalisation
                    .factor(fft_size, window_size, config.reference_value);
            tracing::debug!(band = i, fft_size, norm_factor, "normalisation factor");

            let channel = ChannelPlan {
                fft_size,
                window_size,
                bin_lo: bin_lo as usize,
                bin_hi: bin_hi as usize,
                norm_factor,
                fs,
            };
            tracing::debug!(
                band = i,
                low_hz = channel.low_hz(),
                high_hz = channel.high_hz(),
                "included frequencies"
            );
            total_bins += channel.width();
            channels.push(channel);
        }
        tracing::debug!(total_bins, "total number of bins in the output spectrum");

        let centre_freqs = channels
            .iter()
            .flat_map(|c| c.bins().map(move |k| c.bin_freq(k)))
            .collect();

        Ok(Self {
            channels,
            centre_freqs,
            total_bins,
            uniform_sampling: config.uniform_sampling,
            input: *input,
        })
    }

    /// Transform size of each channel.
    pub fn fft_sizes(&self) -> Vec<usize> {
        self.channels.iter().map(|c| c.fft_size).collect()
    }

    /// Shape of the spectrum frames this plan produces: one sample per bin,
    /// frame rate passed through from the input.
    pub fn output_shape(&self) -> BankShape {
        BankShape {
            n_ears: self.input.n_ears,
            n_channels: self.total_bins,
            n_samples: 1,
            fs: self.input.fs,
            frame_rate: self.input.frame_rate,
        }
    }
}
