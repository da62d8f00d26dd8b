//! Multi-resolution power spectrum.
//!
//! Each input channel holds one analysis window of a different length. The
//! [`PowerSpectrum`] transforms every channel with its own FFT size, keeps
//! only the bins of that channel's band and concatenates the bands into a
//! single composite spectrum per ear:
//!
//! ```text
//! channel 0 (long window)  ──FFT──► bins [lo0, hi0) ─┐
//! channel 1                ──FFT──► bins [lo1, hi1) ─┼─► [ band0 | band1 | … ]
//! channel N-1 (short)      ──FFT──► bins [loN, hiN) ─┘
//! ```
//!
//! Low bands get fine frequency resolution from long windows while high bands
//! keep good time resolution from short ones.
//!
//! # Example
//!
//! ```rust
//! use multispec_core::{BankShape, PowerSpectrum, SignalBank};
//!
//! let mut spectrum = PowerSpectrum::new(vec![20.0, 1000.0, 8000.0], vec![1024, 256], false);
//! let input = BankShape::new(1, 2, 1024, 32000.0);
//! let output = spectrum.configure(&input).unwrap();
//! assert_eq!(output.n_channels, 31 + 56);
//!
//! let frame = SignalBank::new(input);
//! let powers = spectrum.process(&frame).unwrap();
//! assert_eq!(powers.ear(0).len(), 87);
//! ```

use crate::config::PowerSpectrumConfig;
use crate::error::{Result, SpectrumError};
use crate::fft::{EngineFactory, real_fft_factory};
use crate::normalisation::Normalisation;
use crate::plan::SpectrumPlan;
use crate::signal_bank::{BankShape, SignalBank};
use crate::transform_pool::TransformPool;

/// State that only exists after a successful `configure`.
struct Configured {
    plan: SpectrumPlan,
    pool: TransformPool,
    output: SignalBank,
}

/// Banded power spectrum over multi-window input frames.
///
/// Call [`configure`](Self::configure) with the input shape before the first
/// [`process`](Self::process) and whenever the shape changes. Parameter
/// setters only take effect on the next `configure`.
pub struct PowerSpectrum {
    config: PowerSpectrumConfig,
    engine_factory: EngineFactory,
    state: Option<Configured>,
}

impl PowerSpectrum {
    /// Create a spectrum with average-power normalisation and a 2e-5
    /// reference.
    pub fn new(band_edges_hz: Vec<f64>, window_sizes: Vec<usize>, uniform_sampling: bool) -> Self {
        Self::from_config(
            PowerSpectrumConfig::new(band_edges_hz, window_sizes)
                .with_uniform_sampling(uniform_sampling),
        )
    }

    /// Create a spectrum from a full parameter set.
    pub fn from_config(config: PowerSpectrumConfig) -> Self {
        Self {
            config,
            engine_factory: real_fft_factory,
            state: None,
        }
    }

    /// Use a different FFT implementation.
    pub fn with_engine_factory(mut self, factory: EngineFactory) -> Self {
        self.engine_factory = factory;
        self
    }

    /// Current parameters (including changes not yet applied by `configure`).
    pub fn config(&self) -> &PowerSpectrumConfig {
        &self.config
    }

    /// Set the band edges in Hz.
    pub fn set_band_edges(&mut self, band_edges_hz: Vec<f64>) {
        self.config.band_edges_hz = band_edges_hz;
    }

    /// Set the window sizes in samples.
    pub fn set_window_sizes(&mut self, window_sizes: Vec<usize>) {
        self.config.window_sizes = window_sizes;
    }

    /// Share one frame-length FFT across all channels.
    pub fn set_uniform_sampling(&mut self, uniform: bool) {
        self.config.uniform_sampling = uniform;
    }

    /// Set the normalisation mode.
    pub fn set_normalisation(&mut self, normalisation: Normalisation) {
        self.config.normalisation = normalisation;
    }

    /// Set the reference amplitude.
    pub fn set_reference_value(&mut self, reference_value: f64) {
        self.config.reference_value = reference_value;
    }

    /// Validate the parameters against `input`, rebuild the transforms and
    /// size the output. Returns the output shape.
    ///
    /// On failure the previous configuration, if any, is kept.
    pub fn configure(&mut self, input: &BankShape) -> Result<BankShape> {
        let plan = SpectrumPlan::build(&self.config, input)?;

        let pool = if plan.uniform_sampling {
            TransformPool::shared(self.engine_factory, plan.channels[0].fft_size)
        } else {
            TransformPool::per_channel(self.engine_factory, &plan.fft_sizes())
        };

        tracing::debug!(
            engines = pool.engine_count(),
            shared = pool.is_shared(),
            "transform pool built"
        );

        // Nothing below can fail.
        let output_shape = plan.output_shape();
        let mut output = match self.state.take() {
            Some(previous) => {
                let mut bank = previous.output;
                bank.initialize(output_shape);
                bank
            }
            None => SignalBank::new(output_shape),
        };
        for (slot, &freq) in plan.centre_freqs.iter().enumerate() {
            output.set_centre_freq(slot, freq);
        }

        self.state = Some(Configured { plan, pool, output });
        Ok(output_shape)
    }

    /// Whether `configure` has succeeded at least once.
    pub fn is_configured(&self) -> bool {
        self.state.is_some()
    }

    /// Plan of the active configuration.
    pub fn plan(&self) -> Option<&SpectrumPlan> {
        self.state.as_ref().map(|s| &s.plan)
    }

    /// Most recent output frame.
    pub fn output(&self) -> Option<&SignalBank> {
        self.state.as_ref().map(|s| &s.output)
    }

    /// Compute the power spectrum of one frame.
    ///
    /// For each ear, channel `c` contributes
    /// `norm_factor[c] · (re² + im²)` for each of its bins, written
    /// channel-major into the output.
    pub fn process(&mut self, input: &SignalBank) -> Result<&SignalBank> {
        let Configured { plan, pool, output } =
            self.state.as_mut().ok_or(SpectrumError::NotConfigured)?;

        if !input.shape().same_layout(&plan.input) {
            return Err(SpectrumError::shape(format!(
                "frame is {} ears x {} channels x {} samples, configured for {} x {} x {}",
                input.n_ears(),
                input.n_channels(),
                input.n_samples(),
                plan.input.n_ears,
                plan.input.n_channels,
                plan.input.n_samples
            )));
        }

        for ear in 0..input.n_ears() {
            let out = output.ear_mut(ear);
            let mut cursor = 0;

            for (chn, band) in plan.channels.iter().enumerate() {
                let engine = pool.engine_for(chn);
                engine.process(&input.channel(ear, chn)[..band.window_size]);

                for bin in band.bins() {
                    let re = engine.real(bin);
                    let im = engine.imag(bin);
                    out[cursor] = (band.norm_factor * f64::from(re * re + im * im)) as f32;
                    cursor += 1;
                }
            }
        }

        Ok(output)
    }
}

impl std::fmt::Debug for PowerSpectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSpectrum")
            .field("config", &self.config)
            .field("plan", &self.plan())
            .finish()
    }
}
