//! Multispec Core - multi-resolution banded power spectra
//!
//! This crate turns framed audio into a composite power spectrum in which each
//! frequency band is analysed with its own window length:
//!
//! - [`signal_bank`] - `(ear, channel, sample)` frame container
//! - [`fft`] - FFT engine seam, `rustfft` backend and analysis windows
//! - [`transform_pool`] - per-channel or shared FFT engines
//! - [`normalisation`] - power scaling conventions
//! - [`plan`] - bin selection, DC/Nyquist exclusion, per-band scaling
//! - [`power_spectrum`] - the configure/process stage
//! - [`framing`] - centred multi-window framing of raw signals
//! - [`config`] - parameters and their TOML file format
//!
//! ## Example Workflow
//!
//! ```rust
//! use multispec_core::{MultiWindowFramer, PowerSpectrum, PowerSpectrumConfig, SignalBank, Window};
//!
//! let fs = 32000.0;
//! let config = PowerSpectrumConfig::glasberg_moore_2002();
//! let framer = MultiWindowFramer::new(config.window_sizes.clone(), 32, Window::Hann, fs).unwrap();
//!
//! let mut spectrum = PowerSpectrum::from_config(config);
//! let shape = framer.output_shape(1);
//! spectrum.configure(&shape).unwrap();
//!
//! let signal = vec![0.0f32; 3200];
//! let mut frame = SignalBank::new(shape);
//! for index in 0..framer.frame_count(signal.len()) {
//!     framer.fill(&[&signal], index, &mut frame).unwrap();
//!     let powers = spectrum.process(&frame).unwrap();
//!     assert!(powers.ear(0).iter().all(|&p| p == 0.0));
//! }
//! ```

pub mod config;
pub mod error;
pub mod fft;
pub mod framing;
pub mod normalisation;
pub mod plan;
pub mod power_spectrum;
pub mod signal_bank;
pub mod transform_pool;

pub use config::PowerSpectrumConfig;
pub use error::{ConfigError, Result, SpectrumError};
pub use fft::{EngineFactory, RealFft, SpectrumEngine, Window, next_power_of_two, real_fft_factory};
pub use framing::MultiWindowFramer;
pub use normalisation::{DEFAULT_REFERENCE, Normalisation, power_db};
pub use plan::{ChannelPlan, SpectrumPlan, nyquist_index};
pub use power_spectrum::PowerSpectrum;
pub use signal_bank::{BankShape, SignalBank};
pub use transform_pool::TransformPool;
