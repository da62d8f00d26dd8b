//! Power spectrum normalisation conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default reference amplitude (20 µPa), so powers read as sound pressure
/// levels once converted to dB.
pub const DEFAULT_REFERENCE: f64 = 2e-5;

/// How squared FFT magnitudes are scaled into power.
///
/// All modes divide by the squared reference amplitude `ref²`.
///
/// | Mode           | Factor                     |
/// |----------------|----------------------------|
/// | `None`         | `1 / ref²`                 |
/// | `Energy`       | `2 / (N · ref²)`           |
/// | `AveragePower` | `2 / (N · W · ref²)`       |
///
/// where `N` is the FFT size and `W` the window size.
///
/// Names are parsed leniently: an unrecognised name selects `Energy`
/// with a warning rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Normalisation {
    /// Raw squared magnitude relative to the reference.
    None,
    /// One-sided energy spectrum.
    Energy,
    /// One-sided energy averaged over the window length.
    #[default]
    AveragePower,
}

impl Normalisation {
    /// Scale factor applied to `re² + im²` for one channel.
    pub fn factor(self, fft_size: usize, window_size: usize, reference: f64) -> f64 {
        let ref_squared = reference * reference;
        match self {
            Normalisation::None => 1.0 / ref_squared,
            Normalisation::Energy => 2.0 / (fft_size as f64 * ref_squared),
            Normalisation::AveragePower => {
                2.0 / (fft_size as f64 * window_size as f64 * ref_squared)
            }
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Normalisation::None => "none",
            Normalisation::Energy => "energy",
            Normalisation::AveragePower => "average_power",
        }
    }

    /// Parse a mode name, falling back to `Energy` for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "none" => Normalisation::None,
            "energy" => Normalisation::Energy,
            "average_power" | "averagepower" => Normalisation::AveragePower,
            other => {
                tracing::warn!(mode = other, "unknown normalisation, using energy");
                Normalisation::Energy
            }
        }
    }
}

/// Power relative to the reference in dB, floored at -120 dB.
pub fn power_db(power: f32) -> f32 {
    10.0 * power.max(1e-12).log10()
}

impl From<String> for Normalisation {
    fn from(name: String) -> Self {
        Normalisation::from_name(&name)
    }
}

impl From<Normalisation> for String {
    fn from(mode: Normalisation) -> Self {
        mode.name().to_string()
    }
}

impl fmt::Display for Normalisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
