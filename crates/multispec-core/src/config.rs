//! Power spectrum parameters and their TOML file format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result, SpectrumError};
use crate::normalisation::{DEFAULT_REFERENCE, Normalisation};

/// Caller-supplied parameters of a [`PowerSpectrum`](crate::PowerSpectrum).
///
/// Band `i` covers `[band_edges_hz[i], band_edges_hz[i + 1])` and is analysed
/// with a window of `window_sizes[i]` samples, so there is always one more
/// edge than there are windows.
///
/// # TOML Format
///
/// ```toml
/// band_edges_hz = [20.0, 1000.0, 8000.0]
/// window_sizes = [1024, 256]
/// uniform_sampling = false
/// normalisation = "average_power"
/// reference_value = 2e-5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerSpectrumConfig {
    /// Band boundaries in Hz (one more than the number of windows).
    pub band_edges_hz: Vec<f64>,

    /// Window length in samples per band, largest first.
    pub window_sizes: Vec<usize>,

    /// Share one FFT sized to the frame length across all bands.
    #[serde(default)]
    pub uniform_sampling: bool,

    /// Power scaling convention.
    #[serde(default)]
    pub normalisation: Normalisation,

    /// Reference amplitude for the power scaling.
    #[serde(default = "default_reference")]
    pub reference_value: f64,
}

fn default_reference() -> f64 {
    DEFAULT_REFERENCE
}

impl Default for PowerSpectrumConfig {
    fn default() -> Self {
        Self::glasberg_moore_2002()
    }
}

impl PowerSpectrumConfig {
    /// Create a config with default normalisation and reference value.
    pub fn new(band_edges_hz: Vec<f64>, window_sizes: Vec<usize>) -> Self {
        Self {
            band_edges_hz,
            window_sizes,
            uniform_sampling: false,
            normalisation: Normalisation::default(),
            reference_value: DEFAULT_REFERENCE,
        }
    }

    /// Six-band layout of the Glasberg & Moore (2002) time-varying loudness
    /// model: 64 ms down to 2 ms windows at 32 kHz.
    pub fn glasberg_moore_2002() -> Self {
        Self::new(
            vec![20.0, 80.0, 500.0, 1250.0, 2540.0, 4050.0, 15001.0],
            vec![2048, 1024, 512, 256, 128, 64],
        )
    }

    /// Set the uniform sampling flag.
    pub fn with_uniform_sampling(mut self, uniform: bool) -> Self {
        self.uniform_sampling = uniform;
        self
    }

    /// Set the normalisation mode.
    pub fn with_normalisation(mut self, normalisation: Normalisation) -> Self {
        self.normalisation = normalisation;
        self
    }

    /// Set the reference value.
    pub fn with_reference_value(mut self, reference_value: f64) -> Self {
        self.reference_value = reference_value;
        self
    }

    /// Number of bands (and therefore input channels).
    pub fn n_bands(&self) -> usize {
        self.window_sizes.len()
    }

    /// Largest window, i.e. the frame length the spectrum expects.
    pub fn largest_window(&self) -> usize {
        self.window_sizes.iter().copied().max().unwrap_or(0)
    }

    /// Check the parameters on their own, without an input shape.
    ///
    /// Edge count mismatches are reported as `ShapeMismatch`; ascending or
    /// zero windows, non-finite edges and bad reference values as
    /// `InvalidParameter`.
    pub fn validate(&self) -> Result<()> {
        let n = self.window_sizes.len();
        if self.band_edges_hz.len() != n + 1 {
            return Err(SpectrumError::shape(format!(
                "number of band edges ({}) should equal number of windows + 1 ({})",
                self.band_edges_hz.len(),
                n + 1
            )));
        }
        if let Some(i) = self.window_sizes.windows(2).position(|w| w[0] < w[1]) {
            return Err(SpectrumError::invalid(format!(
                "window lengths must be in descending order ({} < {} at index {})",
                self.window_sizes[i],
                self.window_sizes[i + 1],
                i
            )));
        }
        if n == 0 {
            return Err(SpectrumError::invalid("at least one window is required"));
        }
        if let Some(i) = self.window_sizes.iter().position(|&w| w == 0) {
            return Err(SpectrumError::invalid(format!("window {i} has zero length")));
        }
        if let Some(i) = self.band_edges_hz.iter().position(|f| !f.is_finite()) {
            return Err(SpectrumError::invalid(format!("band edge {i} is not finite")));
        }
        if !(self.reference_value.is_finite() && self.reference_value > 0.0) {
            return Err(SpectrumError::invalid(format!(
                "reference value must be positive, got {}",
                self.reference_value
            )));
        }
        Ok(())
    }

    /// Load a config from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_is_valid() {
        let config = PowerSpectrumConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_bands(), 6);
        assert_eq!(config.largest_window(), 2048);
        assert_eq!(config.normalisation, Normalisation::AveragePower);
        assert_eq!(config.reference_value, 2e-5);
        assert!(!config.uniform_sampling);
    }

    #[test]
    fn ascending_windows_rejected() {
        let config = PowerSpectrumConfig::new(vec![20.0, 500.0, 5000.0], vec![512, 1024]);
        assert!(matches!(
            config.validate(),
            Err(SpectrumError::InvalidParameter(_))
        ));
    }

    #[test]
    fn edge_count_mismatch_is_shape_error() {
        let config =
            PowerSpectrumConfig::new(vec![20.0, 500.0, 5000.0], vec![1024, 512, 256]);
        assert!(matches!(
            config.validate(),
            Err(SpectrumError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn zero_window_and_bad_reference_rejected() {
        let zero = PowerSpectrumConfig::new(vec![20.0, 500.0, 5000.0], vec![64, 0]);
        assert!(matches!(zero.validate(), Err(SpectrumError::InvalidParameter(_))));

        let bad_ref = PowerSpectrumConfig::new(vec![20.0, 500.0], vec![64])
            .with_reference_value(0.0);
        assert!(matches!(
            bad_ref.validate(),
            Err(SpectrumError::InvalidParameter(_))
        ));
    }

    #[test]
    fn non_monotonic_edges_pass_validation() {
        // Reversed edges only fail once the bins are computed
        let config = PowerSpectrumConfig::new(vec![1000.0, 20.0], vec![256]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_defaults_fill_optional_fields() {
        let config = PowerSpectrumConfig::from_toml(
            r#"
            band_edges_hz = [20.0, 1000.0, 8000.0]
            window_sizes = [1024, 256]
            "#,
        )
        .unwrap();
        assert_eq!(config.window_sizes, vec![1024, 256]);
        assert_eq!(config.normalisation, Normalisation::AveragePower);
        assert_eq!(config.reference_value, 2e-5);
    }

    #[test]
    fn toml_unknown_normalisation_falls_back_to_energy() {
        let config = PowerSpectrumConfig::from_toml(
            r#"
            band_edges_hz = [20.0, 1000.0]
            window_sizes = [1024]
            normalisation = "psd"
            "#,
        )
        .unwrap();
        assert_eq!(config.normalisation, Normalisation::Energy);
    }

    #[test]
    fn invalid_toml_config_is_rejected() {
        let err = PowerSpectrumConfig::from_toml(
            r#"
            band_edges_hz = [20.0, 1000.0]
            window_sizes = [256, 1024]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("spectrum.toml");

        let config = PowerSpectrumConfig::new(vec![20.0, 1000.0, 8000.0], vec![1024, 256])
            .with_uniform_sampling(true)
            .with_normalisation(Normalisation::None)
            .with_reference_value(1.0);
        config.save(&path).unwrap();

        let loaded = PowerSpectrumConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = PowerSpectrumConfig::load("/nonexistent/spectrum.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
