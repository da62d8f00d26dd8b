//! Error types for spectrum configuration, processing and config files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running a [`PowerSpectrum`](crate::PowerSpectrum).
///
/// All variants are fatal to the call that produced them. A failed
/// `configure` leaves any previous configuration in place.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectrumError {
    /// Channel, band-edge or frame shape does not match the parameters.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A parameter value is out of its accepted domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A channel selects no bins once DC and Nyquist are excluded.
    #[error("no components found in band {channel} (bins {bin_lo}..{bin_hi})")]
    EmptyBand {
        /// Index of the offending channel.
        channel: usize,
        /// Lower bin index after clamping.
        bin_lo: i64,
        /// Exclusive upper bin index after clamping.
        bin_hi: i64,
    },

    /// `process` was called before a successful `configure`.
    #[error("power spectrum is not configured")]
    NotConfigured,
}

impl SpectrumError {
    /// Create a shape mismatch error.
    pub fn shape(msg: impl Into<String>) -> Self {
        SpectrumError::ShapeMismatch(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        SpectrumError::InvalidParameter(msg.into())
    }
}

/// Convenience result type for spectrum operations.
pub type Result<T> = std::result::Result<T, SpectrumError>;

/// Errors that can occur while loading or saving a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a configuration file failed.
    #[error("cannot read config '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a configuration file failed.
    #[error("cannot write config '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Creating the parent directory of a configuration file failed.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a spectrum configuration.
    #[error("malformed config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("cannot serialise config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The parsed configuration is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] SpectrumError),
}

impl ConfigError {
    /// `ReadFile` for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// `WriteFile` for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// `CreateDir` for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
