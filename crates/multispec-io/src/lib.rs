//! Audio input and spectrum export for multispec.
//!
//! This crate provides:
//!
//! - **WAV input**: [`read_wav_ears`] decodes a file into one sample vector
//!   per ear, ready for [`MultiWindowFramer`](multispec_core::MultiWindowFramer)
//! - **CSV export**: [`SpectrumCsvWriter`] streams spectrum frames to CSV
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multispec_io::{read_wav_ears, SpectrumCsvWriter};
//!
//! let (ears, spec) = read_wav_ears("input.wav", 2)?;
//! let mut csv = SpectrumCsvWriter::create("spectrum.csv", spectrum.output().unwrap())?;
//! csv.write_frame(0.0, spectrum.process(&frame)?)?;
//! csv.finish()?;
//! ```

mod csv;
mod wav;

pub use csv::SpectrumCsvWriter;
pub use wav::{WavInfo, WavSpec, read_wav_ears, read_wav_info};

/// Error types for audio input and spectrum export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file has no audio channels.
    #[error("WAV file has no channels")]
    NoChannels,

    /// The frame does not match the CSV header.
    #[error("frame has {got} bins, header has {expected}")]
    FrameWidth {
        /// Number of bins in the header.
        expected: usize,
        /// Number of bins in the frame.
        got: usize,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
