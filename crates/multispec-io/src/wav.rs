//! WAV file reading.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels in the file.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 32000, 44100).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Format of the file.
    pub spec: WavSpec,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    if spec.channels == 0 {
        return Err(Error::NoChannels);
    }
    let num_frames = reader.len() as u64 / spec.channels as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    Ok(WavInfo {
        spec,
        num_frames,
        duration_secs,
    })
}

/// Read a WAV file as one `f32` signal per ear.
///
/// The first `max_ears` channels of the file become ears; any further
/// channels are ignored. Integer PCM is scaled to `[-1, 1)`.
///
/// # Example
/// ```ignore
/// let (ears, spec) = read_wav_ears("binaural.wav", 2)?;
/// println!("{} ears at {} Hz", ears.len(), spec.sample_rate);
/// ```
pub fn read_wav_ears<P: AsRef<Path>>(path: P, max_ears: usize) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::NoChannels);
    }

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let n_ears = channels.min(max_ears.max(1));
    if channels > n_ears {
        tracing::info!(channels, n_ears, "ignoring extra channels");
    }

    let frames = interleaved.len() / channels;
    let mut ears: Vec<Vec<f32>> = (0..n_ears).map(|_| Vec::with_capacity(frames)).collect();
    for chunk in interleaved.chunks_exact(channels) {
        for (ear, &sample) in ears.iter_mut().zip(chunk) {
            ear.push(sample);
        }
    }

    Ok((ears, spec))
}
