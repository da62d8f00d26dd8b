//! Multi-ear, multi-channel frame container.
//!
//! A [`SignalBank`] holds one frame of audio (or spectral) data addressable by
//! `(ear, channel, sample)`. Storage is a single contiguous `Vec<f32>` laid out
//! ear-major, then channel, then sample, so one ear's channels with a single
//! sample each form one flat slice (see [`SignalBank::ear`]).
//!
//! Each channel may carry a centre frequency in Hz. Spectrum outputs use this
//! to describe which frequency every output slot represents.

/// Shape of a [`SignalBank`] plus its timing metadata.
///
/// This is what a producer hands to a consumer's `configure` step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankShape {
    /// Number of ears (1 = mono, 2 = binaural).
    pub n_ears: usize,
    /// Number of channels per ear.
    pub n_channels: usize,
    /// Number of samples per channel.
    pub n_samples: usize,
    /// Sample rate of the underlying audio in Hz.
    pub fs: f64,
    /// Number of frames produced per second.
    pub frame_rate: f64,
}

impl BankShape {
    /// Create a shape whose frame rate equals `fs / n_samples`.
    pub fn new(n_ears: usize, n_channels: usize, n_samples: usize, fs: f64) -> Self {
        let frame_rate = if n_samples > 0 {
            fs / n_samples as f64
        } else {
            0.0
        };
        Self {
            n_ears,
            n_channels,
            n_samples,
            fs,
            frame_rate,
        }
    }

    /// Override the frame rate.
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Total number of samples across all ears and channels.
    pub fn len(&self) -> usize {
        self.n_ears * self.n_channels * self.n_samples
    }

    /// Returns true if the shape holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` has the same ear, channel and sample counts.
    pub fn same_layout(&self, other: &BankShape) -> bool {
        self.n_ears == other.n_ears
            && self.n_channels == other.n_channels
            && self.n_samples == other.n_samples
    }
}

/// One frame of data addressable by `(ear, channel, sample)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBank {
    shape: BankShape,
    data: Vec<f32>,
    centre_freqs: Vec<f64>,
}

impl SignalBank {
    /// Creates a zeroed bank with the given shape.
    pub fn new(shape: BankShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.len()],
            centre_freqs: vec![0.0; shape.n_channels],
        }
    }

    /// Re-initializes the bank to a new shape, zeroing all samples and
    /// centre frequencies.
    pub fn initialize(&mut self, shape: BankShape) {
        self.shape = shape;
        self.data.clear();
        self.data.resize(shape.len(), 0.0);
        self.centre_freqs.clear();
        self.centre_freqs.resize(shape.n_channels, 0.0);
    }

    /// Returns the bank's shape.
    pub fn shape(&self) -> BankShape {
        self.shape
    }

    /// Number of ears.
    pub fn n_ears(&self) -> usize {
        self.shape.n_ears
    }

    /// Number of channels per ear.
    pub fn n_channels(&self) -> usize {
        self.shape.n_channels
    }

    /// Number of samples per channel.
    pub fn n_samples(&self) -> usize {
        self.shape.n_samples
    }

    /// Sample rate in Hz.
    pub fn fs(&self) -> f64 {
        self.shape.fs
    }

    /// Frame rate in Hz.
    pub fn frame_rate(&self) -> f64 {
        self.shape.frame_rate
    }

    #[inline]
    fn offset(&self, ear: usize, channel: usize) -> usize {
        debug_assert!(ear < self.shape.n_ears && channel < self.shape.n_channels);
        (ear * self.shape.n_channels + channel) * self.shape.n_samples
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `ear` or `channel` is out of range.
    #[inline]
    pub fn channel(&self, ear: usize, channel: usize) -> &[f32] {
        let start = self.offset(ear, channel);
        &self.data[start..start + self.shape.n_samples]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `ear` or `channel` is out of range.
    #[inline]
    pub fn channel_mut(&mut self, ear: usize, channel: usize) -> &mut [f32] {
        let start = self.offset(ear, channel);
        let n = self.shape.n_samples;
        &mut self.data[start..start + n]
    }

    /// All channels of one ear, channel-major.
    ///
    /// For a single-sample bank this is the flat per-ear vector with one
    /// value per channel.
    pub fn ear(&self, ear: usize) -> &[f32] {
        let len = self.shape.n_channels * self.shape.n_samples;
        &self.data[ear * len..(ear + 1) * len]
    }

    /// Mutable view of all channels of one ear.
    pub fn ear_mut(&mut self, ear: usize) -> &mut [f32] {
        let len = self.shape.n_channels * self.shape.n_samples;
        &mut self.data[ear * len..(ear + 1) * len]
    }

    /// Read one sample.
    pub fn sample(&self, ear: usize, channel: usize, index: usize) -> f32 {
        self.channel(ear, channel)[index]
    }

    /// Write one sample.
    pub fn set_sample(&mut self, ear: usize, channel: usize, index: usize, value: f32) {
        self.channel_mut(ear, channel)[index] = value;
    }

    /// Zero every sample, keeping the shape and centre frequencies.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Centre frequency of a channel in Hz.
    pub fn centre_freq(&self, channel: usize) -> f64 {
        self.centre_freqs[channel]
    }

    /// Set the centre frequency of a channel in Hz.
    pub fn set_centre_freq(&mut self, channel: usize, freq_hz: f64) {
        self.centre_freqs[channel] = freq_hz;
    }

    /// All channel centre frequencies in Hz.
    pub fn centre_freqs(&self) -> &[f64] {
        &self.centre_freqs
    }

    /// Raw storage, ear-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
