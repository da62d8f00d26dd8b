//! Slicing a signal into multi-window frames.
//!
//! Every frame is a block of `largest_window` samples starting at
//! `frame · hop`. Channel `c` receives the `window_sizes[c]` samples centred
//! in that block, tapered by the analysis window and left-aligned in the
//! channel (the tail stays zero). All windows of a frame therefore share the
//! same centre in time, which is what [`PowerSpectrum`](crate::PowerSpectrum)
//! expects from its input.

use crate::error::{Result, SpectrumError};
use crate::fft::Window;
use crate::signal_bank::{BankShape, SignalBank};

/// Produces [`SignalBank`] frames for a set of centred analysis windows.
#[derive(Debug, Clone)]
pub struct MultiWindowFramer {
    window_sizes: Vec<usize>,
    coefficients: Vec<Vec<f32>>,
    offsets: Vec<usize>,
    hop: usize,
    fs: f64,
}

impl MultiWindowFramer {
    /// Create a framer.
    ///
    /// `window_sizes` must be non-empty, non-zero and non-ascending; `hop`
    /// must be non-zero.
    pub fn new(window_sizes: Vec<usize>, hop: usize, window: Window, fs: f64) -> Result<Self> {
        if window_sizes.is_empty() {
            return Err(SpectrumError::invalid("at least one window is required"));
        }
        if hop == 0 {
            return Err(SpectrumError::invalid("hop size must be non-zero"));
        }
        if window_sizes.windows(2).any(|w| w[0] < w[1]) {
            return Err(SpectrumError::invalid(
                "window lengths must be in descending order",
            ));
        }
        if window_sizes.contains(&0) {
            return Err(SpectrumError::invalid("window lengths must be non-zero"));
        }

        let largest = window_sizes[0];
        let offsets = window_sizes.iter().map(|&w| (largest - w) / 2).collect();
        let coefficients = window_sizes
            .iter()
            .map(|&w| window.coefficients(w))
            .collect();

        Ok(Self {
            window_sizes,
            coefficients,
            offsets,
            hop,
            fs,
        })
    }

    /// Samples per channel in each frame.
    pub fn frame_len(&self) -> usize {
        self.window_sizes[0]
    }

    /// Hop between frames in samples.
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Window sizes, largest first.
    pub fn window_sizes(&self) -> &[usize] {
        &self.window_sizes
    }

    /// Number of frames covering a signal of `n_samples`.
    pub fn frame_count(&self, n_samples: usize) -> usize {
        n_samples.div_ceil(self.hop)
    }

    /// Start time of frame `frame` in seconds.
    pub fn frame_time(&self, frame: usize) -> f64 {
        (frame * self.hop) as f64 / self.fs
    }

    /// Shape of the frames for `n_ears` ears.
    pub fn output_shape(&self, n_ears: usize) -> BankShape {
        BankShape::new(n_ears, self.window_sizes.len(), self.frame_len(), self.fs)
            .with_frame_rate(self.fs / self.hop as f64)
    }

    /// Fill `bank` with frame `frame` of `ears` (one signal per ear).
    ///
    /// Samples past the end of a signal are read as zero.
    pub fn fill(&self, ears: &[&[f32]], frame: usize, bank: &mut SignalBank) -> Result<()> {
        let shape = self.output_shape(ears.len());
        if !bank.shape().same_layout(&shape) {
            return Err(SpectrumError::shape(format!(
                "frame bank is {} ears x {} channels x {} samples, expected {} x {} x {}",
                bank.n_ears(),
                bank.n_channels(),
                bank.n_samples(),
                shape.n_ears,
                shape.n_channels,
                shape.n_samples
            )));
        }

        let start = frame * self.hop;
        for (ear, signal) in ears.iter().enumerate() {
            for (chn, coeffs) in self.coefficients.iter().enumerate() {
                let begin = start + self.offsets[chn];
                let dst = bank.channel_mut(ear, chn);
                dst.fill(0.0);

                for (i, (d, &w)) in dst.iter_mut().zip(coeffs).enumerate() {
                    *d = signal.get(begin + i).copied().unwrap_or(0.0) * w;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert!(MultiWindowFramer::new(vec![], 64, Window::Hann, 32000.0).is_err());
        assert!(MultiWindowFramer::new(vec![64], 0, Window::Hann, 32000.0).is_err());
        assert!(MultiWindowFramer::new(vec![32, 64], 16, Window::Hann, 32000.0).is_err());
        assert!(MultiWindowFramer::new(vec![64, 0], 16, Window::Hann, 32000.0).is_err());
    }

    #[test]
    fn frame_count_rounds_up() {
        let framer = MultiWindowFramer::new(vec![64], 32, Window::Hann, 32000.0).unwrap();
        assert_eq!(framer.frame_count(0), 0);
        assert_eq!(framer.frame_count(1), 1);
        assert_eq!(framer.frame_count(64), 2);
        assert_eq!(framer.frame_count(65), 3);
    }

    #[test]
    fn output_shape_uses_hop_rate() {
        let framer =
            MultiWindowFramer::new(vec![1024, 256], 320, Window::Hann, 32000.0).unwrap();
        let shape = framer.output_shape(2);
        assert_eq!(shape.n_ears, 2);
        assert_eq!(shape.n_channels, 2);
        assert_eq!(shape.n_samples, 1024);
        assert_eq!(shape.frame_rate, 100.0);
        assert_eq!(framer.frame_time(3), 0.03);
    }

    #[test]
    fn shorter_windows_are_centred_and_left_aligned() {
        let framer =
            MultiWindowFramer::new(vec![8, 4], 8, Window::Rectangular, 1000.0).unwrap();
        let signal: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let mut bank = SignalBank::new(framer.output_shape(1));

        framer.fill(&[&signal], 1, &mut bank).unwrap();
        assert_eq!(bank.channel(0, 0), &[8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        assert_eq!(bank.channel(0, 1), &[10.0, 11.0, 12.0, 13.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn reads_past_end_as_zero() {
        let framer = MultiWindowFramer::new(vec![4], 2, Window::Rectangular, 1000.0).unwrap();
        let signal = [1.0, 2.0, 3.0];
        let mut bank = SignalBank::new(framer.output_shape(1));

        framer.fill(&[&signal], 1, &mut bank).unwrap();
        assert_eq!(bank.channel(0, 0), &[3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn window_is_applied() {
        let framer = MultiWindowFramer::new(vec![8], 8, Window::Hann, 1000.0).unwrap();
        let signal = [1.0f32; 8];
        let mut bank = SignalBank::new(framer.output_shape(1));

        framer.fill(&[&signal], 0, &mut bank).unwrap();
        assert_eq!(bank.channel(0, 0), Window::Hann.coefficients(8).as_slice());
    }

    #[test]
    fn wrong_bank_shape_rejected() {
        let framer = MultiWindowFramer::new(vec![8], 8, Window::Hann, 1000.0).unwrap();
        let mut bank = SignalBank::new(BankShape::new(1, 1, 4, 1000.0));
        let signal = [0.0f32; 8];
        assert!(matches!(
            framer.fill(&[&signal], 0, &mut bank),
            Err(SpectrumError::ShapeMismatch(_))
        ));
    }
}
