//! Real-input FFT engine and analysis windows.
//!
//! [`SpectrumEngine`] is the seam between the power spectrum and the
//! transform itself: a fixed-size engine that consumes real samples and
//! exposes the complex bins `0..=size/2`. [`RealFft`] is the default engine,
//! built on `rustfft`.

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Analysis window applied by the framer before the transform.
///
/// All variants are periodic cosine-sum windows of length `n`:
/// `w[i] = a0 - a1·cos(x) + a2·cos(2x) - a3·cos(3x)` with `x = 2πi/n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// No tapering.
    Rectangular,
    /// Raised cosine.
    #[default]
    Hann,
    /// Hamming.
    Hamming,
    /// Three-term Blackman.
    Blackman,
    /// Four-term Blackman-Harris, lowest sidelobes of the set.
    BlackmanHarris,
}

impl Window {
    fn cosine_terms(self) -> &'static [f32] {
        match self {
            Window::Rectangular => &[1.0],
            Window::Hann => &[0.5, 0.5],
            Window::Hamming => &[0.54, 0.46],
            Window::Blackman => &[0.42, 0.5, 0.08],
            Window::BlackmanHarris => &[0.35875, 0.48829, 0.14128, 0.01168],
        }
    }

    /// Weight of sample `i` in a window of length `n`.
    pub fn weight(self, i: usize, n: usize) -> f32 {
        let x = 2.0 * PI * i as f32 / n as f32;
        self.cosine_terms()
            .iter()
            .enumerate()
            .fold(0.0, |acc, (k, &a)| {
                let term = a * (k as f32 * x).cos();
                if k % 2 == 0 { acc + term } else { acc - term }
            })
    }

    /// All `n` weights.
    pub fn coefficients(self, n: usize) -> Vec<f32> {
        (0..n).map(|i| self.weight(i, n)).collect()
    }

    /// Parse a window name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Some(Window::Rectangular),
            "hann" | "hanning" => Some(Window::Hann),
            "hamming" => Some(Window::Hamming),
            "blackman" => Some(Window::Blackman),
            "blackman-harris" | "blackmanharris" => Some(Window::BlackmanHarris),
            _ => None,
        }
    }
}

/// Smallest power of two greater than or equal to `n` (1 for `n == 0`).
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// A fixed-size forward transform over real input.
///
/// After [`process`](SpectrumEngine::process), bins `0..=size()/2` can be read
/// back by index. Engines keep no state between calls other than their
/// scratch buffers.
pub trait SpectrumEngine: Send {
    /// Transform size.
    fn size(&self) -> usize;

    /// Transform the first `min(samples.len(), size())` samples, zero-padding
    /// the remainder up to the transform size.
    fn process(&mut self, samples: &[f32]);

    /// Real part of bin `bin` from the last call to `process`.
    fn real(&self, bin: usize) -> f32;

    /// Imaginary part of bin `bin` from the last call to `process`.
    fn imag(&self, bin: usize) -> f32;
}

/// Builds an engine for a given transform size.
pub type EngineFactory = fn(usize) -> Box<dyn SpectrumEngine>;

/// Default [`EngineFactory`]: a [`RealFft`] of the requested size.
pub fn real_fft_factory(size: usize) -> Box<dyn SpectrumEngine> {
    Box::new(RealFft::new(size))
}

/// Forward FFT of real input backed by a cached `rustfft` plan.
pub struct RealFft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    size: usize,
}

impl RealFft {
    /// Plan a forward transform of `size` points.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Self {
            fft,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
            size,
        }
    }

    #[cfg(test)]
    fn bins(&self) -> &[Complex<f32>] {
        &self.buffer[..self.size / 2 + 1]
    }
}

impl SpectrumEngine for RealFft {
    fn size(&self) -> usize {
        self.size
    }

    fn process(&mut self, samples: &[f32]) {
        let n = samples.len().min(self.size);
        for (dst, &x) in self.buffer.iter_mut().zip(&samples[..n]) {
            *dst = Complex::new(x, 0.0);
        }
        self.buffer[n..].fill(Complex::new(0.0, 0.0));

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);
    }

    #[inline]
    fn real(&self, bin: usize) -> f32 {
        self.buffer[bin].re
    }

    #[inline]
    fn imag(&self, bin: usize) -> f32 {
        self.buffer[bin].im
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_power_of_two_rounds_up() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(256), 256);
        assert_eq!(next_power_of_two(257), 512);
        assert_eq!(next_power_of_two(1000), 1024);
    }

    #[test]
    fn hann_tapers_to_zero_and_peaks_mid_window() {
        let w = Window::Hann.coefficients(100);
        assert!(w[0].abs() < 1e-6);
        assert!(w[99] < 0.01);
        assert!((w[50] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_sums_match_closed_forms() {
        let n = 64;
        for i in 0..n {
            let x = 2.0 * PI * i as f32 / n as f32;
            let hamming = 0.54 - 0.46 * x.cos();
            let blackman = 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos();
            assert!((Window::Hamming.weight(i, n) - hamming).abs() < 1e-6);
            assert!((Window::Blackman.weight(i, n) - blackman).abs() < 1e-6);
            assert_eq!(Window::Rectangular.weight(i, n), 1.0);
        }
    }

    #[test]
    fn window_names_parse() {
        assert_eq!(Window::from_name("HANN"), Some(Window::Hann));
        assert_eq!(Window::from_name("rect"), Some(Window::Rectangular));
        assert_eq!(Window::from_name("kaiser"), None);
    }

    #[test]
    fn constant_input_is_all_dc() {
        let mut fft = RealFft::new(256);
        fft.process(&[1.0; 256]);

        assert!((fft.real(0) - 256.0).abs() < 1e-3);
        let leakage: f32 = fft.bins()[1..].iter().map(|c| c.norm()).sum();
        assert!(leakage < 1e-2);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut fft = RealFft::new(64);
        // 16 ones followed by implicit zeros: DC equals the sum of the input
        fft.process(&[1.0; 16]);
        assert!((fft.real(0) - 16.0).abs() < 1e-4);
        assert!(fft.imag(0).abs() < 1e-4);

        // A second call must not see leftovers from a longer first call
        fft.process(&[1.0; 64]);
        fft.process(&[1.0; 8]);
        assert!((fft.real(0) - 8.0).abs() < 1e-4);
    }

    #[test]
    fn bin_centred_cosine_lands_in_one_bin() {
        let size = 128;
        let k = 10;
        let input: Vec<f32> = (0..size)
            .map(|i| (2.0 * PI * k as f32 * i as f32 / size as f32).cos())
            .collect();

        let mut fft = RealFft::new(size);
        fft.process(&input);

        // Real cosine of amplitude 1 gives |X[k]| = N/2
        assert!((fft.real(k) - 64.0).abs() < 1e-2);
        assert_eq!(fft.bins().len(), size / 2 + 1);
        for bin in 0..=size / 2 {
            if bin != k {
                assert!(fft.bins()[bin].norm() < 1e-2, "leak at bin {bin}");
            }
        }
    }
}
