//! Property-based tests for bin selection and configuration.
//!
//! Uses proptest to generate band layouts, window sizes and sample rates and
//! checks the invariants every accepted configuration must satisfy.

use multispec_core::{
    BankShape, PowerSpectrum, PowerSpectrumConfig, SignalBank, SpectrumError, SpectrumPlan,
    nyquist_index,
};
use proptest::prelude::*;

/// Non-ascending window sizes between 16 and 4096 samples.
fn window_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(16usize..=4096, 1..=6).prop_map(|mut w| {
        w.sort_unstable_by(|a, b| b.cmp(a));
        w
    })
}

/// Ascending band edges spanning 0 Hz to 1.2 × the Nyquist frequency.
fn band_edges(n_bands: usize, fs: f64) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..fs * 0.6, n_bands + 1).prop_map(|mut e| {
        e.sort_by(|a, b| a.partial_cmp(b).unwrap());
        e
    })
}

fn layout() -> impl Strategy<Value = (Vec<usize>, Vec<f64>, f64, bool)> {
    (window_sizes(), 8000.0f64..96000.0, any::<bool>()).prop_flat_map(|(w, fs, uniform)| {
        let n = w.len();
        (Just(w), band_edges(n, fs), Just(fs), Just(uniform))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every accepted plan declares a width equal to the sum of its bands,
    /// bounded by the positive-frequency bins of each transform, and never
    /// selects DC or anything at or above Nyquist.
    #[test]
    fn accepted_plans_respect_bin_bounds((windows, edges, fs, uniform) in layout()) {
        let config = PowerSpectrumConfig::new(edges.clone(), windows.clone())
            .with_uniform_sampling(uniform);
        let input = BankShape::new(1, windows.len(), windows[0], fs);

        match SpectrumPlan::build(&config, &input) {
            Ok(plan) => {
                let sum: usize = plan.channels.iter().map(|c| c.bin_hi - c.bin_lo).sum();
                let bound: usize = plan.channels.iter().map(|c| c.fft_size / 2).sum();
                prop_assert_eq!(sum, plan.total_bins);
                prop_assert_eq!(plan.centre_freqs.len(), plan.total_bins);
                prop_assert!(sum <= bound);
                prop_assert_eq!(plan.output_shape().n_channels, sum);

                for (i, c) in plan.channels.iter().enumerate() {
                    prop_assert!(c.bin_lo >= 1);
                    prop_assert!(c.bin_hi <= nyquist_index(c.fft_size));
                    prop_assert!(c.bin_lo < c.bin_hi);
                    prop_assert!(c.fft_size >= c.window_size);
                    prop_assert!(c.fft_size.is_power_of_two());

                    // Half-open frequency selection, except where DC or
                    // Nyquist clamping moved the edge inward
                    for k in c.bins() {
                        let f = c.bin_freq(k);
                        prop_assert!(f < edges[i + 1] + 1e-9, "bin {} at {} Hz >= {}", k, f, edges[i + 1]);
                        prop_assert!(f + 1e-9 >= edges[i] || k == 1);
                    }
                }
            }
            Err(SpectrumError::EmptyBand { channel, bin_lo, bin_hi }) => {
                prop_assert!(channel < windows.len());
                prop_assert!(bin_hi <= bin_lo);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// A lower edge whose ceiling falls on bin 0 is moved to exactly bin 1.
    #[test]
    fn dc_clamps_to_bin_one(window in 16usize..=4096, fs in 8000.0f64..96000.0) {
        let config = PowerSpectrumConfig::new(vec![0.0, fs / 2.0], vec![window]);
        let plan = SpectrumPlan::build(&config, &BankShape::new(1, 1, window, fs)).unwrap();
        prop_assert_eq!(plan.channels[0].bin_lo, 1);
        prop_assert_eq!(plan.channels[0].bin_hi, nyquist_index(plan.channels[0].fft_size));
    }

    /// Ascending adjacent windows are rejected regardless of edges or rate.
    #[test]
    fn ascending_windows_always_rejected(
        lo in 0.0f64..1000.0,
        mid in 1000.0f64..4000.0,
        hi in 4000.0f64..20000.0,
        fs in 8000.0f64..96000.0,
    ) {
        let mut spectrum = PowerSpectrum::new(vec![lo, mid, hi], vec![512, 1024], false);
        let err = spectrum.configure(&BankShape::new(1, 2, 1024, fs)).unwrap_err();
        prop_assert!(matches!(err, SpectrumError::InvalidParameter(_)));
    }

    /// Configuring twice with the same input yields identical plans.
    #[test]
    fn configure_is_idempotent((windows, edges, fs, uniform) in layout()) {
        let config = PowerSpectrumConfig::new(edges, windows.clone())
            .with_uniform_sampling(uniform);
        let input = BankShape::new(2, windows.len(), windows[0], fs);
        let mut spectrum = PowerSpectrum::from_config(config);

        let first = spectrum.configure(&input).map(|shape| (shape, spectrum.plan().cloned()));
        let second = spectrum.configure(&input).map(|shape| (shape, spectrum.plan().cloned()));
        prop_assert_eq!(first, second);
    }

    /// Processing always fills exactly the declared width with finite,
    /// non-negative powers.
    #[test]
    fn processed_powers_are_finite(
        (windows, edges, fs, uniform) in layout(),
        seed in any::<u32>(),
    ) {
        let config = PowerSpectrumConfig::new(edges, windows.clone())
            .with_uniform_sampling(uniform);
        let input = BankShape::new(1, windows.len(), windows[0], fs);
        let mut spectrum = PowerSpectrum::from_config(config);
        let Ok(out_shape) = spectrum.configure(&input) else {
            return Ok(());
        };

        let mut state = seed | 1;
        let mut frame = SignalBank::new(input);
        for chn in 0..windows.len() {
            for x in frame.channel_mut(0, chn) {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                *x = (state as i32 as f32) / (i32::MAX as f32);
            }
        }

        let out = spectrum.process(&frame).unwrap();
        prop_assert_eq!(out.ear(0).len(), out_shape.n_channels);
        prop_assert!(out.ear(0).iter().all(|p| p.is_finite() && *p >= 0.0));
    }
}
