//! Ownership of the FFT engines used by a power spectrum.

use crate::fft::{EngineFactory, SpectrumEngine};

/// Either one engine per channel or a single engine shared by all channels.
///
/// The choice is made once at configure time. Callers always go through
/// [`engine_for`](TransformPool::engine_for), so the per-frame loop never
/// branches on the sharing mode.
pub enum TransformPool {
    /// `engines[c]` serves channel `c`.
    PerChannel(Vec<Box<dyn SpectrumEngine>>),
    /// One engine serves every channel.
    Shared(Box<dyn SpectrumEngine>),
}

impl TransformPool {
    /// Build one engine per entry of `fft_sizes`.
    pub fn per_channel(factory: EngineFactory, fft_sizes: &[usize]) -> Self {
        TransformPool::PerChannel(fft_sizes.iter().map(|&n| factory(n)).collect())
    }

    /// Build a single engine of size `fft_size`.
    pub fn shared(factory: EngineFactory, fft_size: usize) -> Self {
        TransformPool::Shared(factory(fft_size))
    }

    /// Engine serving `channel`.
    ///
    /// # Panics
    ///
    /// Panics if the pool is per-channel and `channel` is out of range.
    #[inline]
    pub fn engine_for(&mut self, channel: usize) -> &mut dyn SpectrumEngine {
        match self {
            TransformPool::PerChannel(engines) => engines[channel].as_mut(),
            TransformPool::Shared(engine) => engine.as_mut(),
        }
    }

    /// Number of distinct engines held.
    pub fn engine_count(&self) -> usize {
        match self {
            TransformPool::PerChannel(engines) => engines.len(),
            TransformPool::Shared(_) => 1,
        }
    }

    /// Whether a single engine is shared across channels.
    pub fn is_shared(&self) -> bool {
        matches!(self, TransformPool::Shared(_))
    }
}

impl std::fmt::Debug for TransformPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformPool::PerChannel(engines) => f
                .debug_tuple("PerChannel")
                .field(&engines.iter().map(|e| e.size()).collect::<Vec<_>>())
                .finish(),
            TransformPool::Shared(engine) => f.debug_tuple("Shared").field(&engine.size()).finish(),
        }
    }
}
