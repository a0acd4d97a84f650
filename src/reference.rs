//! Reference waveform generation for known interference frequencies.
//!
//! An adaptive canceller needs a reference correlated with the interference.
//! When the contamination is mains coupling, its frequency content is known —
//! the line fundamental and its harmonics — so the reference can simply be
//! synthesized: one unit sinusoid per frequency, sampled at the measured
//! signal's rate. [`ReferenceBank`] is that generator: a pure function of the
//! sample index, no internal state.
//!
//! The bank serves both filter forms. [`vector_at`](ReferenceBank::vector_at)
//! yields the per-channel vector the multi-channel form consumes;
//! [`scalar_at`](ReferenceBank::scalar_at) collapses the channels into one
//! composite waveform whose trailing history feeds the delay-line form.

use core::f32::consts::PI;

use crate::filter::ConfigError;

/// Bank of `M` unit-amplitude sinusoid references.
///
/// Channel `i` produces `sin(2*pi*f_i*n/fs)` for sample index `n`. The
/// channel count is fixed at compile time (an empty frequency set is
/// unrepresentable); the sample rate is validated at construction.
///
/// # Example
///
/// ```
/// use dehum::ReferenceBank;
///
/// // 50 Hz mains and its first two harmonics at 1 kHz sampling
/// let bank = ReferenceBank::<3>::harmonics(50.0, 1000.0).unwrap();
/// assert_eq!(bank.frequencies(), &[50.0, 100.0, 150.0]);
///
/// let v = bank.vector_at(5); // [sin(2*pi*50*5ms), sin(2*pi*100*5ms), ...]
/// assert_eq!(v.len(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReferenceBank<const M: usize> {
    /// Interference frequencies in Hz, one per channel
    freqs: [f32; M],
    /// Sampling frequency in Hz
    sample_rate: f32,
}

impl<const M: usize> ReferenceBank<M> {
    /// Creates a bank from explicit frequencies.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSampleRate`] unless `sample_rate` is positive
    /// and finite. There are no other error conditions.
    pub fn new(freqs: [f32; M], sample_rate: f32) -> Result<Self, ConfigError> {
        const { assert!(M >= 1, "frequency set must not be empty") };
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(ConfigError::InvalidSampleRate);
        }

        Ok(Self { freqs, sample_rate })
    }

    /// Creates a bank at a fundamental and its first `M - 1` harmonics.
    ///
    /// `harmonics(50.0, fs)` with `M = 3` covers 50, 100, and 150 Hz — the
    /// usual mains picture in 50 Hz regions; use 60.0 for 60 Hz regions.
    pub fn harmonics(fundamental: f32, sample_rate: f32) -> Result<Self, ConfigError> {
        let mut freqs = [0.0; M];
        for (i, f) in freqs.iter_mut().enumerate() {
            *f = fundamental * (i + 1) as f32;
        }
        Self::new(freqs, sample_rate)
    }

    /// Reference vector for sample index `n`, one component per channel.
    pub fn vector_at(&self, n: usize) -> [f32; M] {
        let t = n as f32 / self.sample_rate;
        let mut v = [0.0; M];
        for (slot, &f) in v.iter_mut().zip(self.freqs.iter()) {
            *slot = libm::sinf(2.0 * PI * f * t);
        }
        v
    }

    /// Composite scalar reference for sample index `n`: the channel sum.
    pub fn scalar_at(&self, n: usize) -> f32 {
        let mut sum = 0.0;
        for &x in self.vector_at(n).iter() {
            sum += x;
        }
        sum
    }

    /// Fills `out` with reference vectors for indices `start..start + len`.
    ///
    /// The explicit start index keeps a streamed run continuable across
    /// batches.
    pub fn fill_vectors(&self, start: usize, out: &mut [[f32; M]]) {
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.vector_at(start + k);
        }
    }

    /// Fills `out` with composite scalar references, as
    /// [`fill_vectors`](ReferenceBank::fill_vectors).
    pub fn fill_scalars(&self, start: usize, out: &mut [f32]) {
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.scalar_at(start + k);
        }
    }

    /// Returns the channel frequencies in Hz.
    pub fn frequencies(&self) -> &[f32; M] {
        &self.freqs
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_sample_rate() {
        assert_eq!(
            ReferenceBank::<1>::new([50.0], 0.0).err(),
            Some(ConfigError::InvalidSampleRate)
        );
        assert_eq!(
            ReferenceBank::<1>::new([50.0], -1000.0).err(),
            Some(ConfigError::InvalidSampleRate)
        );
        assert_eq!(
            ReferenceBank::<1>::new([50.0], f32::NAN).err(),
            Some(ConfigError::InvalidSampleRate)
        );
        assert!(ReferenceBank::<1>::new([50.0], 1000.0).is_ok());
    }

    #[test]
    fn test_harmonics_ladder() {
        let bank = ReferenceBank::<4>::harmonics(60.0, 1000.0).unwrap();
        assert_eq!(bank.frequencies(), &[60.0, 120.0, 180.0, 240.0]);
        assert_eq!(bank.sample_rate(), 1000.0);
    }

    #[test]
    fn test_vector_values() {
        let bank = ReferenceBank::<2>::new([50.0, 100.0], 1000.0).unwrap();

        // index 0: sin(0) = 0 on every channel
        let v0 = bank.vector_at(0);
        assert_eq!(v0, [0.0, 0.0]);

        // 50 Hz at 1 kHz peaks at index 5 (quarter period)
        let v5 = bank.vector_at(5);
        assert!((v5[0] - 1.0).abs() < 1e-5);
        // 100 Hz completes a half period there
        assert!(v5[1].abs() < 1e-4);
    }

    #[test]
    fn test_scalar_is_channel_sum() {
        let bank = ReferenceBank::<3>::harmonics(50.0, 1000.0).unwrap();
        for n in [0usize, 3, 7, 13, 250] {
            let v = bank.vector_at(n);
            let sum = v[0] + v[1] + v[2];
            assert!((bank.scalar_at(n) - sum).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fill_is_continuable() {
        let bank = ReferenceBank::<2>::harmonics(50.0, 1000.0).unwrap();

        let mut whole = [[0.0f32; 2]; 64];
        bank.fill_vectors(0, &mut whole);

        let mut head = [[0.0f32; 2]; 32];
        let mut tail = [[0.0f32; 2]; 32];
        bank.fill_vectors(0, &mut head);
        bank.fill_vectors(32, &mut tail);

        assert_eq!(&whole[..32], &head[..]);
        assert_eq!(&whole[32..], &tail[..]);

        let mut scalars = [0.0f32; 16];
        bank.fill_scalars(8, &mut scalars);
        for (k, &s) in scalars.iter().enumerate() {
            assert_eq!(s, bank.scalar_at(8 + k));
        }
    }
}
