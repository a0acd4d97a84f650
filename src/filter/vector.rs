//! Multi-channel LMS canceller over per-sample reference vectors.
//!
//! Instead of tapping one reference signal's history, this form takes a full
//! vector of `M` independent reference values each step — one per known
//! interference frequency, e.g. `sin(2*pi*f_i*t)` for the mains fundamental
//! and its harmonics — and learns one weight per channel. Because no history
//! has to accumulate, every output index from 0 is defined; there is no cold
//! start.
//!
//! The update convention matches [`LmsFilter`](crate::LmsFilter):
//! `w += 2*mu * e(n) * x(n)`, effective step `2*mu`, stability guideline
//! `mu < 1 / (M * P_x)` with `P_x` the per-channel reference power.
//!
//! # Example
//!
//! ```
//! use dehum::{ReferenceBank, VectorLms};
//!
//! let bank = ReferenceBank::<3>::harmonics(50.0, 1000.0).unwrap();
//! let mut lms = VectorLms::<3>::new(0.01).unwrap();
//!
//! for n in 0..500 {
//!     let t = n as f32 / 1000.0;
//!     let measured = 1.0 + 0.3 * libm::sinf(2.0 * core::f32::consts::PI * 50.0 * t);
//!     let out = lms.process_sample(&bank.vector_at(n), measured);
//!     # let _ = out;
//! }
//! // one weight per harmonic; the 50 Hz weight approaches 0.3
//! assert!((lms.weights()[0] - 0.3).abs() < 0.1);
//! ```

use crate::filter::lms::CancelOutput;
use crate::filter::{ConfigError, InputError};

/// Multi-channel LMS adaptive canceller.
///
/// Holds one weight per reference channel and no delay line. Which form to
/// use is a construction-time choice: pick this one when the interference
/// frequencies are known and a generator supplies one reference waveform per
/// frequency; pick [`LmsFilter`](crate::LmsFilter) when only a single
/// correlated reference signal is available.
///
/// # Type Parameters
///
/// * `M` - Number of reference channels, must be at least 1
pub struct VectorLms<const M: usize> {
    /// One adaptive weight per reference channel
    weights: [f32; M],
    /// Step size (learning rate); effective step is 2*mu
    mu: f32,
    /// Whether the weight update runs
    adapt: bool,
}

impl<const M: usize> VectorLms<M> {
    /// Creates a canceller with zero weights.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStepSize`] unless `mu` is positive and finite.
    ///
    /// # Example
    ///
    /// ```
    /// use dehum::{ConfigError, VectorLms};
    ///
    /// assert!(VectorLms::<3>::new(0.01).is_ok());
    /// assert_eq!(
    ///     VectorLms::<3>::new(-1.0).err(),
    ///     Some(ConfigError::InvalidStepSize)
    /// );
    /// ```
    pub fn new(mu: f32) -> Result<Self, ConfigError> {
        const { assert!(M >= 1, "channel count must be at least 1") };
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(ConfigError::InvalidStepSize);
        }

        Ok(Self {
            weights: [0.0; M],
            mu,
            adapt: true,
        })
    }

    /// Processes one (reference vector, measured) pair.
    ///
    /// `predicted = w^T * x`, `cleaned = measured - predicted`, then
    /// `w += 2*mu * cleaned * x` while adaptation is enabled.
    pub fn process_sample(&mut self, reference: &[f32; M], measured: f32) -> CancelOutput {
        let mut predicted = 0.0;
        for (w, &x) in self.weights.iter().zip(reference.iter()) {
            predicted += w * x;
        }

        let cleaned = measured - predicted;

        if self.adapt {
            let step = 2.0 * self.mu * cleaned;
            for (w, &x) in self.weights.iter_mut().zip(reference.iter()) {
                *w += step * x;
            }
        }

        CancelOutput { predicted, cleaned }
    }

    /// Processes paired slices, one [`CancelOutput`] per input sample.
    ///
    /// Lengths are validated before any sample is consumed; a failed call
    /// mutates nothing and produces no output.
    ///
    /// # Errors
    ///
    /// [`InputError::Empty`] for empty inputs, [`InputError::LengthMismatch`]
    /// if the slice lengths differ.
    pub fn process_block(
        &mut self,
        reference: &[[f32; M]],
        measured: &[f32],
        out: &mut [CancelOutput],
    ) -> Result<(), InputError> {
        if reference.is_empty() && measured.is_empty() {
            return Err(InputError::Empty);
        }
        if reference.len() != measured.len() || measured.len() != out.len() {
            return Err(InputError::LengthMismatch);
        }

        for ((slot, x), &d) in out.iter_mut().zip(reference).zip(measured) {
            *slot = self.process_sample(x, d);
        }
        Ok(())
    }

    /// Enables or disables the weight update.
    pub fn set_adaptation(&mut self, enabled: bool) {
        self.adapt = enabled;
    }

    /// Returns whether the weight update currently runs.
    pub fn adaptation_enabled(&self) -> bool {
        self.adapt
    }

    /// Re-zeroes the weights.
    pub fn reset(&mut self) {
        self.weights = [0.0; M];
    }

    /// Returns the current weights, one per channel.
    pub fn weights(&self) -> &[f32; M] {
        &self.weights
    }

    /// Returns the channel count `M`.
    pub const fn channels(&self) -> usize {
        M
    }

    /// Returns the step size.
    pub fn mu(&self) -> f32 {
        self.mu
    }

    /// Changes the step size, rejecting non-positive or non-finite values.
    pub fn set_mu(&mut self, mu: f32) -> Result<(), ConfigError> {
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(ConfigError::InvalidStepSize);
        }
        self.mu = mu;
        Ok(())
    }
}
