//! Delay-line LMS (Least Mean Squares) canceller for periodic interference.
//!
//! The LMS algorithm adapts a set of FIR weights, one sample at a time, to
//! predict the interference component of a measured signal from a reference
//! signal correlated with that interference. Subtracting the prediction
//! leaves the cleaned signal. This is the workhorse for removing mains
//! coupling (50/60 Hz and harmonics) from slowly varying sensor readings.
//!
//! # Algorithm
//!
//! Per sample, with the reference delay line `u(n)` ordered most-recent-first:
//! ```text
//! y(n) = w^T(n-1) * u(n)              // predicted interference
//! e(n) = d(n) - y(n)                  // cleaned output
//! w(n) = w(n-1) + 2*mu * e(n) * u(n)  // stochastic gradient step
//! ```
//!
//! The factor of 2 comes from differentiating the squared error and is kept
//! explicit, matching the classical derivation: the effective step size is
//! `2*mu`. Folding it into `mu` would halve every numerically equivalent
//! learning rate, so docs and tests use this convention consistently.
//!
//! # Cold start
//!
//! The filter produces no meaningful estimate until its delay line has been
//! filled: for the first `N` samples both outputs are pinned to exactly zero
//! and the weights do not move. The first adapted output is at index `N`.
//!
//! # Step size selection
//!
//! The classical stability guideline bounds the effective step by the inverse
//! of the total input power: `0 < 2*mu < 2 / (N * P_x)`, where `P_x` is the
//! mean power of the reference signal. Under this crate's convention that
//! means choosing `mu < 1 / (N * P_x)`. The engine does not police this
//! bound — a divergent weight vector from an aggressive `mu` is a valid,
//! caller-observable outcome, not a trapped error.
//!
//! # Example
//!
//! ```
//! use dehum::{LmsFilter, ReferenceBank};
//!
//! let bank = ReferenceBank::<3>::harmonics(50.0, 1000.0).unwrap();
//! let mut lms = LmsFilter::<16>::new(0.002).unwrap();
//!
//! for n in 0..1000 {
//!     let t = n as f32 / 1000.0;
//!     // measured: constant quantity plus 50 Hz pickup
//!     let measured = 1.0 + 0.3 * libm::sinf(2.0 * core::f32::consts::PI * 50.0 * t);
//!     let out = lms.process_sample(bank.scalar_at(n), measured);
//!     // out.cleaned converges toward 1.0, out.predicted toward the pickup
//!     # let _ = out;
//! }
//! ```

use crate::filter::{ConfigError, InputError};

/// Output of one adaptive cancellation step.
///
/// `cleaned` is the error signal `e(n) = d(n) - y(n)` — the measured sample
/// with the predicted interference removed. `predicted` is the interference
/// estimate `y(n)` itself, exposed for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CancelOutput {
    /// Predicted interference y(n) = w^T * u(n)
    pub predicted: f32,
    /// Cleaned output e(n) = d(n) - y(n)
    pub cleaned: f32,
}

/// Delay-line LMS adaptive canceller.
///
/// The reference signal's own trailing history is the filter input: the last
/// `N` reference samples are kept in a ring buffer and combined through `N`
/// adaptive weights. O(N) per sample, no allocation.
///
/// # Type Parameters
///
/// * `N` - Filter order (number of taps), must be at least 1
///
/// # Filter Order Guidelines
///
/// - **Mains interference (50/60 Hz + harmonics)**: 16-32 taps
/// - Longer filters model more structure but adapt more slowly and cost more
///   per sample.
///
/// # Example
///
/// ```
/// use dehum::LmsFilter;
///
/// let mut lms = LmsFilter::<32>::new(0.01).unwrap();
///
/// // Outputs are pinned to zero until the 32-sample history fills
/// let first = lms.process_sample(0.5, 1.0);
/// assert_eq!(first.cleaned, 0.0);
/// assert_eq!(first.predicted, 0.0);
/// ```
pub struct LmsFilter<const N: usize> {
    /// Adaptive weights
    weights: [f32; N],
    /// Ring buffer of the last N reference samples
    delay_line: [f32; N],
    /// Next write position in the ring buffer
    index: usize,
    /// Reference samples consumed so far, saturating at N
    seen: usize,
    /// Step size (learning rate); effective step is 2*mu
    mu: f32,
    /// Whether the weight update runs; prediction always does
    adapt: bool,
}

impl<const N: usize> LmsFilter<N> {
    /// Creates an LMS canceller with zero weights and an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] unless `mu` is positive and
    /// finite. A zero step size would leave the filter permanently static
    /// and is rejected by contract.
    ///
    /// # Example
    ///
    /// ```
    /// use dehum::{ConfigError, LmsFilter};
    ///
    /// assert!(LmsFilter::<16>::new(0.01).is_ok());
    /// assert_eq!(
    ///     LmsFilter::<16>::new(0.0).err(),
    ///     Some(ConfigError::InvalidStepSize)
    /// );
    /// ```
    pub fn new(mu: f32) -> Result<Self, ConfigError> {
        const { assert!(N >= 1, "filter order must be at least 1") };
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(ConfigError::InvalidStepSize);
        }

        Ok(Self {
            weights: [0.0; N],
            delay_line: [0.0; N],
            index: 0,
            seen: 0,
            mu,
            adapt: true,
        })
    }

    /// Processes one (reference, measured) sample pair.
    ///
    /// 1. Push the reference sample into the ring buffer, evicting the oldest.
    /// 2. Cold start: while fewer than `N` reference samples have been seen,
    ///    return zeros and leave the weights untouched.
    /// 3. `predicted = w^T * u(n)` over the history, most-recent-first.
    /// 4. `cleaned = measured - predicted`.
    /// 5. If adaptation is enabled, `w += 2*mu * cleaned * u(n)`.
    pub fn process_sample(&mut self, reference: f32, measured: f32) -> CancelOutput {
        self.delay_line[self.index] = reference;
        let newest = self.index;
        self.index = (self.index + 1) % N;

        if self.seen < N {
            self.seen += 1;
            return CancelOutput {
                predicted: 0.0,
                cleaned: 0.0,
            };
        }

        let mut predicted = 0.0;
        let mut tap_idx = newest;
        for tap in 0..N {
            predicted += self.weights[tap] * self.delay_line[tap_idx];
            tap_idx = if tap_idx == 0 { N - 1 } else { tap_idx - 1 };
        }

        let cleaned = measured - predicted;

        if self.adapt {
            let step = 2.0 * self.mu * cleaned;
            let mut tap_idx = newest;
            for tap in 0..N {
                self.weights[tap] += step * self.delay_line[tap_idx];
                tap_idx = if tap_idx == 0 { N - 1 } else { tap_idx - 1 };
            }
        }

        CancelOutput { predicted, cleaned }
    }

    /// Processes paired slices, writing one [`CancelOutput`] per input sample.
    ///
    /// All three slices must have the same non-zero length. The check runs
    /// before any sample is consumed, so a failed call mutates nothing and
    /// produces no output.
    ///
    /// # Errors
    ///
    /// [`InputError::Empty`] for empty inputs, [`InputError::LengthMismatch`]
    /// if the lengths differ.
    ///
    /// # Example
    ///
    /// ```
    /// use dehum::{CancelOutput, InputError, LmsFilter};
    ///
    /// let mut lms = LmsFilter::<8>::new(0.01).unwrap();
    /// let reference = [0.1, 0.2, 0.3, 0.4];
    /// let measured = [1.0, 1.1, 0.9, 1.0];
    /// let mut out = [CancelOutput::default(); 4];
    ///
    /// lms.process_block(&reference, &measured, &mut out).unwrap();
    ///
    /// let mut short = [CancelOutput::default(); 3];
    /// assert_eq!(
    ///     lms.process_block(&reference, &measured, &mut short),
    ///     Err(InputError::LengthMismatch)
    /// );
    /// ```
    pub fn process_block(
        &mut self,
        reference: &[f32],
        measured: &[f32],
        out: &mut [CancelOutput],
    ) -> Result<(), InputError> {
        if reference.is_empty() && measured.is_empty() {
            return Err(InputError::Empty);
        }
        if reference.len() != measured.len() || measured.len() != out.len() {
            return Err(InputError::LengthMismatch);
        }

        for ((slot, &x), &d) in out.iter_mut().zip(reference).zip(measured) {
            *slot = self.process_sample(x, d);
        }
        Ok(())
    }

    /// Enables or disables the weight update.
    ///
    /// With adaptation off the filter keeps predicting and subtracting with
    /// its current weights but stops learning — the "stop" half of a
    /// start/stop control, held per instance rather than as global state.
    pub fn set_adaptation(&mut self, enabled: bool) {
        self.adapt = enabled;
    }

    /// Returns whether the weight update currently runs.
    pub fn adaptation_enabled(&self) -> bool {
        self.adapt
    }

    /// Re-zeroes weights, history, and cold-start state.
    ///
    /// Call between independent runs; nothing resets automatically.
    ///
    /// # Example
    ///
    /// ```
    /// use dehum::LmsFilter;
    ///
    /// let mut lms = LmsFilter::<4>::new(0.05).unwrap();
    /// for n in 0..100 {
    ///     lms.process_sample((n % 5) as f32 * 0.1, 1.0);
    /// }
    /// lms.reset();
    /// assert_eq!(lms.weights(), &[0.0; 4]);
    /// // cold start applies again
    /// assert_eq!(lms.process_sample(0.3, 1.0).cleaned, 0.0);
    /// ```
    pub fn reset(&mut self) {
        self.weights = [0.0; N];
        self.delay_line = [0.0; N];
        self.index = 0;
        self.seen = 0;
    }

    /// Returns the current weights.
    pub fn weights(&self) -> &[f32; N] {
        &self.weights
    }

    /// Returns the filter order `N`.
    pub const fn order(&self) -> usize {
        N
    }

    /// Returns the step size.
    pub fn mu(&self) -> f32 {
        self.mu
    }

    /// Changes the step size, under the same contract as [`LmsFilter::new`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStepSize`] unless `mu` is positive and finite;
    /// the previous step size is kept on error.
    pub fn set_mu(&mut self, mu: f32) -> Result<(), ConfigError> {
        if !(mu > 0.0) || !mu.is_finite() {
            return Err(ConfigError::InvalidStepSize);
        }
        self.mu = mu;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::mean_power;
    use crate::reference::ReferenceBank;
    use core::f32::consts::PI;

    #[test]
    fn test_new_rejects_bad_step_size() {
        assert_eq!(
            LmsFilter::<16>::new(0.0).err(),
            Some(ConfigError::InvalidStepSize)
        );
        assert_eq!(
            LmsFilter::<16>::new(-0.01).err(),
            Some(ConfigError::InvalidStepSize)
        );
        assert_eq!(
            LmsFilter::<16>::new(f32::NAN).err(),
            Some(ConfigError::InvalidStepSize)
        );
        assert_eq!(
            LmsFilter::<16>::new(f32::INFINITY).err(),
            Some(ConfigError::InvalidStepSize)
        );
        assert!(LmsFilter::<16>::new(0.01).is_ok());
    }

    #[test]
    fn test_cold_start_outputs_exactly_zero() {
        let mut lms = LmsFilter::<8>::new(0.01).unwrap();

        for n in 0..8 {
            let out = lms.process_sample(1.0, 5.0 + n as f32);
            assert_eq!(out.predicted, 0.0);
            assert_eq!(out.cleaned, 0.0);
        }
        // weights must not have moved during warm-up
        assert_eq!(lms.weights(), &[0.0; 8]);

        // first adapted output appears at index N
        let out = lms.process_sample(1.0, 5.0);
        assert_eq!(out.predicted, 0.0); // weights still zero at this point
        assert_eq!(out.cleaned, 5.0);
        assert!(lms.weights().iter().any(|&w| w != 0.0));
    }

    #[test]
    fn test_zero_reference_leaves_measured_untouched() {
        // With an all-zero reference the weights never move and the cleaned
        // output equals the measured input from index N on.
        let mut lms = LmsFilter::<4>::new(0.1).unwrap();

        for n in 0..200 {
            let measured = 1.0 + 0.5 * libm::sinf(0.3 * n as f32);
            let out = lms.process_sample(0.0, measured);
            if n < 4 {
                assert_eq!(out.cleaned, 0.0);
            } else {
                assert_eq!(out.predicted, 0.0);
                assert_eq!(out.cleaned, measured);
            }
        }
        assert_eq!(lms.weights(), &[0.0; 4]);
    }

    #[test]
    fn test_block_length_mismatch_mutates_nothing() {
        let mut lms = LmsFilter::<8>::new(0.01).unwrap();
        let reference = [1.0; 500];
        let measured = [1.0; 600];
        let mut out = [CancelOutput::default(); 600];

        assert_eq!(
            lms.process_block(&reference, &measured, &mut out),
            Err(InputError::LengthMismatch)
        );
        assert_eq!(lms.weights(), &[0.0; 8]);
        // cold start state untouched: next sample is still warm-up
        assert_eq!(lms.process_sample(1.0, 3.0).cleaned, 0.0);
    }

    #[test]
    fn test_block_empty_input() {
        let mut lms = LmsFilter::<8>::new(0.01).unwrap();
        let mut out: [CancelOutput; 0] = [];
        assert_eq!(
            lms.process_block(&[], &[], &mut out),
            Err(InputError::Empty)
        );
    }

    #[test]
    fn test_block_length_invariant() {
        let mut lms = LmsFilter::<4>::new(0.01).unwrap();
        let reference = [0.5; 64];
        let measured = [1.0; 64];
        let mut out = [CancelOutput::default(); 64];
        lms.process_block(&reference, &measured, &mut out).unwrap();
        for o in &out[4..] {
            assert_eq!(o.cleaned, measured[0] - o.predicted);
        }
    }

    #[test]
    fn test_adaptation_disabled_freezes_weights() {
        let mut lms = LmsFilter::<4>::new(0.05).unwrap();
        lms.set_adaptation(false);
        assert!(!lms.adaptation_enabled());

        for n in 0..100 {
            let x = libm::sinf(0.4 * n as f32);
            let out = lms.process_sample(x, 2.0 * x);
            if n >= 4 {
                // zero weights, frozen: prediction stays zero
                assert_eq!(out.predicted, 0.0);
                assert_eq!(out.cleaned, 2.0 * x);
            }
        }
        assert_eq!(lms.weights(), &[0.0; 4]);
    }

    #[test]
    fn test_cancels_mains_harmonics() {
        // Constant 1.0 contaminated by 50/100/150 Hz pickup; the reference is
        // the unit-amplitude harmonic sum at the same rate.
        let fs = 1000.0;
        let bank = ReferenceBank::<3>::harmonics(50.0, fs).unwrap();
        let mut lms = LmsFilter::<16>::new(0.005).unwrap();

        let mut raw_tail = [0.0f32; 300];
        let mut cleaned_tail = [0.0f32; 300];

        for n in 0..1000 {
            let t = n as f32 / fs;
            let pickup = 0.3 * libm::sinf(2.0 * PI * 50.0 * t)
                + 0.2 * libm::sinf(2.0 * PI * 100.0 * t)
                + 0.1 * libm::sinf(2.0 * PI * 150.0 * t);
            let measured = 1.0 + pickup;
            let out = lms.process_sample(bank.scalar_at(n), measured);

            if n >= 700 {
                raw_tail[n - 700] = measured - 1.0;
                cleaned_tail[n - 700] = out.cleaned - 1.0;
            }
        }

        let raw_power = mean_power(&raw_tail).unwrap();
        let residual_power = mean_power(&cleaned_tail).unwrap();
        assert!(
            residual_power < 0.5 * raw_power,
            "interference not suppressed: raw {} residual {}",
            raw_power,
            residual_power
        );
    }

    #[test]
    fn test_set_mu() {
        let mut lms = LmsFilter::<8>::new(0.01).unwrap();
        lms.set_mu(0.05).unwrap();
        assert_eq!(lms.mu(), 0.05);
        assert_eq!(lms.set_mu(0.0), Err(ConfigError::InvalidStepSize));
        assert_eq!(lms.mu(), 0.05);
    }

    #[test]
    fn test_reset_restores_cold_start() {
        let mut lms = LmsFilter::<4>::new(0.05).unwrap();
        for n in 0..50 {
            lms.process_sample(libm::sinf(0.5 * n as f32), 1.0);
        }
        assert!(lms.weights().iter().any(|&w| w != 0.0));

        lms.reset();
        assert_eq!(lms.weights(), &[0.0; 4]);
        for _ in 0..4 {
            assert_eq!(lms.process_sample(1.0, 7.0).cleaned, 0.0);
        }
    }

    #[test]
    fn test_order() {
        let lms = LmsFilter::<24>::new(0.01).unwrap();
        assert_eq!(lms.order(), 24);
        assert_eq!(lms.weights().len(), 24);
    }
}
