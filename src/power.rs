//! Signal power and RMS estimation with noise-floor compensation.
//!
//! The measurement chain reports its result as power/RMS: mean power is the
//! average of squared samples, RMS its square root. When the mean power of
//! the sensor's own noise has been captured beforehand (a noise-only run),
//! subtracting it isolates the true-signal power; finite-sample variance can
//! push that difference below zero, so the estimate clamps at zero instead of
//! producing a NaN downstream.
//!
//! Batch slices go through [`mean_power`] / [`rms`]; a stream being cleaned
//! sample-by-sample feeds a [`RunningPower`] instead.

/// Errors from power/RMS estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// A non-empty sample sequence is required
    EmptyInput,
}

impl core::fmt::Display for PowerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PowerError::EmptyInput => "a non-empty sample sequence is required",
        })
    }
}

impl core::error::Error for PowerError {}

/// Mean power of a sample sequence: the average of squared samples.
///
/// Accumulates in f64 so long captures do not lose precision.
///
/// # Errors
///
/// [`PowerError::EmptyInput`] for an empty slice.
///
/// # Example
///
/// ```
/// use dehum::{mean_power, PowerError};
///
/// assert_eq!(mean_power(&[3.0, 4.0]).unwrap(), 12.5);
/// assert_eq!(mean_power(&[]), Err(PowerError::EmptyInput));
/// ```
pub fn mean_power(samples: &[f32]) -> Result<f32, PowerError> {
    if samples.is_empty() {
        return Err(PowerError::EmptyInput);
    }

    let mut sum = 0.0f64;
    for &s in samples {
        sum += s as f64 * s as f64;
    }
    Ok((sum / samples.len() as f64) as f32)
}

/// Root-mean-square amplitude: `sqrt(mean_power)`.
///
/// # Errors
///
/// [`PowerError::EmptyInput`] for an empty slice.
pub fn rms(samples: &[f32]) -> Result<f32, PowerError> {
    Ok(libm::sqrtf(mean_power(samples)?))
}

/// True-signal power after noise-floor subtraction, clamped at zero.
///
/// `measured_power` comes from the signal-plus-noise capture,
/// `noise_power` from a noise-only capture. A noise floor measured above
/// the signal-plus-noise power (possible with finite samples) yields exactly
/// `0.0`, never a negative value.
///
/// # Example
///
/// ```
/// use dehum::signal_power;
///
/// assert_eq!(signal_power(1.05, 0.01), 1.04);
/// assert_eq!(signal_power(0.01, 0.02), 0.0);
/// ```
pub fn signal_power(measured_power: f32, noise_power: f32) -> f32 {
    let p = measured_power - noise_power;
    if p > 0.0 {
        p
    } else {
        0.0
    }
}

/// True-signal RMS after noise-floor subtraction.
///
/// The clamp in [`signal_power`] guarantees a real (never NaN) result.
pub fn signal_rms(measured_power: f32, noise_power: f32) -> f32 {
    libm::sqrtf(signal_power(measured_power, noise_power))
}

/// Streaming cumulative power/RMS tracker.
///
/// Accumulates the sum of squares of everything it has seen — the streaming
/// counterpart of [`mean_power`] for use on a cleaned output as it is
/// produced. Readouts are `None` until the first sample arrives.
///
/// # Example
///
/// ```
/// use dehum::RunningPower;
///
/// let mut tracker = RunningPower::new();
/// assert_eq!(tracker.mean_power(), None);
///
/// for _ in 0..10 {
///     tracker.update(2.0);
/// }
/// assert_eq!(tracker.mean_power(), Some(4.0));
/// assert_eq!(tracker.rms(), Some(2.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningPower {
    count: u64,
    sum_squared: f64,
}

impl RunningPower {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum_squared: 0.0,
        }
    }

    /// Consumes one sample.
    #[inline]
    pub fn update(&mut self, sample: f32) {
        self.count += 1;
        self.sum_squared += sample as f64 * sample as f64;
    }

    /// Mean power of all samples seen, or `None` before the first.
    pub fn mean_power(&self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }
        Some((self.sum_squared / self.count as f64) as f32)
    }

    /// RMS of all samples seen, or `None` before the first.
    pub fn rms(&self) -> Option<f32> {
        self.mean_power().map(libm::sqrtf)
    }

    /// Number of samples seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Discards all accumulated state.
    pub fn reset(&mut self) {
        self.count = 0;
        self.sum_squared = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_power_and_rms() {
        let constant = [2.0f32; 100];
        assert!((mean_power(&constant).unwrap() - 4.0).abs() < 1e-6);
        assert!((rms(&constant).unwrap() - 2.0).abs() < 1e-6);

        // unit sine has mean power 1/2
        let mut sine = [0.0f32; 1000];
        for (n, s) in sine.iter_mut().enumerate() {
            *s = libm::sinf(2.0 * core::f32::consts::PI * 50.0 * n as f32 / 1000.0);
        }
        assert!((mean_power(&sine).unwrap() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(mean_power(&[]), Err(PowerError::EmptyInput));
        assert_eq!(rms(&[]), Err(PowerError::EmptyInput));
    }

    #[test]
    fn test_noise_floor_clamp() {
        // noise floor above the measurement clamps to exactly zero
        assert_eq!(signal_power(0.01, 0.02), 0.0);
        assert_eq!(signal_power(1.0, 1.0), 0.0);
        assert_eq!(signal_rms(0.01, 0.02), 0.0);

        // ordinary case
        assert!((signal_power(1.045, 0.045) - 1.0).abs() < 1e-6);
        assert!((signal_rms(1.045, 0.045) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_running_power_matches_batch() {
        let samples = [0.5f32, -1.5, 2.0, 0.0, -0.25, 1.0];
        let mut tracker = RunningPower::new();
        for &s in &samples {
            tracker.update(s);
        }

        let batch = mean_power(&samples).unwrap();
        assert!((tracker.mean_power().unwrap() - batch).abs() < 1e-6);
        assert_eq!(tracker.count(), 6);
    }

    #[test]
    fn test_running_power_empty_and_reset() {
        let mut tracker = RunningPower::new();
        assert_eq!(tracker.mean_power(), None);
        assert_eq!(tracker.rms(), None);

        tracker.update(3.0);
        assert_eq!(tracker.mean_power(), Some(9.0));

        tracker.reset();
        assert_eq!(tracker.count(), 0);
        assert_eq!(tracker.mean_power(), None);
    }
}
