mod lms;
mod notch;
mod smooth;
mod vector;

pub use lms::{CancelOutput, LmsFilter};
pub use notch::{BiquadCoeffs, NotchBank};
pub use smooth::{ExponentialSmoother, MovingAverage};
pub use vector::VectorLms;

/// Errors from invalid filter or generator configuration.
///
/// Configuration is validated at construction time and never silently
/// coerced; a constructor that returns one of these has created no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Step size (learning rate) is not positive and finite
    InvalidStepSize,

    /// Smoothing factor is outside (0, 1]
    InvalidSmoothing,

    /// Sample rate is not positive and finite
    InvalidSampleRate,

    /// Quality factor is not positive and finite
    InvalidQualityFactor,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ConfigError::InvalidStepSize => "step size must be positive and finite",
            ConfigError::InvalidSmoothing => "smoothing factor must be in (0, 1]",
            ConfigError::InvalidSampleRate => "sample rate must be positive and finite",
            ConfigError::InvalidQualityFactor => "quality factor must be positive and finite",
        })
    }
}

impl core::error::Error for ConfigError {}

/// Errors from invalid input sequences.
///
/// Detected before any weight or state mutation, so a failed batch call
/// leaves the filter exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Reference, measured, and output slices are not all the same length
    LengthMismatch,

    /// Input slices are empty
    Empty,
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            InputError::LengthMismatch => {
                "reference, measured, and output sequences must have equal lengths"
            }
            InputError::Empty => "input sequences must not be empty",
        })
    }
}

impl core::error::Error for InputError {}
