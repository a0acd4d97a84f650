//! Adaptive cancellation of mains interference in sensor measurements.
//!
//! `dehum` recovers a slowly varying physical quantity measured through a
//! noisy channel whose dominant contamination is structured periodic
//! interference — mains coupling at 50/60 Hz and harmonics — on top of small
//! random sensor noise. The interference's frequency content is known; its
//! amplitude and phase are not. An online LMS canceller learns them from a
//! reference waveform and subtracts the predicted interference sample by
//! sample.
//!
//! # Building blocks
//!
//! - [`ReferenceBank`] — synthesizes the reference: one unit sinusoid per
//!   known interference frequency, or their sum as a single composite
//!   waveform.
//! - [`LmsFilter`] — delay-line LMS canceller tapping one reference signal's
//!   recent history.
//! - [`VectorLms`] — multi-channel LMS canceller consuming one reference
//!   value per frequency each step.
//! - [`mean_power`] / [`rms`] / [`signal_power`] / [`RunningPower`] — power
//!   and RMS readout of the cleaned stream, with noise-floor subtraction.
//! - [`NotchBank`], [`MovingAverage`], [`ExponentialSmoother`] — the
//!   fixed-coefficient baselines the canceller is benchmarked against.
//! - [`spike`] — masking and bridging of burst interference at known
//!   trigger instants.
//!
//! Everything processes strictly in sample order: each weight update depends
//! on the previous one, so a stream is inherently sequential. One filter
//! instance owns one stream's state; independent streams take independent
//! instances.
//!
//! # Example
//!
//! ```
//! use dehum::{mean_power, ReferenceBank, VectorLms};
//!
//! let fs = 1000.0;
//! let bank = ReferenceBank::<1>::new([50.0], fs).unwrap();
//! let mut lms = VectorLms::<1>::new(0.01).unwrap();
//!
//! let mut tail = [0.0f32; 200];
//! for n in 0..1000 {
//!     let t = n as f32 / fs;
//!     // a 1.0-valued quantity seen through 50 Hz pickup
//!     let measured = 1.0 + 0.3 * libm::sinf(2.0 * core::f32::consts::PI * 50.0 * t);
//!     let out = lms.process_sample(&bank.vector_at(n), measured);
//!     if n >= 800 {
//!         tail[n - 800] = out.cleaned;
//!     }
//! }
//!
//! // the cleaned stream settles on the true value
//! let p = mean_power(&tail).unwrap();
//! assert!((p - 1.0).abs() < 0.05);
//! ```

#![no_std]

pub mod filter;
pub mod power;
pub mod reference;
pub mod spike;

pub use filter::{
    BiquadCoeffs, CancelOutput, ConfigError, ExponentialSmoother, InputError, LmsFilter,
    MovingAverage, NotchBank, VectorLms,
};
pub use power::{mean_power, rms, signal_power, signal_rms, PowerError, RunningPower};
pub use reference::ReferenceBank;
