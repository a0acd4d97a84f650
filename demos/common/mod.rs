//! Synthetic signal generators for the demo programs.
//!
//! The library only consumes sample streams; acquisition is a collaborator's
//! job. The demos stand that collaborator in with deterministic generators:
//! sinusoids and seeded Gaussian noise, reproducible run to run.

#![allow(dead_code)] // Functions used across multiple demos

use std::f32::consts::PI;

/// Generates a sine wave.
///
/// # Arguments
/// * `samples` - Number of samples to generate
/// * `sample_rate` - Sample rate in Hz
/// * `frequency` - Sine frequency in Hz
/// * `amplitude` - Peak amplitude
pub fn sine_wave(samples: usize, sample_rate: f32, frequency: f32, amplitude: f32) -> Vec<f32> {
    (0..samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generates zero-mean Gaussian noise with the given standard deviation.
///
/// A fixed-seed LCG drives a Box-Muller transform, so every run of a demo
/// sees the same noise.
///
/// # Arguments
/// * `samples` - Number of samples to generate
/// * `sigma` - Standard deviation
/// * `seed` - Random seed for reproducibility
pub fn gaussian_noise(samples: usize, sigma: f32, seed: u64) -> Vec<f32> {
    fn unit(state: &mut u64) -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((*state >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    let mut state = seed;
    let mut out = Vec::with_capacity(samples);
    while out.len() < samples {
        let u1 = unit(&mut state);
        let u2 = unit(&mut state);
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        out.push(sigma * (r * theta.cos()) as f32);
        if out.len() < samples {
            out.push(sigma * (r * theta.sin()) as f32);
        }
    }
    out
}

/// Generates a composite measurement: a constant level plus Gaussian sensor
/// noise plus mains pickup at the given (frequency, amplitude) components.
pub fn measured_signal(
    samples: usize,
    sample_rate: f32,
    level: f32,
    noise_sigma: f32,
    components: &[(f32, f32)],
    seed: u64,
) -> Vec<f32> {
    let mut signal = vec![level; samples];

    for &(freq, amp) in components {
        let tone = sine_wave(samples, sample_rate, freq, amp);
        for (s, &x) in signal.iter_mut().zip(tone.iter()) {
            *s += x;
        }
    }

    if noise_sigma > 0.0 {
        let noise = gaussian_noise(samples, noise_sigma, seed);
        for (s, &n) in signal.iter_mut().zip(noise.iter()) {
            *s += n;
        }
    }

    signal
}
