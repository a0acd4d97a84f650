//! Smoothing-baseline comparison on a noisy constant measurement.
//!
//! No mains pickup here, just a constant level behind Gaussian sensor noise:
//! the setting where simple smoothers do well. A noise-only capture sets the
//! floor, then the raw, moving-average, and exponentially smoothed streams
//! are compared through noise-floor-subtracted signal power and RMS.
//!
//! Run with: `cargo run --example baseline_compare`

mod common;

use std::error::Error;

use dehum::{mean_power, signal_power, signal_rms, ExponentialSmoother, MovingAverage};

const SAMPLES: usize = 1000;
const SAMPLE_RATE: f32 = 1000.0;
const LEVEL: f32 = 1.0;
const NOISE_SIGMA: f32 = 0.1;
const WINDOW: usize = 10;
const ALPHA: f32 = 0.1;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== dehum baseline comparison ===\n");

    // 1. noise-only capture establishes the floor
    let noise_only = common::gaussian_noise(SAMPLES, NOISE_SIGMA, 7);
    let noise_power = mean_power(&noise_only)?;

    // 2. signal-plus-noise capture
    let measured = common::measured_signal(SAMPLES, SAMPLE_RATE, LEVEL, NOISE_SIGMA, &[], 42);
    let raw_power = mean_power(&measured)?;

    // 3. moving average
    let mut ma = MovingAverage::<WINDOW>::new();
    let mut ma_out = vec![0.0f32; SAMPLES];
    ma.process_block(&measured, &mut ma_out);
    let ma_power = mean_power(&ma_out)?;

    // 4. exponential smoother
    let mut exp = ExponentialSmoother::new(ALPHA)?;
    let mut exp_out = vec![0.0f32; SAMPLES];
    exp.process_block(&measured, &mut exp_out);
    let exp_power = mean_power(&exp_out)?;

    println!("Noise floor: mean power {:.6}\n", noise_power);

    println!("Unfiltered:");
    println!("  measured mean power:     {:.6}", raw_power);
    println!(
        "  signal power (estimate): {:.6}",
        signal_power(raw_power, noise_power)
    );
    println!(
        "  signal rms:              {:.6}",
        signal_rms(raw_power, noise_power)
    );

    println!("\nMoving average ({} samples):", WINDOW);
    println!("  filtered mean power:     {:.6}", ma_power);
    println!(
        "  signal power (estimate): {:.6}",
        signal_power(ma_power, noise_power)
    );
    println!(
        "  signal rms:              {:.6}",
        signal_rms(ma_power, noise_power)
    );

    println!("\nExponential smoother (alpha = {}):", ALPHA);
    println!("  filtered mean power:     {:.6}", exp_power);
    println!(
        "  signal power (estimate): {:.6}",
        signal_power(exp_power, noise_power)
    );
    println!(
        "  signal rms:              {:.6}",
        signal_rms(exp_power, noise_power)
    );

    Ok(())
}
