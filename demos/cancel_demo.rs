//! Adaptive mains cancellation demonstration.
//!
//! Simulates a constant 1.0-valued quantity measured through sensor noise
//! and 50 Hz mains pickup with two harmonics, then cleans it three ways:
//! the multi-channel LMS canceller, the delay-line LMS canceller, and the
//! fixed notch-bank baseline. Prints a power/RMS comparison and renders the
//! adaptive result.
//!
//! Run with: `cargo run --example cancel_demo`
//!
//! Output: `output/cancel_demo.png` and `output/cancel_demo.csv`

mod common;

use plotters::prelude::*;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use dehum::{
    mean_power, signal_rms, CancelOutput, LmsFilter, NotchBank, ReferenceBank, VectorLms,
};

const SAMPLE_RATE: f32 = 1000.0; // 1 kHz
const SAMPLES: usize = 1000; // 1 second
const LEVEL: f32 = 1.0;
const NOISE_SIGMA: f32 = 0.05;
const MAINS: [(f32, f32); 3] = [(50.0, 0.3), (100.0, 0.2), (150.0, 0.1)];

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== dehum cancellation demo ===\n");

    println!("Simulating measurement...");
    println!("  - constant level {LEVEL}");
    println!("  - Gaussian sensor noise, sigma = {NOISE_SIGMA}");
    for (f, a) in MAINS {
        println!("  - mains pickup {f} Hz, amplitude {a}");
    }

    let measured = common::measured_signal(SAMPLES, SAMPLE_RATE, LEVEL, NOISE_SIGMA, &MAINS, 42);

    // a separate noise-only capture establishes the sensor's noise floor
    let noise_only = common::gaussian_noise(SAMPLES, NOISE_SIGMA, 1337);
    let noise_power = mean_power(&noise_only)?;

    // multi-channel form: one reference sinusoid per harmonic
    let bank = ReferenceBank::<3>::harmonics(50.0, SAMPLE_RATE)?;
    let mut reference_vectors = vec![[0.0f32; 3]; SAMPLES];
    bank.fill_vectors(0, &mut reference_vectors);

    let mut vector_lms = VectorLms::<3>::new(0.01)?;
    let mut vector_out = vec![CancelOutput::default(); SAMPLES];
    vector_lms.process_block(&reference_vectors, &measured, &mut vector_out)?;

    // delay-line form: the composite reference's own history is the input
    let mut reference_scalar = vec![0.0f32; SAMPLES];
    bank.fill_scalars(0, &mut reference_scalar);

    let mut line_lms = LmsFilter::<32>::new(0.002)?;
    let mut line_out = vec![CancelOutput::default(); SAMPLES];
    line_lms.process_block(&reference_scalar, &measured, &mut line_out)?;

    // fixed notch baseline, no reference needed
    let mut notch = NotchBank::<3>::harmonics(SAMPLE_RATE, 50.0, 30.0)?;
    let mut notch_out = measured.clone();
    notch.process_block(&mut notch_out);

    let vector_cleaned: Vec<f32> = vector_out.iter().map(|o| o.cleaned).collect();
    let vector_predicted: Vec<f32> = vector_out.iter().map(|o| o.predicted).collect();
    let line_cleaned: Vec<f32> = line_out.iter().map(|o| o.cleaned).collect();

    // compare over the settled tail so adaptation transients don't dominate
    let tail = SAMPLES / 2;
    println!("\nPower / RMS over the last {} samples:", SAMPLES - tail);
    println!(
        "  {:<22} {:>12} {:>12} {:>12}",
        "stream", "mean power", "rms", "signal rms"
    );
    report("raw measured", &measured[tail..], noise_power)?;
    report("vector LMS cleaned", &vector_cleaned[tail..], noise_power)?;
    report("delay-line LMS cleaned", &line_cleaned[tail..], noise_power)?;
    report("notch bank", &notch_out[tail..], noise_power)?;

    println!(
        "\nLearned harmonic weights (true amplitudes 0.3/0.2/0.1): {:.3?}",
        vector_lms.weights()
    );

    println!("\nWriting CSV to output/cancel_demo.csv...");
    std::fs::create_dir_all("output")?;
    write_csv(&measured, &vector_predicted, &vector_cleaned)?;

    println!("Generating plot to output/cancel_demo.png...");
    generate_plot(&measured, &vector_predicted, &vector_cleaned)?;

    println!("\nDone! Open output/cancel_demo.png to see the results.");
    Ok(())
}

fn report(label: &str, samples: &[f32], noise_power: f32) -> Result<(), Box<dyn Error>> {
    let power = mean_power(samples)?;
    println!(
        "  {:<22} {:>12.6} {:>12.6} {:>12.6}",
        label,
        power,
        power.sqrt(),
        signal_rms(power, noise_power)
    );
    Ok(())
}

fn write_csv(
    measured: &[f32],
    predicted: &[f32],
    cleaned: &[f32],
) -> Result<(), Box<dyn Error>> {
    let mut file = File::create("output/cancel_demo.csv")?;
    writeln!(file, "sample,time_ms,measured,predicted,cleaned")?;

    for i in 0..measured.len() {
        let time_ms = (i as f32 / SAMPLE_RATE) * 1000.0;
        writeln!(
            file,
            "{},{:.3},{:.6},{:.6},{:.6}",
            i, time_ms, measured[i], predicted[i], cleaned[i]
        )?;
    }

    Ok(())
}

fn generate_plot(
    measured: &[f32],
    predicted: &[f32],
    cleaned: &[f32],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new("output/cancel_demo.png", (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((3, 1));
    let panels: [(&str, &[f32], RGBColor); 3] = [
        ("Measured (level + noise + mains pickup)", measured, RGBColor(120, 120, 120)),
        ("Predicted interference (vector LMS)", predicted, RGBColor(230, 140, 30)),
        ("Cleaned output", cleaned, RGBColor(30, 120, 60)),
    ];

    for (area, (title, series, color)) in areas.iter().zip(panels.iter()) {
        let mut chart = ChartBuilder::on(area)
            .caption(*title, ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d(0f32..1000f32, -1.0f32..2.0f32)?;

        chart
            .configure_mesh()
            .x_desc("Time (ms)")
            .y_desc("Amplitude")
            .draw()?;

        chart.draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, &y)| {
                let t = (i as f32 / SAMPLE_RATE) * 1000.0;
                (t, y)
            }),
            ShapeStyle::from(color).stroke_width(1),
        ))?;

        // the true level, for reference
        chart.draw_series(LineSeries::new(
            [(0f32, LEVEL), (1000f32, LEVEL)],
            ShapeStyle::from(&BLACK).stroke_width(1),
        ))?;
    }

    root.present()?;
    Ok(())
}
