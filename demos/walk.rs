//! Recorded walk demonstration
//!
//! Replays `testdata/walk.csv` (50 Hz accelerometer and magnetometer samples)
//! through the fixed-point pipeline, prints step and tilt events as they
//! happen and plots the results to `walk_plots.png`.
//!
//! Run with: `cargo run --example walk`

use plotters::prelude::*;
use q15_fusion::{FusionOutput, FusionSettings, SensorFusion, ThreeAxis, Vector3Ext};
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct SensorData {
    timestamp_ms: u32,
    accel_x: f32,
    accel_y: f32,
    accel_z: f32,
    mag_x: f32,
    mag_y: f32,
    mag_z: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Recorded walk - gravity, heading, tilt and steps in Q15");

    let mut reader = csv::Reader::from_path("testdata/walk.csv")?;
    let mut fusion = SensorFusion::new(FusionSettings::default())?;
    let mut outputs = Vec::new();

    for result in reader.deserialize() {
        let data: SensorData = result?;
        let accelerometer = ThreeAxis::from_real(data.accel_x, data.accel_y, data.accel_z);
        let magnetometer = ThreeAxis::from_real(data.mag_x, data.mag_y, data.mag_z);

        let output = fusion.update(accelerometer, magnetometer, data.timestamp_ms);
        if output.step.detect {
            println!("{:>6} ms  steps: {}", output.timestamp, output.step.count);
        }
        if output.tilt_detected {
            println!("{:>6} ms  tilt detected", output.timestamp);
        }
        outputs.push(output);
    }

    if let Some(last) = outputs.last() {
        let yaw = last
            .orientation
            .yaw
            .map_or_else(|| "undefined".to_string(), |yaw| format!("{:.1}°", yaw.to_f32()));
        println!(
            "Processed {} samples: {} steps, final roll {:.1}°, pitch {:.1}°, yaw {}",
            outputs.len(),
            last.step.count,
            last.orientation.roll.to_f32(),
            last.orientation.pitch.to_f32(),
            yaw
        );
    }

    create_plots(&outputs)?;
    println!("Plots saved to walk_plots.png");
    Ok(())
}

fn seconds(output: &FusionOutput) -> f32 {
    output.timestamp as f32 / 1000.0
}

/// Three stacked charts: Euler angles, linear acceleration magnitude and the
/// running step count with the tilt event marked.
fn create_plots(outputs: &[FusionOutput]) -> Result<(), Box<dyn Error>> {
    let (Some(first), Some(last)) = (outputs.first(), outputs.last()) else {
        return Ok(());
    };
    let time_range = seconds(first)..seconds(last);

    let root = BitMapBackend::new("walk_plots.png", (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let charts = root.split_evenly((3, 1));

    let mut euler_chart = ChartBuilder::on(&charts[0])
        .caption("Recorded walk", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), -180f32..360f32)?;
    euler_chart.configure_mesh().y_desc("Degrees").draw()?;

    let angles: [(&str, RGBColor, fn(&FusionOutput) -> Option<f32>); 3] = [
        ("Roll", RED, |o| Some(o.orientation.roll.to_f32())),
        ("Pitch", GREEN, |o| Some(o.orientation.pitch.to_f32())),
        ("Yaw", BLUE, |o| o.orientation.yaw.map(|yaw| yaw.to_f32())),
    ];
    for (label, color, angle) in angles {
        euler_chart
            .draw_series(LineSeries::new(
                outputs
                    .iter()
                    .filter_map(|o| angle(o).map(|value| (seconds(o), value))),
                &color,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));
    }
    euler_chart.configure_series_labels().draw()?;

    let mut linear_chart = ChartBuilder::on(&charts[1])
        .margin(5)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), 0f32..8f32)?;
    linear_chart.configure_mesh().y_desc("Linear accel (m/s²)").draw()?;
    linear_chart.draw_series(LineSeries::new(
        outputs
            .iter()
            .map(|o| (seconds(o), o.linear_acceleration.to_real().norm())),
        &MAGENTA,
    ))?;

    let max_steps = last.step.count.max(1) as f32;
    let mut step_chart = ChartBuilder::on(&charts[2])
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range, 0f32..max_steps * 1.1)?;
    step_chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Steps")
        .draw()?;
    step_chart
        .draw_series(LineSeries::new(
            outputs.iter().map(|o| (seconds(o), o.step.count as f32)),
            &BLACK,
        ))?
        .label("Step count")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], BLACK));
    step_chart
        .draw_series(
            outputs
                .iter()
                .filter(|o| o.tilt_detected)
                .map(|o| Circle::new((seconds(o), max_steps * 0.5), 5, RED.filled())),
        )?
        .label("Tilt")
        .legend(|(x, y)| Circle::new((x + 5, y), 4, RED.filled()));
    step_chart.configure_series_labels().draw()?;

    root.present()?;
    Ok(())
}
