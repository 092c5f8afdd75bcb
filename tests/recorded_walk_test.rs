//! Replays a recorded 50 Hz session through the full pipeline
//!
//! `testdata/walk.csv` holds 30 s of accelerometer (m/s²) and magnetometer
//! (µT) samples: 3 s standing, 20 s walking at about 1.8 strides per second,
//! 3 s standing, then the device laid on its side. The horizontal field
//! points 60° from the device's +Y axis, so the expected heading is 120°.

use std::error::Error;

use q15_fusion::{FusionOutput, FusionSettings, SensorFusion, ThreeAxis, Vector3Ext};
use serde::Deserialize;

const EXPECTED_HEADING: f32 = 120.0;

#[derive(Debug, Deserialize)]
struct Record {
    timestamp_ms: u32,
    accel_x: f32,
    accel_y: f32,
    accel_z: f32,
    mag_x: f32,
    mag_y: f32,
    mag_z: f32,
}

fn replay() -> Result<Vec<FusionOutput>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path("testdata/walk.csv")?;
    let mut fusion = SensorFusion::new(FusionSettings::default())?;

    let mut outputs = Vec::new();
    for result in reader.deserialize() {
        let record: Record = result?;
        let accel = ThreeAxis::from_real(record.accel_x, record.accel_y, record.accel_z);
        let mag = ThreeAxis::from_real(record.mag_x, record.mag_y, record.mag_z);
        outputs.push(fusion.update(accel, mag, record.timestamp_ms));
    }
    Ok(outputs)
}

fn heading_error(output: &FusionOutput) -> f32 {
    let yaw = output.orientation.yaw.expect("heading defined while upright").to_f32();
    let difference = (yaw - EXPECTED_HEADING).rem_euclid(360.0);
    difference.min(360.0 - difference)
}

#[test]
fn test_recording_loads() -> Result<(), Box<dyn Error>> {
    let outputs = replay()?;
    assert_eq!(outputs.len(), 1500);
    for (index, output) in outputs.iter().enumerate() {
        assert_eq!(output.timestamp, index as u32 * 20);
    }
    Ok(())
}

#[test]
fn test_steps_counted_while_walking() -> Result<(), Box<dyn Error>> {
    let outputs = replay()?;

    let credits: Vec<_> = outputs.iter().filter(|output| output.step.detect).collect();
    let first = credits.first().expect("walking should be detected");
    assert_eq!(first.step.count, 5);
    assert!(first.timestamp > 3000, "first credit at {} ms", first.timestamp);

    // Nothing is credited while standing or lying still
    for credit in &credits {
        assert!(
            (3000..24000).contains(&credit.timestamp),
            "step credited at {} ms",
            credit.timestamp
        );
    }

    // 36 strides; the first crossing only starts the cadence clock
    let total = outputs.last().map_or(0, |output| output.step.count);
    assert!((33..=37).contains(&total), "counted {} steps", total);
    Ok(())
}

#[test]
fn test_tilt_detected_when_laid_down() -> Result<(), Box<dyn Error>> {
    let outputs = replay()?;

    let tilts: Vec<u32> = outputs
        .iter()
        .filter(|output| output.tilt_detected)
        .map(|output| output.timestamp)
        .collect();
    assert_eq!(tilts.len(), 1, "tilt reported at {:?}", tilts);
    assert!(tilts[0] >= 26000, "tilt reported during the walk at {} ms", tilts[0]);
    Ok(())
}

#[test]
fn test_heading_while_upright() -> Result<(), Box<dyn Error>> {
    let outputs = replay()?;

    for output in &outputs {
        let standing = (1000..3000).contains(&output.timestamp)
            || (24000..26000).contains(&output.timestamp);
        let walking = (4000..23000).contains(&output.timestamp);

        if standing {
            let error = heading_error(output);
            assert!(error < 6.0, "heading off by {} at {} ms", error, output.timestamp);
        } else if walking {
            // Projection only approximates tilt compensation
            let error = heading_error(output);
            assert!(error < 15.0, "heading off by {} at {} ms", error, output.timestamp);
        }
    }
    Ok(())
}

#[test]
fn test_gravity_and_linear_acceleration() -> Result<(), Box<dyn Error>> {
    let outputs = replay()?;

    for output in &outputs {
        let gravity = output.gravity.to_real().norm();
        assert!((7.5..12.5).contains(&gravity), "|gravity| {} at {} ms", gravity, output.timestamp);

        if let Some(quat) = output.rotation_vector {
            let norm = quat.norm_squared().to_f32();
            assert!((norm - 1.0).abs() < 0.005, "norm² {} at {} ms", norm, output.timestamp);
        }
    }

    // Walking shows up as linear acceleration, standing does not
    let peak = |range: core::ops::Range<u32>| {
        outputs
            .iter()
            .filter(|output| range.contains(&output.timestamp))
            .map(|output| output.linear_acceleration.to_real().norm())
            .fold(0.0f32, f32::max)
    };
    assert!(peak(5000..20000) > 2.0);
    assert!(peak(24000..26000) < 0.6);
    Ok(())
}
