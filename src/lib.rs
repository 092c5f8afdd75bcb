#![no_std]

//! Q15 Fusion - fixed-point sensor fusion for microcontrollers without an FPU
//!
//! Every computation runs on 32-bit fixed-point values (Q15 by default, with
//! Q24 and Q12 formats and a 64-bit intermediate type) so the library fits
//! small Cortex-M0 class parts.
//! From accelerometer and magnetometer samples it derives:
//!
//! - a gravity estimate and linear acceleration (cascaded biquad low-pass)
//! - tilt-compensated roll, pitch and heading with hard-iron calibration
//! - an orientation quaternion ("rotation vector")
//! - a one-shot tilt event
//! - a step count
//!
//! The crate is `#![no_std]` and allocation free.
//!
//! # Quick Start
//!
//! ```rust
//! use q15_fusion::{FusionSettings, SensorFusion, ThreeAxis, Vector3Ext};
//!
//! let mut fusion = SensorFusion::new(FusionSettings::default())?;
//!
//! // Sensor readings
//! let accelerometer = ThreeAxis::from_real(0.0, 0.0, 9.8); // m/s²
//! let magnetometer = ThreeAxis::from_real(22.0, 0.0, -42.0); // µT
//!
//! // Update once per sample (50 Hz by default)
//! let output = fusion.update(accelerometer, magnetometer, 0);
//!
//! // Heading in degrees, clockwise from magnetic north
//! let yaw = output.orientation.yaw.unwrap();
//! assert!((yaw.to_f32() - 90.0).abs() < 0.01);
//! # Ok::<(), q15_fusion::Error>(())
//! ```

#[cfg(test)]
extern crate std;

pub mod calibration;
mod compass;
mod error;
mod fixed;
mod fusion;
mod gravity;
mod lpf;
mod math;
pub mod rotation;
mod step;
mod tilt;
mod trig;
mod trig_table;
mod types;
mod wide;

// Re-export all public types and functions
pub use calibration::{CalibrationState, HardIronCalibration, calibrate_magnetic};
pub use compass::ECompass;
pub use error::{Error, Result};
pub use fixed::{Fixed, Q12, Q15, Q24};
pub use fusion::SensorFusion;
pub use gravity::{GravityFilter, linear_acceleration};
pub use lpf::{Biquad, BiquadCoefficients, CascadedBiquad};
pub use math::Vector3Ext;
pub use rotation::{rotation_vector, rotation_vector_precise};
pub use step::StepDetector;
pub use tilt::TiltDetector;
pub use types::*;
pub use wide::{Wide, WideQ15, WideQ24};
