//! Sensor fusion pipeline

use log::debug;

use crate::compass::ECompass;
use crate::error::{Error, Result};
use crate::fixed::Q15;
use crate::gravity::{GravityFilter, linear_acceleration};
use crate::rotation::{PRECISE_GRAVITY_LIMIT, rotation_vector, rotation_vector_precise};
use crate::step::StepDetector;
use crate::tilt::TiltDetector;
use crate::types::{FusionOutput, FusionSettings, StepInfo, ThreeAxis};

/// Runs every component once per accelerometer/magnetometer sample
///
/// Data flows gravity filter → linear acceleration → e-compass → rotation
/// vector → tilt detector → step detector. The compass and the rotation
/// vector work from the filtered gravity; tilt and step work from the raw
/// accelerometer.
///
/// A component that fails on a sample only loses its own output for that
/// cycle. Every other component still sees the sample.
///
/// # Example
/// ```
/// use q15_fusion::{FusionSettings, SensorFusion, ThreeAxis, Vector3Ext};
///
/// let mut fusion = SensorFusion::new(FusionSettings::default())?;
/// let accel = ThreeAxis::from_real(0.0, 0.0, 9.8);
/// let mag = ThreeAxis::from_real(0.0, 22.0, -42.0);
///
/// let output = fusion.update(accel, mag, 0);
/// assert!(output.linear_acceleration.is_origin());
/// assert!(!output.tilt_detected);
/// # Ok::<(), q15_fusion::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SensorFusion {
    settings: FusionSettings,
    gravity_filter: GravityFilter,
    compass: ECompass,
    tilt: TiltDetector,
    step: StepDetector,
    gravity: ThreeAxis,
    linear_acceleration: ThreeAxis,
}

impl SensorFusion {
    /// Build every component from `settings`.
    ///
    /// Fails when the gravity filter cannot be designed, for example with a
    /// zero sample rate or a cutoff at or above half the sample rate, and
    /// with [`Error::ArithmeticOverflow`] when the precise rotation vector is
    /// requested with `standard_gravity` above
    /// [`PRECISE_GRAVITY_LIMIT`] (m/s² rather than g).
    pub fn new(settings: FusionSettings) -> Result<Self> {
        if settings.precise_rotation_vector
            && settings.standard_gravity.abs() > PRECISE_GRAVITY_LIMIT
        {
            return Err(Error::ArithmeticOverflow);
        }
        Ok(Self {
            settings,
            gravity_filter: GravityFilter::new(&settings)?,
            compass: ECompass::new(&settings),
            tilt: TiltDetector::new(&settings),
            step: StepDetector::new(&settings),
            gravity: ThreeAxis::repeat(Q15::ZERO),
            linear_acceleration: ThreeAxis::repeat(Q15::ZERO),
        })
    }

    /// Process one sample pair
    ///
    /// # Arguments
    /// * `accel` - Accelerometer reading in m/s² (g with precise rotation vectors)
    /// * `mag` - Magnetometer reading in µT (gauss with precise rotation vectors)
    /// * `timestamp` - Caller's timestamp, returned unchanged
    ///
    /// An arithmetic failure in the rotation vector leaves
    /// `rotation_vector` as `None`; in the tilt detector it reports no
    /// tilt; in the step detector it credits no step for the sample.
    pub fn update(&mut self, accel: ThreeAxis, mag: ThreeAxis, timestamp: u32) -> FusionOutput {
        self.gravity = self.gravity_filter.process(accel);
        self.linear_acceleration = linear_acceleration(accel, self.gravity);

        let orientation = self.compass.process(mag, self.gravity);
        let rotation_vector = if self.settings.precise_rotation_vector {
            rotation_vector_precise(mag, self.gravity)
        } else {
            rotation_vector(mag, self.gravity)
        }
        .unwrap_or_else(|err| {
            debug!("rotation vector dropped: {}", err);
            None
        });

        let tilt_detected = self.tilt.process(accel).unwrap_or_else(|err| {
            debug!("tilt check dropped: {}", err);
            false
        });
        let step = self.step.process(accel).unwrap_or_else(|err| {
            debug!("step group dropped: {}", err);
            StepInfo {
                count: self.step.count(),
                detect: false,
            }
        });

        FusionOutput {
            timestamp,
            gravity: self.gravity,
            linear_acceleration: self.linear_acceleration,
            orientation,
            rotation_vector,
            tilt_detected,
            step,
        }
    }

    /// Start a hard-iron calibration run on the compass.
    pub fn calibrate_compass(&mut self) {
        self.compass.calibrate();
    }

    /// Return every component to its freshly constructed state, hard-iron
    /// offset included.
    pub fn reset(&mut self) {
        self.gravity_filter.reset();
        self.compass.reset();
        self.tilt.reset();
        self.step.reset();
        self.gravity = ThreeAxis::repeat(Q15::ZERO);
        self.linear_acceleration = ThreeAxis::repeat(Q15::ZERO);
    }

    /// Replace the settings and rebuild every component. On error the
    /// current configuration is left untouched.
    pub fn set_settings(&mut self, settings: FusionSettings) -> Result<()> {
        *self = Self::new(settings)?;
        Ok(())
    }

    pub fn settings(&self) -> FusionSettings {
        self.settings
    }

    /// Gravity estimate from the last update
    pub fn gravity(&self) -> ThreeAxis {
        self.gravity
    }

    /// Linear acceleration from the last update
    pub fn linear_acceleration(&self) -> ThreeAxis {
        self.linear_acceleration
    }

    pub fn compass(&self) -> &ECompass {
        &self.compass
    }

    pub fn step_count(&self) -> u32 {
        self.step.count()
    }
}
