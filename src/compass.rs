//! Tilt-compensated e-compass

use log::debug;

use crate::calibration::{CalibrationState, HardIronCalibration};
use crate::error::Result;
use crate::fixed::Q15;
use crate::math::Vector3Ext;
use crate::types::{Euler, FusionSettings, ThreeAxis};

const DEG_180: Q15 = Q15::from_int(180);

/// Roll, pitch and magnetic heading from gravity and magnetometer readings
///
/// Magnetometer samples are corrected by the current hard-iron offset, which
/// starts at zero and is re-estimated by a calibration run
/// ([`ECompass::calibrate`]) spanning `compass_cal_samples` samples.
///
/// # Example
/// ```
/// use q15_fusion::{ECompass, FusionSettings, Q15, ThreeAxis, Vector3Ext};
///
/// let mut compass = ECompass::new(&FusionSettings::default());
/// let gravity = ThreeAxis::from_real(0.0, 0.0, 9.8);
/// let field = ThreeAxis::from_real(0.0, 22.0, -42.0);
///
/// let euler = compass.process(field, gravity);
/// assert_eq!(euler.roll, Q15::ZERO);
/// let yaw = euler.yaw.unwrap().to_f32();
/// assert!((yaw - 180.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECompass {
    calibration: HardIronCalibration,
}

impl ECompass {
    pub fn new(settings: &FusionSettings) -> Self {
        Self {
            calibration: HardIronCalibration::new(settings.compass_cal_samples),
        }
    }

    /// Start a hard-iron calibration run. The device should be turned
    /// through as many orientations as possible while it runs.
    pub fn calibrate(&mut self) {
        self.calibration.begin();
    }

    /// Update calibration with `mag` and compute orientation.
    ///
    /// `accel` is normally the gravity estimate rather than the raw
    /// accelerometer. Yaw is `None` when gravity has no component along one
    /// of the two tilt planes.
    pub fn process(&mut self, mag: ThreeAxis, accel: ThreeAxis) -> Euler {
        self.calibration.update(&mag);
        let mag = self.calibration.apply(mag);

        let roll = accel.x.atan2(accel.z).to_degrees();
        let pitch = -accel.y.atan2(accel.z).to_degrees();
        let yaw = heading(&mag, &accel).unwrap_or_else(|err| {
            debug!("heading dropped: {}", err);
            None
        });

        Euler { roll, pitch, yaw }
    }

    pub fn hard_iron(&self) -> ThreeAxis {
        self.calibration.hard_iron()
    }

    pub fn calibration_state(&self) -> CalibrationState {
        self.calibration.state()
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.is_calibrating()
    }

    pub fn reset(&mut self) {
        self.calibration.reset();
    }
}

/// Project the field onto the horizontal plane, using the normalised
/// accelerometer components as direction cosines, and take its bearing.
fn heading(mag: &ThreeAxis, accel: &ThreeAxis) -> Result<Option<Q15>> {
    let hyp_xz = ThreeAxis::new(accel.x, Q15::ZERO, accel.z).length()?;
    if hyp_xz == Q15::ZERO {
        debug!("heading undefined, no gravity in the x-z plane");
        return Ok(None);
    }
    let projected_x = mag.x * (accel.z / hyp_xz) + mag.z * (accel.x / hyp_xz);

    let hyp_yz = ThreeAxis::new(Q15::ZERO, accel.y, accel.z).length()?;
    if hyp_yz == Q15::ZERO {
        debug!("heading undefined, no gravity in the y-z plane");
        return Ok(None);
    }
    let projected_y = mag.y * (accel.z / hyp_yz) + mag.z * (accel.y / hyp_yz);

    Ok(Some(DEG_180 - projected_x.atan2(projected_y).to_degrees()))
}
