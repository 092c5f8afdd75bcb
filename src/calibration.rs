//! Magnetometer hard-iron calibration

use log::{info, warn};

use crate::fixed::Q15;
use crate::types::ThreeAxis;

/// Removes a hard-iron offset from a magnetometer reading
///
/// # Example
/// ```
/// use q15_fusion::{ThreeAxis, Vector3Ext};
/// use q15_fusion::calibration::calibrate_magnetic;
///
/// let raw = ThreeAxis::from_real(30.0, -5.0, -40.0);
/// let hard_iron = ThreeAxis::from_real(10.0, -5.0, 2.0);
///
/// let calibrated = calibrate_magnetic(raw, hard_iron);
/// assert_eq!(calibrated, ThreeAxis::from_real(20.0, 0.0, -42.0));
/// ```
pub fn calibrate_magnetic(uncalibrated: ThreeAxis, hard_iron_offset: ThreeAxis) -> ThreeAxis {
    uncalibrated - hard_iron_offset
}

/// Calibration run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// Offset is fixed; samples pass straight through
    #[default]
    Idle,
    /// Collecting per-axis extremes
    Calibrating {
        /// Samples seen since the run started
        samples: u32,
    },
}

/// Min/max hard-iron estimator
///
/// While a run is active every magnetometer sample widens the per-axis
/// extremes. The sample after `required_samples` ends the run and the
/// offset becomes the centre of the observed range. A run that never saw a
/// sample leaves the previous offset in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardIronCalibration {
    hard_iron: ThreeAxis,
    state: CalibrationState,
    min: ThreeAxis,
    max: ThreeAxis,
    required_samples: u32,
}

impl HardIronCalibration {
    pub fn new(required_samples: u32) -> Self {
        Self {
            hard_iron: ThreeAxis::repeat(Q15::ZERO),
            state: CalibrationState::Idle,
            min: ThreeAxis::repeat(Q15::MAX),
            max: ThreeAxis::repeat(Q15::MIN),
            required_samples,
        }
    }

    /// Start a new run, discarding any extremes collected so far.
    pub fn begin(&mut self) {
        self.state = CalibrationState::Calibrating { samples: 0 };
        self.min = ThreeAxis::repeat(Q15::MAX);
        self.max = ThreeAxis::repeat(Q15::MIN);
        info!("compass calibration requested, {} samples", self.required_samples);
    }

    /// Feed one raw magnetometer sample. Returns true when this sample
    /// finished the run.
    pub fn update(&mut self, mag: &ThreeAxis) -> bool {
        let CalibrationState::Calibrating { samples } = self.state else {
            return false;
        };
        let samples = samples.saturating_add(1);

        if samples <= self.required_samples {
            self.min = self.min.zip_map(mag, Ord::min);
            self.max = self.max.zip_map(mag, Ord::max);
            self.state = CalibrationState::Calibrating { samples };
            return false;
        }

        self.state = CalibrationState::Idle;
        if self.min.iter().any(|&v| v == Q15::MAX) || self.max.iter().any(|&v| v == Q15::MIN) {
            warn!("compass calibration saw no samples, keeping previous offset");
            return true;
        }

        self.hard_iron = self.max.zip_map(&self.min, Q15::midpoint);
        info!(
            "compass calibration completed, offsets: {} {} {}",
            self.hard_iron.x, self.hard_iron.y, self.hard_iron.z
        );
        true
    }

    pub fn apply(&self, mag: ThreeAxis) -> ThreeAxis {
        calibrate_magnetic(mag, self.hard_iron)
    }

    pub fn hard_iron(&self) -> ThreeAxis {
        self.hard_iron
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, CalibrationState::Calibrating { .. })
    }

    /// Zero offset, no run in progress.
    pub fn reset(&mut self) {
        *self = Self::new(self.required_samples);
    }
}
