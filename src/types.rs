//! Core value types and settings shared by the fusion components

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::error::Result;
use crate::fixed::Q15;

/// Three-axis sensor sample or derived vector in Q15.
///
/// Accelerations are in m/s², magnetic fields in µT. Component-wise
/// addition, subtraction and negation come from nalgebra.
///
/// # Example
/// ```
/// use q15_fusion::{Q15, ThreeAxis, Vector3Ext};
///
/// let accel = ThreeAxis::from_real(0.0, 0.0, 9.8);
/// let gravity = ThreeAxis::from_real(0.0, 0.0, 9.8);
/// assert!((accel - gravity).is_origin());
/// ```
pub type ThreeAxis = Vector3<Q15>;

/// Device orientation in degrees from the e-compass
///
/// Roll and pitch always exist. Yaw is `None` when the device is oriented so
/// that the horizontal projection of the magnetic field cannot be formed
/// (gravity lying along a horizontal axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Euler {
    /// Rotation about the device Y axis, `atan2(ax, az)`
    pub roll: Q15,
    /// Rotation about the device X axis, `-atan2(ay, az)`
    pub pitch: Q15,
    /// Heading in degrees, `[0, 360]`
    pub yaw: Option<Q15>,
}

/// Orientation quaternion in Q15
///
/// Produced by the rotation vector. Components are individually bounded by
/// one and the norm is one to within fixed-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quat {
    pub x: Q15,
    pub y: Q15,
    pub z: Q15,
    pub w: Q15,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: Q15::ZERO,
        y: Q15::ZERO,
        z: Q15::ZERO,
        w: Q15::ONE,
    };

    /// `x² + y² + z² + w²`, one for a well-formed rotation.
    pub fn norm_squared(&self) -> Q15 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Floating-point copy for display or for handing to nalgebra.
    pub fn to_quaternion(&self) -> Quaternion<f32> {
        Quaternion::new(self.w.to_f32(), self.x.to_f32(), self.y.to_f32(), self.z.to_f32())
    }

    /// Floating-point rotation, renormalised.
    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_quaternion(self.to_quaternion())
    }
}

/// Step detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepInfo {
    /// Total steps credited since the last reset
    pub count: u32,
    /// True on the sample where steps were credited
    pub detect: bool,
}

/// Everything derived from one accelerometer/magnetometer sample
///
/// Returned by [`crate::SensorFusion::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionOutput {
    /// Timestamp supplied with the sample, passed through untouched
    pub timestamp: u32,
    /// Low-pass filtered acceleration in m/s²
    pub gravity: ThreeAxis,
    /// Acceleration with gravity removed, in m/s²
    pub linear_acceleration: ThreeAxis,
    /// E-compass roll, pitch and yaw in degrees
    pub orientation: Euler,
    /// Rotation vector; `None` when gravity or the field is degenerate
    pub rotation_vector: Option<Quat>,
    /// True on the one sample where tilt was declared
    pub tilt_detected: bool,
    /// Step count and whether steps were credited on this sample
    pub step: StepInfo,
}

/// Sensor fusion settings
///
/// Configuration for every component. `Default` reproduces the reference
/// tuning for a 50 Hz accelerometer stream; [`FusionSettings::with_sample_rate`]
/// derives the rate-dependent sample counts for other rates.
///
/// # Example
/// ```
/// use q15_fusion::{FusionSettings, Q15};
///
/// let settings = FusionSettings {
///     gravity_filter_cutoff_hz: Q15::from_f32(1.0), // heavier smoothing
///     tilt_angle_threshold_deg: Q15::from_int(45),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FusionSettings {
    /// Accelerometer sample rate in Hz
    ///
    /// Sets the gravity filter's sampling period. The sample-count settings
    /// below are expressed in samples and do not follow this value
    /// automatically; use [`FusionSettings::with_sample_rate`] for that.
    pub sample_rate_hz: Q15,
    /// Quality factor of each gravity low-pass biquad (0.707107, Butterworth)
    pub gravity_filter_q: Q15,
    /// Cutoff of each gravity low-pass biquad in Hz
    ///
    /// Must stay below half the sample rate, where the prewarped gain
    /// `tan(π·fc/fs)` is still finite.
    pub gravity_filter_cutoff_hz: Q15,
    /// Gravity the Z-axis filter is seeded with, in m/s²
    pub standard_gravity: Q15,
    /// Angle between consecutive mean accelerations that declares a tilt, in degrees
    pub tilt_angle_threshold_deg: Q15,
    /// Minimum change in acceleration magnitude (m/s²) that moves the step envelope
    pub step_sensitivity: Q15,
    /// Shortest accepted interval between step crossings, in samples (inclusive)
    pub step_cadence_min_samples: u32,
    /// Longest accepted interval between step crossings, in samples (exclusive)
    pub step_cadence_max_samples: u32,
    /// Magnetometer samples collected by a hard-iron calibration run
    pub compass_cal_samples: u32,
    /// Compute the rotation vector in Q24
    ///
    /// Q24 holds values up to ±128, so this only suits inputs in normalised
    /// units (g and gauss); m/s² and µT inputs overflow. `standard_gravity`
    /// must then be given in g as well.
    pub precise_rotation_vector: bool,
}

impl Default for FusionSettings {
    fn default() -> Self {
        Self {
            sample_rate_hz: Q15::from_int(50),
            gravity_filter_q: Q15::from_f32(0.707107),
            gravity_filter_cutoff_hz: Q15::from_f32(1.5),
            standard_gravity: Q15::from_f32(9.8),
            tilt_angle_threshold_deg: Q15::from_int(35),
            step_sensitivity: Q15::from_f32(1.96),
            step_cadence_min_samples: 10,
            step_cadence_max_samples: 100,
            compass_cal_samples: 900,
            precise_rotation_vector: false,
        }
    }
}

impl FusionSettings {
    /// Settings for a given sample rate with every sample count derived from it
    ///
    /// Step intervals are accepted between 0.2 s and 2 s and a compass
    /// calibration run lasts 30 s.
    ///
    /// # Example
    /// ```
    /// use q15_fusion::FusionSettings;
    ///
    /// let settings = FusionSettings::with_sample_rate(100);
    /// assert_eq!(settings.step_cadence_min_samples, 20);
    /// assert_eq!(settings.step_cadence_max_samples, 200);
    /// assert_eq!(settings.compass_cal_samples, 3000);
    /// ```
    pub fn with_sample_rate(sample_rate_hz: u16) -> Self {
        let rate = u32::from(sample_rate_hz);
        Self {
            sample_rate_hz: Q15::from_int(i32::from(sample_rate_hz)),
            step_cadence_min_samples: rate / 5,
            step_cadence_max_samples: rate * 2,
            compass_cal_samples: rate * 30,
            ..Default::default()
        }
    }

    /// Seconds between samples, `1 / sample_rate_hz`.
    pub fn sampling_period(&self) -> Result<Q15> {
        self.sample_rate_hz.checked_recip()
    }
}
