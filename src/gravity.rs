//! Gravity estimation and linear acceleration
//!
//! Gravity is the low-frequency part of the accelerometer signal. Each axis
//! runs through its own cascaded biquad; the Z filter starts at standard
//! gravity so a device lying flat reports the right vector from the first
//! sample.

use crate::error::Result;
use crate::fixed::Q15;
use crate::lpf::{Biquad, CascadedBiquad};
use crate::types::{FusionSettings, ThreeAxis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityFilter {
    x: CascadedBiquad,
    y: CascadedBiquad,
    z: CascadedBiquad,
    standard_gravity: Q15,
}

impl GravityFilter {
    /// Configure the three cascades from the filter settings.
    ///
    /// # Example
    /// ```
    /// use q15_fusion::{FusionSettings, GravityFilter, ThreeAxis, Vector3Ext};
    ///
    /// let mut filter = GravityFilter::new(&FusionSettings::default())?;
    /// let gravity = filter.process(ThreeAxis::from_real(0.0, 0.0, 9.8));
    /// assert_eq!(gravity, ThreeAxis::from_real(0.0, 0.0, 9.8));
    /// # Ok::<(), q15_fusion::Error>(())
    /// ```
    pub fn new(settings: &FusionSettings) -> Result<Self> {
        let mut section =
            Biquad::new(settings.gravity_filter_q, settings.gravity_filter_cutoff_hz)?;
        section.set_sampling_period(settings.sampling_period()?)?;

        Ok(Self {
            x: CascadedBiquad::new(&section, Q15::ZERO),
            y: CascadedBiquad::new(&section, Q15::ZERO),
            z: CascadedBiquad::new(&section, settings.standard_gravity),
            standard_gravity: settings.standard_gravity,
        })
    }

    /// Filter one accelerometer sample and return the gravity estimate.
    pub fn process(&mut self, accel: ThreeAxis) -> ThreeAxis {
        ThreeAxis::new(
            self.x.step(accel.x),
            self.y.step(accel.y),
            self.z.step(accel.z),
        )
    }

    /// Return to the flat-device starting state.
    pub fn reset(&mut self) {
        self.x.seed(Q15::ZERO);
        self.y.seed(Q15::ZERO);
        self.z.seed(self.standard_gravity);
    }
}

/// Acceleration with gravity removed.
pub fn linear_acceleration(accel: ThreeAxis, gravity: ThreeAxis) -> ThreeAxis {
    accel - gravity
}
