//! Step counter
//!
//! Accelerometer samples are averaged in groups of five. The magnitude of
//! each group mean drives a hysteresis envelope, and a step crossing is a
//! fall of the envelope through the midpoint of all magnitudes seen so far.
//! Crossings only count once they arrive at a walking cadence: the fifth
//! consecutive in-cadence crossing credits five steps at once, and every
//! later one credits a single step.

use log::debug;

use crate::error::Result;
use crate::fixed::Q15;
use crate::math::Vector3Ext;
use crate::types::{FusionSettings, StepInfo, ThreeAxis};

/// Samples averaged into one magnitude.
const GROUP_LEN: u32 = 5;
/// Consecutive in-cadence crossings before steps are credited.
const STEPS_TO_START: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDetector {
    sensitivity: Q15,
    cadence_min: u32,
    cadence_max: u32,

    group_sum: [i64; 3],
    group_fill: u32,

    old_envelope: Q15,
    new_envelope: Q15,
    min_magnitude: Q15,
    max_magnitude: Q15,
    threshold: Q15,

    samples_since_crossing: Option<u32>,
    regulation: u32,
    count: u32,
}

impl StepDetector {
    /// # Example
    /// ```
    /// use q15_fusion::{FusionSettings, StepDetector, ThreeAxis, Vector3Ext};
    ///
    /// let mut detector = StepDetector::new(&FusionSettings::default());
    /// // 1.67 Hz gait at 50 Hz: 15 samples of impact, 15 of swing
    /// for n in 0..360 {
    ///     let z = if n % 30 < 15 { 13.8 } else { 5.8 };
    ///     detector.process(ThreeAxis::from_real(0.0, 0.0, z))?;
    /// }
    /// assert_eq!(detector.count(), 10);
    /// # Ok::<(), q15_fusion::Error>(())
    /// ```
    pub fn new(settings: &FusionSettings) -> Self {
        Self {
            sensitivity: settings.step_sensitivity,
            cadence_min: settings.step_cadence_min_samples,
            cadence_max: settings.step_cadence_max_samples,
            group_sum: [0; 3],
            group_fill: 0,
            old_envelope: Q15::ZERO,
            new_envelope: Q15::ZERO,
            min_magnitude: Q15::MAX,
            max_magnitude: Q15::MIN,
            threshold: Q15::ZERO,
            samples_since_crossing: None,
            regulation: 0,
            count: 0,
        }
    }

    /// Feed one accelerometer sample.
    pub fn process(&mut self, accel: ThreeAxis) -> Result<StepInfo> {
        if let Some(samples) = self.samples_since_crossing.as_mut() {
            *samples = samples.saturating_add(1);
        }

        for (sum, component) in self.group_sum.iter_mut().zip(accel.iter()) {
            *sum += component.raw() as i64;
        }
        self.group_fill += 1;
        if self.group_fill < GROUP_LEN {
            return Ok(self.info(false));
        }

        let divisor = i64::from(GROUP_LEN);
        let mean = ThreeAxis::new(
            Q15::saturate(self.group_sum[0] / divisor),
            Q15::saturate(self.group_sum[1] / divisor),
            Q15::saturate(self.group_sum[2] / divisor),
        );
        self.group_sum = [0; 3];
        self.group_fill = 0;

        let magnitude = mean.length()?;

        self.old_envelope = self.new_envelope;
        if (magnitude - self.new_envelope).abs() > self.sensitivity {
            self.new_envelope = magnitude;
        }

        let mut detect = false;
        if self.new_envelope < self.threshold
            && self.old_envelope > self.threshold
            && self.old_envelope != Q15::ZERO
        {
            detect = self.crossing();
        }

        self.min_magnitude = self.min_magnitude.min(magnitude);
        self.max_magnitude = self.max_magnitude.max(magnitude);
        self.threshold = self.min_magnitude.midpoint(self.max_magnitude);

        Ok(self.info(detect))
    }

    /// Steps credited since the last reset.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self {
            sensitivity: self.sensitivity,
            cadence_min: self.cadence_min,
            cadence_max: self.cadence_max,
            ..Self::new(&FusionSettings::default())
        };
    }

    /// Handle a downward threshold crossing. Returns true if steps were credited.
    fn crossing(&mut self) -> bool {
        let in_cadence = self
            .samples_since_crossing
            .is_some_and(|samples| (self.cadence_min..self.cadence_max).contains(&samples));
        self.samples_since_crossing = Some(0);

        if !in_cadence {
            self.regulation = 0;
            return false;
        }

        self.regulation = self.regulation.saturating_add(1);
        let credited = match self.regulation {
            STEPS_TO_START => STEPS_TO_START,
            r if r > STEPS_TO_START => 1,
            _ => 0,
        };
        if credited == 0 {
            return false;
        }

        self.count = self.count.saturating_add(credited);
        debug!("{} step(s) credited, total {}", credited, self.count);
        true
    }

    fn info(&self, detect: bool) -> StepInfo {
        StepInfo {
            count: self.count,
            detect,
        }
    }
}
