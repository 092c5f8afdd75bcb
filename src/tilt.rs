//! One-shot tilt detector
//!
//! Compares the mean acceleration over a sliding window against the mean
//! taken shortly after start-up. When the angle between the two exceeds the
//! threshold, tilt is reported once and the detector latches until reset.

use heapless::HistoryBuffer;
use log::info;

use crate::error::Result;
use crate::fixed::Q15;
use crate::math::Vector3Ext;
use crate::types::{FusionSettings, ThreeAxis};

const HISTORY_LEN: usize = 50;
/// Samples averaged for each comparison.
const WINDOW_LEN: usize = HISTORY_LEN - 1;
/// Sample at which the reference mean is taken.
const REFERENCE_SAMPLE: u32 = 25;
/// Beyond this many samples the detector stops evaluating.
const MAX_SAMPLES: u32 = 10_000;

/// Sliding-window tilt detector
///
/// # Example
/// ```
/// use q15_fusion::{FusionSettings, ThreeAxis, TiltDetector, Vector3Ext};
///
/// let mut detector = TiltDetector::new(&FusionSettings::default());
/// let flat = ThreeAxis::from_real(0.0, 0.0, 9.8);
/// let upright = ThreeAxis::from_real(0.0, 9.8, 0.0);
///
/// let mut events = 0;
/// for n in 0..200 {
///     let sample = if n < 49 { flat } else { upright };
///     if detector.process(sample)? {
///         events += 1;
///     }
/// }
/// assert_eq!(events, 1);
/// # Ok::<(), q15_fusion::Error>(())
/// ```
#[derive(Clone)]
pub struct TiltDetector {
    history: HistoryBuffer<ThreeAxis, HISTORY_LEN>,
    samples: u32,
    reference_mean: ThreeAxis,
    threshold: Q15,
    latched: bool,
}

impl TiltDetector {
    pub fn new(settings: &FusionSettings) -> Self {
        Self {
            history: HistoryBuffer::new(),
            samples: 0,
            reference_mean: ThreeAxis::repeat(Q15::ZERO),
            threshold: settings.tilt_angle_threshold_deg.to_radians(),
            latched: false,
        }
    }

    /// Feed one accelerometer sample. Returns true on the single sample at
    /// which tilt is declared.
    pub fn process(&mut self, accel: ThreeAxis) -> Result<bool> {
        if self.latched || self.samples > MAX_SAMPLES {
            return Ok(false);
        }
        self.samples += 1;

        if self.samples < HISTORY_LEN as u32 {
            self.history.write(accel);
            if self.samples == REFERENCE_SAMPLE {
                self.reference_mean = self.window_mean();
            }
            return Ok(false);
        }

        let current_mean = self.window_mean();
        self.history.write(accel);

        let norms = current_mean.length()? * self.reference_mean.length()?;
        if norms == Q15::ZERO {
            return Ok(false);
        }
        let cosine = current_mean.dot_product(&self.reference_mean) / norms;
        let angle = cosine.arccos();

        if angle.abs() > self.threshold {
            info!("tilt detected, {} degrees from reference", angle.to_degrees());
            self.latched = true;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Clear history and latch; the next sample starts a fresh reference.
    pub fn reset(&mut self) {
        self.history.clear();
        self.samples = 0;
        self.reference_mean = ThreeAxis::repeat(Q15::ZERO);
        self.latched = false;
    }

    /// Mean of the most recent stored samples, up to the window length.
    fn window_mean(&self) -> ThreeAxis {
        let skip = self.history.len().saturating_sub(WINDOW_LEN);
        let mut sum = [0i64; 3];
        let mut count = 0i64;
        for sample in self.history.oldest_ordered().skip(skip) {
            for (total, component) in sum.iter_mut().zip(sample.iter()) {
                *total += component.raw() as i64;
            }
            count += 1;
        }
        if count == 0 {
            return ThreeAxis::repeat(Q15::ZERO);
        }
        ThreeAxis::new(
            Q15::saturate(sum[0] / count),
            Q15::saturate(sum[1] / count),
            Q15::saturate(sum[2] / count),
        )
    }
}

impl core::fmt::Debug for TiltDetector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TiltDetector")
            .field("samples", &self.samples)
            .field("reference_mean", &self.reference_mean)
            .field("threshold", &self.threshold)
            .field("latched", &self.latched)
            .finish()
    }
}
