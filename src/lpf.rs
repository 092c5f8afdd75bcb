//! Second-order low-pass biquad and its two-stage cascade

use crate::error::Result;
use crate::fixed::Q15;

/// Normalised biquad coefficients
///
/// The feedforward taps are derived from the quantised feedback taps so that
/// `a0 + a1 + a0 == 1 + b1 + b2` holds exactly, which makes the DC gain one
/// with no fixed-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadCoefficients {
    pub a0: Q15,
    pub a1: Q15,
    pub b1: Q15,
    pub b2: Q15,
}

/// Butterworth-style second-order low-pass section
///
/// Created from a quality factor and cutoff, then configured for a sampling
/// period with [`Biquad::set_sampling_period`]. Until then every output is
/// zero. [`Biquad::seed`] fills the delay line with a steady-state value.
///
/// # Example
/// ```
/// use q15_fusion::{Biquad, Q15};
///
/// let mut filter = Biquad::new(Q15::from_f32(0.707107), Q15::from_f32(1.5))?;
/// filter.set_sampling_period(Q15::from_int(50).recip())?;
/// filter.seed(Q15::from_f32(9.8));
/// assert_eq!(filter.step(Q15::from_f32(9.8)), Q15::from_f32(9.8));
/// # Ok::<(), q15_fusion::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Biquad {
    inverse_q: Q15,
    cutoff_hz: Q15,
    coefficients: BiquadCoefficients,
    x1: Q15,
    x2: Q15,
    y1: Q15,
    y2: Q15,
}

impl Biquad {
    pub fn new(q: Q15, cutoff_hz: Q15) -> Result<Self> {
        Ok(Self {
            inverse_q: q.checked_recip()?,
            cutoff_hz,
            coefficients: BiquadCoefficients::default(),
            x1: Q15::ZERO,
            x2: Q15::ZERO,
            y1: Q15::ZERO,
            y2: Q15::ZERO,
        })
    }

    /// Derive the coefficients for a sampling period in seconds.
    ///
    /// Uses the bilinear transform with prewarping, `K = tan(π·fc·dT)`. Fails
    /// with [`crate::Error::DivisionByZero`] when `π·fc·dT` lands on π/2.
    pub fn set_sampling_period(&mut self, period: Q15) -> Result<()> {
        let k = (Q15::PI * self.cutoff_hz * period).tan()?;
        let k2 = k * k;
        let k_over_q = k * self.inverse_q;
        let inverse_d = (k2 + k_over_q + Q15::ONE).checked_recip()?;

        let b1 = (k2 - Q15::ONE) * (Q15::TWO * inverse_d);
        let b2 = inverse_d * (k2 - k_over_q + Q15::ONE);

        let numerator = Q15::ONE + b1 + b2;
        let a0 = numerator >> 2;
        let a1 = numerator - a0 - a0;

        self.coefficients = BiquadCoefficients { a0, a1, b1, b2 };
        Ok(())
    }

    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coefficients
    }

    /// Fill both delay lines with `value`, as if it had been the input forever.
    pub fn seed(&mut self, value: Q15) {
        self.x1 = value;
        self.x2 = value;
        self.y1 = value;
        self.y2 = value;
    }

    /// Filter one sample.
    pub fn step(&mut self, input: Q15) -> Q15 {
        let BiquadCoefficients { a0, a1, b1, b2 } = self.coefficients;
        let accumulator = wide(a0) * (wide(input) + wide(self.x2)) + wide(a1) * wide(self.x1)
            - wide(b1) * wide(self.y1)
            - wide(b2) * wide(self.y2);
        let output = Q15::saturate(accumulator >> Q15::FRAC_BITS);

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }
}

/// Two identical biquads in series, giving a fourth-order roll-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CascadedBiquad {
    first: Biquad,
    second: Biquad,
}

impl CascadedBiquad {
    /// Copy a configured section into both stages and seed them.
    pub fn new(section: &Biquad, seed: Q15) -> Self {
        let mut first = *section;
        first.seed(seed);
        Self {
            first,
            second: first,
        }
    }

    pub fn seed(&mut self, value: Q15) {
        self.first.seed(value);
        self.second.seed(value);
    }

    pub fn step(&mut self, input: Q15) -> Q15 {
        self.second.step(self.first.step(input))
    }
}

#[inline]
fn wide(value: Q15) -> i64 {
    value.raw() as i64
}
