//! Table-driven trigonometry on Q15 radians
//!
//! Every function resolves to a lookup in the quarter-wave table: the angle
//! (or sine) is mapped into `[0, π/2]`, the first table entry not below it is
//! taken, and the sign is restored. Accuracy is bounded by the table step,
//! `π/1024 ≈ 0.0031`.

use crate::error::Result;
use crate::fixed::Q15;
use crate::trig_table::SINE_TABLE;

impl Q15 {
    /// Sine of an angle in radians.
    ///
    /// Any angle is accepted; it is reduced modulo π with a sign flip for odd
    /// half-turns, then folded onto the first quadrant.
    ///
    /// # Example
    /// ```
    /// use q15_fusion::Q15;
    ///
    /// assert_eq!(Q15::FRAC_PI_2.sin(), Q15::ONE);
    /// assert_eq!((-Q15::FRAC_PI_2).sin(), -Q15::ONE);
    /// ```
    pub fn sin(self) -> Q15 {
        let pi = Q15::PI.raw();
        let half_pi = Q15::FRAC_PI_2.raw();

        let half_turns = self.raw().div_euclid(pi);
        let mut reduced = self.raw().rem_euclid(pi);
        if reduced > half_pi {
            reduced = pi - reduced;
        }

        let index = SINE_TABLE.partition_point(|&(angle, _)| angle < reduced);
        let Some(&(_, sine)) = SINE_TABLE.get(index) else {
            return Q15::ZERO;
        };

        if half_turns & 1 == 0 {
            Q15::from_raw(sine)
        } else {
            Q15::from_raw(-sine)
        }
    }

    /// `cos θ = sin(θ + π/2)`.
    pub fn cos(self) -> Q15 {
        Q15::from_raw(self.raw().saturating_add(Q15::FRAC_PI_2.raw())).sin()
    }

    /// `sin θ / cos θ`, undefined where the cosine lookup is zero.
    pub fn tan(self) -> Result<Q15> {
        self.sin().checked_div(self.cos())
    }

    /// Inverse sine in `[-π/2, π/2]`; inputs beyond ±1 clamp to ±π/2.
    pub fn arcsin(self) -> Q15 {
        let magnitude = self.raw().saturating_abs();
        let last = SINE_TABLE.len() - 1;
        let index = SINE_TABLE
            .partition_point(|&(_, sine)| sine < magnitude)
            .min(last);
        let angle = Q15::from_raw(SINE_TABLE[index].0);

        if self.raw() < 0 { -angle } else { angle }
    }

    /// Inverse cosine in `[0, π]`.
    pub fn arccos(self) -> Q15 {
        Q15::FRAC_PI_2 - self.arcsin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::trig_table::SINE_INTERVALS;
    use core::f64::consts::PI;

    const TABLE_STEP: f64 = PI / 2.0 / SINE_INTERVALS as f64;
    const EPSILON: f64 = TABLE_STEP + 2.0 / 32768.0;

    fn q(value: f64) -> Q15 {
        Q15::from_f64(value)
    }

    #[test]
    fn test_sine_table_is_sorted() {
        assert!(SINE_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(SINE_TABLE.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(SINE_TABLE[0], (0, 0));
        assert_eq!(SINE_TABLE[SINE_INTERVALS], (Q15::FRAC_PI_2.raw(), Q15::ONE.raw()));
    }

    #[test]
    fn test_sin_exact_points() {
        assert_eq!(Q15::ZERO.sin(), Q15::ZERO);
        assert_eq!(Q15::FRAC_PI_2.sin(), Q15::ONE);
        assert_eq!(Q15::PI.sin(), Q15::ZERO);
        assert_eq!((-Q15::FRAC_PI_2).sin(), -Q15::ONE);
        assert_eq!((Q15::PI + Q15::FRAC_PI_2).sin(), -Q15::ONE);
        assert_eq!(Q15::ZERO.cos(), Q15::ONE);
        assert_eq!(Q15::PI.cos(), -Q15::ONE);
    }

    #[test]
    fn test_sin_cos_follow_reference() {
        let mut angle = -4.0 * PI;
        while angle < 4.0 * PI {
            let fixed = q(angle);
            let sin_error = (fixed.sin().to_f64() - angle.sin()).abs();
            let cos_error = (fixed.cos().to_f64() - angle.cos()).abs();
            assert!(sin_error < EPSILON, "sin({}) off by {}", angle, sin_error);
            assert!(cos_error < EPSILON, "cos({}) off by {}", angle, cos_error);
            angle += 0.0137;
        }
    }

    #[test]
    fn test_pythagorean_identity() {
        let mut angle = -2.0 * PI;
        while angle < 2.0 * PI {
            let s = q(angle).sin();
            let c = q(angle).cos();
            let sum = (s * s + c * c).to_f64();
            assert!((sum - 1.0).abs() < 0.01, "sin²+cos² at {} = {}", angle, sum);
            angle += 0.05;
        }
    }

    #[test]
    fn test_sin_range() {
        let mut raw = -500_000;
        while raw < 500_000 {
            let s = Q15::from_raw(raw).sin();
            assert!(s >= -Q15::ONE && s <= Q15::ONE);
            raw += 977;
        }
    }

    #[test]
    fn test_tan() {
        let one = q(PI / 4.0).tan().unwrap();
        assert!((one.to_f64() - 1.0).abs() < 0.01, "tan(π/4) = {}", one);

        let small = q(0.0953).tan().unwrap();
        assert!((small.to_f64() - 0.0956).abs() < 0.005);

        assert_eq!(Q15::FRAC_PI_2.tan(), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_arcsin() {
        assert_eq!(Q15::ZERO.arcsin(), Q15::ZERO);
        assert_eq!(Q15::TWO.arcsin(), Q15::FRAC_PI_2);
        assert_eq!((-Q15::TWO).arcsin(), -Q15::FRAC_PI_2);

        for &v in &[-1.0, -0.75, -0.5, -0.1, 0.1, 0.5, 0.866, 1.0] {
            let error = (q(v).arcsin().to_f64() - f64::asin(v)).abs();
            assert!(error < EPSILON, "arcsin({}) off by {}", v, error);
        }
    }

    #[test]
    fn test_arccos() {
        assert_eq!(Q15::ZERO.arccos(), Q15::FRAC_PI_2);
        for &v in &[-1.0, -0.5, 0.0, 0.5, 0.8192, 1.0] {
            let angle = q(v).arccos();
            assert!(angle >= Q15::ZERO && angle <= Q15::PI + Q15::DELTA);
            let error = (angle.to_f64() - f64::acos(v)).abs();
            assert!(error < EPSILON, "arccos({}) off by {}", v, error);
        }
    }
}
