//! Fixed-point numbers stored in a 64-bit word
//!
//! Used wherever a Q15 intermediate would overflow: sums of squares, vector
//! lengths and the square-root iteration. The multiply does not rely on a
//! native 128-bit product; it assembles the full product from four 32-bit
//! partial products so the same code runs on cores without one.

use core::fmt;

use crate::error::{Error, Result};
use crate::fixed::Fixed;

/// Square-root convergence tolerance on `|a² − x|`.
const SQRT_EPSILON: f64 = 0.0001;
/// Upper bound on Newton-Raphson passes.
const SQRT_MAX_ITERATIONS: u32 = 64;

const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Fixed-point number with `SHIFT` fractional bits in an `i64`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Wide<const SHIFT: u32>(i64);

/// Widened counterpart of [`crate::Q15`].
pub type WideQ15 = Wide<15>;
/// Widened counterpart of [`crate::Q24`].
pub type WideQ24 = Wide<24>;

impl<const SHIFT: u32> Wide<SHIFT> {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << SHIFT);
    pub const MAX: Self = Self(i64::MAX);

    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn from_f64(value: f64) -> Self {
        let scaled = value * (1u64 << SHIFT) as f64;
        let rounded = if scaled < 0.0 { scaled - 0.5 } else { scaled + 0.5 };
        Self(rounded as i64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << SHIFT) as f64
    }

    /// Back to the 32-bit format, failing when the value does not fit.
    pub fn narrow(self) -> Result<Fixed<SHIFT>> {
        Fixed::narrow(self.0)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(Error::ArithmeticOverflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Full-width product shifted back by `SHIFT`.
    ///
    /// Magnitudes are multiplied as four 32-bit partial products with the
    /// carries folded into a 128-bit (high, low) pair; the sign is restored
    /// afterwards, so the result truncates toward zero.
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let negative = (self.0 < 0) != (rhs.0 < 0);
        let a = self.0.unsigned_abs();
        let b = rhs.0.unsigned_abs();

        let (a_hi, a_lo) = (a >> 32, a & LOW_MASK);
        let (b_hi, b_lo) = (b >> 32, b & LOW_MASK);

        let lo_lo = a_lo * b_lo;
        let hi_lo = a_hi * b_lo;
        let lo_hi = a_lo * b_hi;
        let hi_hi = a_hi * b_hi;

        // Middle column: at most three 32-bit terms, no u64 overflow.
        let middle = (lo_lo >> 32) + (hi_lo & LOW_MASK) + (lo_hi & LOW_MASK);
        let low = (lo_lo & LOW_MASK) | (middle << 32);
        let high = hi_hi
            .checked_add((hi_lo >> 32) + (lo_hi >> 32) + (middle >> 32))
            .ok_or(Error::ArithmeticOverflow)?;

        if high >> SHIFT != 0 {
            return Err(Error::ArithmeticOverflow);
        }
        let magnitude = (low >> SHIFT) | (high << (64 - SHIFT));
        let magnitude = i64::try_from(magnitude).map_err(|_| Error::ArithmeticOverflow)?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Quotient with the dividend widened by `SHIFT`.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.0 == 0 {
            return Err(Error::DivisionByZero);
        }
        let dividend = self
            .0
            .checked_mul(1 << SHIFT)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(Self(dividend / rhs.0))
    }

    pub fn checked_recip(self) -> Result<Self> {
        Self::ONE.checked_div(self)
    }

    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Newton-Raphson square root.
    ///
    /// Starts from `a = x` and iterates `a = (a + x / a) / 2` until
    /// `|a² − x| < 0.0001`, the estimate stops moving, or 64 passes have run.
    pub fn sqrt(self) -> Result<Self> {
        if self.0 < 0 {
            return Err(Error::NegativeSqrt);
        }
        if self.0 == 0 {
            return Ok(Self::ZERO);
        }

        let epsilon = Self::from_f64(SQRT_EPSILON).0;
        let mut estimate = self;
        for _ in 0..SQRT_MAX_ITERATIONS {
            // A square that does not fit means the estimate is still far above the root.
            let converged = estimate
                .checked_mul(estimate)
                .is_ok_and(|square| (square.0 - self.0).abs() < epsilon);
            if converged {
                break;
            }
            let quotient = self.checked_div(estimate)?;
            let next = Self((estimate.0 + quotient.0) >> 1);
            if next == estimate {
                break;
            }
            estimate = next;
        }
        Ok(estimate)
    }
}

impl<const SHIFT: u32> From<Fixed<SHIFT>> for Wide<SHIFT> {
    fn from(value: Fixed<SHIFT>) -> Self {
        Self(value.raw() as i64)
    }
}

impl<const SHIFT: u32> fmt::Debug for Wide<SHIFT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideQ{}({})", SHIFT, self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Q15;

    fn wide(value: f64) -> WideQ15 {
        WideQ15::from_f64(value)
    }

    #[test]
    fn test_multiply_matches_native_product() {
        let cases: [(i64, i64); 6] = [
            (3 << 15, 5 << 15),
            (-(7 << 15), 1 << 14),
            (123_456_789, 987_654),
            (-1, -1),
            (1 << 40, 1 << 20),
            (-(0x1234_5678_9ABC), 0x7_6543),
        ];
        for (a, b) in cases {
            let expected = (a as i128 * b as i128) / (1 << 15);
            let product = WideQ15::from_raw(a).checked_mul(WideQ15::from_raw(b));
            assert_eq!(
                product,
                Ok(WideQ15::from_raw(expected as i64)),
                "{} * {} (raw)",
                a,
                b
            );
        }
    }

    #[test]
    fn test_multiply_overflow() {
        let big = WideQ15::from_raw(1 << 50);
        assert_eq!(big.checked_mul(big), Err(Error::ArithmeticOverflow));
        assert_eq!(WideQ15::MAX.checked_mul(WideQ15::MAX), Err(Error::ArithmeticOverflow));
        assert!(WideQ15::from_raw(1 << 39).checked_mul(WideQ15::from_raw(1 << 38)).is_ok());
    }

    #[test]
    fn test_divide() {
        assert_eq!(wide(9.0).checked_div(wide(3.0)), Ok(wide(3.0)));
        assert_eq!(wide(1.0).checked_div(WideQ15::ZERO), Err(Error::DivisionByZero));
        assert_eq!(
            WideQ15::from_raw(1 << 60).checked_div(wide(2.0)),
            Err(Error::ArithmeticOverflow)
        );
        assert_eq!(wide(4.0).checked_recip(), Ok(wide(0.25)));
    }

    #[test]
    fn test_sqrt_accuracy() {
        for &x in &[0.5, 1.0, 2.0, 9.8, 96.04, 1000.0, 86_000.0, 4.0e6] {
            let root = wide(x).sqrt().unwrap();
            let square = root.to_f64() * root.to_f64();
            let tolerance = SQRT_EPSILON + 3.0 * x.sqrt() / 32768.0;
            assert!(
                (square - x).abs() <= tolerance,
                "sqrt({}) = {}, squared {}",
                x,
                root.to_f64(),
                square
            );
        }
    }

    #[test]
    fn test_sqrt_small_inputs_terminate() {
        // Small inputs stop on the absolute tolerance, not on relative accuracy.
        for &x in &[0.0001, 0.001, 0.01, 0.1] {
            let root = wide(x).sqrt().unwrap();
            let square = root.to_f64() * root.to_f64();
            assert!((square - x).abs() < 0.0002, "sqrt({}) = {}", x, root.to_f64());
        }
        assert_eq!(WideQ15::from_raw(1).sqrt().map(|r| r.raw() > 0), Ok(true));
    }

    #[test]
    fn test_sqrt_edge_cases() {
        assert_eq!(WideQ15::ZERO.sqrt(), Ok(WideQ15::ZERO));
        assert_eq!(wide(-1.0).sqrt(), Err(Error::NegativeSqrt));
        assert_eq!(wide(4.0).sqrt(), Ok(wide(2.0)));
        // The first estimates square beyond 64 bits.
        assert_eq!(wide(25.0e6).sqrt(), Ok(wide(5000.0)));
    }

    #[test]
    fn test_narrow() {
        assert_eq!(wide(2.5).narrow(), Ok(Q15::from_f32(2.5)));
        assert_eq!(wide(70_000.0).narrow(), Err(Error::ArithmeticOverflow));
        assert_eq!(WideQ15::from(Q15::from_f32(-3.25)), wide(-3.25));
    }
}
