//! Signed fixed-point numbers stored in a 32-bit word
//!
//! `Fixed<SHIFT>` keeps `round(value * 2^SHIFT)` in an `i32`. Products are
//! formed in 64 bits and shifted back down; quotients widen the dividend by
//! `SHIFT` before the integer divide. The operators saturate, the `checked_*`
//! methods report [`Error`] instead.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{Error, Result};

/// Fixed-point number with `SHIFT` fractional bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Fixed<const SHIFT: u32>(i32);

/// 19.12 format.
pub type Q12 = Fixed<12>;
/// 16.15 format, the working format of every filter in this crate.
pub type Q15 = Fixed<15>;
/// 7.24 format, used by the precise rotation vector.
pub type Q24 = Fixed<24>;

impl<const SHIFT: u32> Fixed<SHIFT> {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = SHIFT;
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << SHIFT);
    pub const TWO: Self = Self(2 << SHIFT);
    pub const HALF: Self = Self(1 << (SHIFT - 1));
    pub const QUARTER: Self = Self(1 << (SHIFT - 2));
    /// Smallest representable step.
    pub const DELTA: Self = Self(1);
    pub const MAX: Self = Self(i32::MAX);
    pub const MIN: Self = Self(i32::MIN);

    pub const PI: Self = Self::from_f64(core::f64::consts::PI);
    /// Exactly half of [`Self::PI`] so that angle folding stays symmetric.
    pub const FRAC_PI_2: Self = Self(Self::PI.0 / 2);
    pub const FRAC_PI_4: Self = Self(Self::PI.0 / 4);
    pub const FRAC_3PI_4: Self = Self(Self::FRAC_PI_4.0 * 3);

    /// Wrap a raw fixed-point word.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw fixed-point word.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert a real number, rounding to the nearest step and saturating
    /// at the format limits.
    pub const fn from_f64(value: f64) -> Self {
        let scaled = value * (1u64 << SHIFT) as f64;
        let rounded = if scaled < 0.0 { scaled - 0.5 } else { scaled + 0.5 };
        Self(rounded as i32)
    }

    /// See [`Self::from_f64`].
    pub const fn from_f32(value: f32) -> Self {
        Self::from_f64(value as f64)
    }

    pub const fn from_int(value: i32) -> Self {
        Self::saturate((value as i64) << SHIFT)
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / (1u64 << SHIFT) as f32
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << SHIFT) as f64
    }

    /// Clamp a widened intermediate into the 32-bit word.
    pub(crate) const fn saturate(value: i64) -> Self {
        if value > i32::MAX as i64 {
            Self::MAX
        } else if value < i32::MIN as i64 {
            Self::MIN
        } else {
            Self(value as i32)
        }
    }

    /// Narrow a widened intermediate, failing when it does not fit.
    pub(crate) fn narrow(value: i64) -> Result<Self> {
        i32::try_from(value)
            .map(Self)
            .map_err(|_| Error::ArithmeticOverflow)
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

    /// Product widened to 64 bits, shifted back and clamped.
    pub const fn saturating_mul(self, rhs: Self) -> Self {
        Self::saturate((self.0 as i64 * rhs.0 as i64) >> SHIFT)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        Self::narrow((self.0 as i64 * rhs.0 as i64) >> SHIFT)
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.0 == 0 {
            return Err(Error::DivisionByZero);
        }
        Self::narrow(((self.0 as i64) << SHIFT) / rhs.0 as i64)
    }

    /// Quotient clamped to the format limits.
    ///
    /// A zero divisor is a caller bug: debug builds panic, release builds
    /// return the limit matching the dividend's sign.
    pub fn saturating_div(self, rhs: Self) -> Self {
        debug_assert!(rhs.0 != 0, "fixed-point division by zero");
        if rhs.0 == 0 {
            return match self.0 {
                0 => Self::ZERO,
                v if v < 0 => Self::MIN,
                _ => Self::MAX,
            };
        }
        Self::saturate(((self.0 as i64) << SHIFT) / rhs.0 as i64)
    }

    pub fn checked_recip(self) -> Result<Self> {
        Self::ONE.checked_div(self)
    }

    pub fn recip(self) -> Self {
        Self::ONE.saturating_div(self)
    }

    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Magnitude of `self` with the sign of `sign`.
    pub const fn copysign(self, sign: Self) -> Self {
        let magnitude = self.0.saturating_abs();
        if sign.0 < 0 {
            Self(-magnitude)
        } else {
            Self(magnitude)
        }
    }

    /// Average of two values without intermediate overflow.
    pub const fn midpoint(self, other: Self) -> Self {
        Self(((self.0 as i64 + other.0 as i64) >> 1) as i32)
    }

    /// Move to another Q format, saturating when the value does not fit.
    pub const fn rescale<const TO: u32>(self) -> Fixed<TO> {
        Fixed::<TO>::saturate(Self::shift_to::<TO>(self.0))
    }

    /// Move to another Q format, failing when the value does not fit.
    pub fn checked_rescale<const TO: u32>(self) -> Result<Fixed<TO>> {
        Fixed::<TO>::narrow(Self::shift_to::<TO>(self.0))
    }

    const fn shift_to<const TO: u32>(raw: i32) -> i64 {
        let widened = raw as i64;
        if TO >= SHIFT {
            widened << (TO - SHIFT)
        } else {
            widened >> (SHIFT - TO)
        }
    }
}

impl<const SHIFT: u32> fmt::Debug for Fixed<SHIFT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}({})", SHIFT, self.to_f64())
    }
}

impl<const SHIFT: u32> fmt::Display for Fixed<SHIFT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<const SHIFT: u32> Add for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl<const SHIFT: u32> AddAssign for Fixed<SHIFT> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const SHIFT: u32> Sub for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl<const SHIFT: u32> SubAssign for Fixed<SHIFT> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const SHIFT: u32> Neg for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl<const SHIFT: u32> Mul for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

impl<const SHIFT: u32> MulAssign for Fixed<SHIFT> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const SHIFT: u32> Div for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.saturating_div(rhs)
    }
}

impl<const SHIFT: u32> DivAssign for Fixed<SHIFT> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

/// Shift right by `rhs` bits, keeping the sign.
impl<const SHIFT: u32> core::ops::Shr<u32> for Fixed<SHIFT> {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self {
        Self(self.0 >> rhs)
    }
}
