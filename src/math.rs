//! Square root, atan2 and nalgebra extensions for fixed-point values

use core::f64::consts::PI;

use nalgebra::Vector3;

use crate::error::Result;
use crate::fixed::{Fixed, Q15};
use crate::wide::Wide;

impl<const SHIFT: u32> Fixed<SHIFT> {
    pub const RAD_TO_DEG: Self = Self::from_f64(180.0 / PI);
    pub const DEG_TO_RAD: Self = Self::from_f64(PI / 180.0);

    pub fn to_degrees(self) -> Self {
        self * Self::RAD_TO_DEG
    }

    pub fn to_radians(self) -> Self {
        self * Self::DEG_TO_RAD
    }

    /// Square root through the widened Newton-Raphson iteration.
    ///
    /// # Example
    /// ```
    /// use q15_fusion::Q15;
    ///
    /// assert_eq!(Q15::from_int(4).sqrt(), Ok(Q15::TWO));
    /// ```
    pub fn sqrt(self) -> Result<Self> {
        Wide::from(self).sqrt()?.narrow()
    }
}

impl Q15 {
    /// Four-quadrant arctangent of `self / x`, in radians.
    ///
    /// Axis-aligned inputs are exact. Elsewhere a rational approximation is
    /// used whose worst-case error is about 4.1°. `atan2(0, 0)` is π.
    pub fn atan2(self, x: Q15) -> Q15 {
        let y = self;
        if y == Q15::ZERO {
            return if x > Q15::ZERO { Q15::ZERO } else { Q15::PI };
        }
        if x == Q15::ZERO {
            return if y < Q15::ZERO { -Q15::FRAC_PI_2 } else { Q15::FRAC_PI_2 };
        }

        let abs_y = y.abs();
        let angle = if x > Q15::ZERO {
            Q15::FRAC_PI_4 - Q15::FRAC_PI_4 * ((x - abs_y) / (x + abs_y))
        } else {
            Q15::FRAC_3PI_4 - Q15::FRAC_PI_4 * ((x + abs_y) / (abs_y - x))
        };

        if y < Q15::ZERO { -angle } else { angle }
    }
}

/// Extension trait for fixed-point `Vector3` operations
///
/// Names avoid nalgebra's own `dot`, `cross` and `norm`, which need
/// numeric traits a fixed-point scalar does not implement.
pub trait Vector3Ext<const SHIFT: u32>: Sized {
    /// Build a vector from real-valued components.
    fn from_real(x: f32, y: f32, z: f32) -> Self;

    /// Real-valued copy, for display and comparison.
    fn to_real(&self) -> Vector3<f32>;

    fn dot_product(&self, other: &Self) -> Fixed<SHIFT>;

    fn cross_product(&self, other: &Self) -> Self;

    /// `x² + y² + z²` in the widened format.
    fn sum_of_squares(&self) -> Result<Wide<SHIFT>>;

    /// Euclidean length, computed without leaving the widened format.
    fn length(&self) -> Result<Fixed<SHIFT>>;

    /// Multiply every component by `factor`.
    fn scale(&self, factor: Fixed<SHIFT>) -> Self;

    fn is_origin(&self) -> bool;
}

impl<const SHIFT: u32> Vector3Ext<SHIFT> for Vector3<Fixed<SHIFT>> {
    fn from_real(x: f32, y: f32, z: f32) -> Self {
        Vector3::new(Fixed::from_f32(x), Fixed::from_f32(y), Fixed::from_f32(z))
    }

    fn to_real(&self) -> Vector3<f32> {
        self.map(Fixed::to_f32)
    }

    fn dot_product(&self, other: &Self) -> Fixed<SHIFT> {
        let sum = product(self.x, other.x) + product(self.y, other.y) + product(self.z, other.z);
        Fixed::saturate(sum)
    }

    fn cross_product(&self, other: &Self) -> Self {
        Vector3::new(
            Fixed::saturate(product(self.y, other.z) - product(self.z, other.y)),
            Fixed::saturate(product(self.z, other.x) - product(self.x, other.z)),
            Fixed::saturate(product(self.x, other.y) - product(self.y, other.x)),
        )
    }

    fn sum_of_squares(&self) -> Result<Wide<SHIFT>> {
        let x = Wide::from(self.x);
        let y = Wide::from(self.y);
        let z = Wide::from(self.z);
        x.checked_mul(x)?
            .checked_add(y.checked_mul(y)?)?
            .checked_add(z.checked_mul(z)?)
    }

    fn length(&self) -> Result<Fixed<SHIFT>> {
        self.sum_of_squares()?.sqrt()?.narrow()
    }

    fn scale(&self, factor: Fixed<SHIFT>) -> Self {
        self.map(|component| component * factor)
    }

    fn is_origin(&self) -> bool {
        self.iter().all(|&component| component == Fixed::ZERO)
    }
}

/// Single fixed-point product, kept in 64 bits so sums of a few products
/// cannot wrap before the final saturation.
fn product<const SHIFT: u32>(a: Fixed<SHIFT>, b: Fixed<SHIFT>) -> i64 {
    (a.raw() as i64 * b.raw() as i64) >> SHIFT
}
