//! Rotation vector: orientation quaternion from gravity and the magnetic field
//!
//! Builds the east (`H = E × A`), north (`M = A × H`) and up (`A`) axes as
//! the rows of a rotation matrix and converts that matrix to a quaternion.
//! Two precisions share the same solver: Q15 for sensor units directly, and
//! Q24 for normalised inputs where the extra fraction bits matter.

use log::trace;
use nalgebra::Vector3;

use crate::error::Result;
use crate::fixed::{Fixed, Q15};
use crate::math::Vector3Ext;
use crate::types::{Quat, ThreeAxis};

/// Shortest east vector accepted, in field units times acceleration units.
const MIN_EAST_NORM: f64 = 0.1;

/// Largest gravity magnitude the precise variant is configured for.
///
/// Inputs are meant to be in g and gauss; at this size the cross products
/// stay well inside the ±128 range of Q24.
pub const PRECISE_GRAVITY_LIMIT: Q15 = Q15::from_int(4);

/// Orientation quaternion in Q15.
///
/// Returns `None` when the accelerometer reads zero or when the field is
/// (nearly) parallel to gravity, since no heading can be derived.
///
/// # Example
/// ```
/// use q15_fusion::{ThreeAxis, Vector3Ext};
/// use q15_fusion::rotation::rotation_vector;
///
/// let field = ThreeAxis::from_real(0.0, 22.0, -42.0);
/// let gravity = ThreeAxis::from_real(0.0, 0.0, 9.81);
///
/// let quat = rotation_vector(field, gravity)?.unwrap();
/// assert!(quat.w.to_f32() > 0.999);
/// # Ok::<(), q15_fusion::Error>(())
/// ```
pub fn rotation_vector(mag: ThreeAxis, accel: ThreeAxis) -> Result<Option<Quat>> {
    Ok(solve(&mag, &accel)?.map(|[x, y, z, w]| Quat { x, y, z, w }))
}

/// Orientation quaternion computed in Q24 and narrowed to Q15.
///
/// Q24 covers ±128, so the inputs should be in g and gauss (or otherwise
/// normalised). Larger inputs fail with [`crate::Error::ArithmeticOverflow`].
pub fn rotation_vector_precise(mag: ThreeAxis, accel: ThreeAxis) -> Result<Option<Quat>> {
    let mag = widen(&mag)?;
    let accel = widen(&accel)?;
    Ok(solve(&mag, &accel)?.map(|[x, y, z, w]| Quat {
        x: x.rescale(),
        y: y.rescale(),
        z: z.rescale(),
        w: w.rescale(),
    }))
}

fn widen(vector: &ThreeAxis) -> Result<Vector3<Fixed<24>>> {
    Ok(Vector3::new(
        vector.x.checked_rescale()?,
        vector.y.checked_rescale()?,
        vector.z.checked_rescale()?,
    ))
}

/// Quaternion components `[x, y, z, w]` in the working format.
fn solve<const SHIFT: u32>(
    mag: &Vector3<Fixed<SHIFT>>,
    accel: &Vector3<Fixed<SHIFT>>,
) -> Result<Option<[Fixed<SHIFT>; 4]>> {
    if accel.is_origin() {
        trace!("rotation vector skipped, zero acceleration");
        return Ok(None);
    }

    let east = checked_cross(mag, accel)?;
    let east_norm = east.length()?;
    if east_norm < Fixed::from_f64(MIN_EAST_NORM) {
        trace!("rotation vector skipped, field parallel to gravity");
        return Ok(None);
    }
    let accel_norm = accel.length()?;
    if accel_norm == Fixed::ZERO {
        return Ok(None);
    }
    let inverse_accel_norm = accel_norm.checked_recip()?;

    let h = Vector3::new(
        east.x.checked_div(east_norm)?,
        east.y.checked_div(east_norm)?,
        east.z.checked_div(east_norm)?,
    );
    let a = Vector3::new(
        accel.x.checked_mul(inverse_accel_norm)?,
        accel.y.checked_mul(inverse_accel_norm)?,
        accel.z.checked_mul(inverse_accel_norm)?,
    );
    let m = checked_cross(&a, &h)?;

    let one = Fixed::ONE;
    let w = half_root(h.x + m.y + a.z + one)?;
    let x = half_root(h.x - m.y - a.z + one)?;
    let y = half_root(-h.x + m.y - a.z + one)?;
    let z = half_root(-h.x - m.y + a.z + one)?;

    Ok(Some([
        x.copysign(a.y - m.z),
        y.copysign(h.z - a.x),
        z.copysign(m.x - h.y),
        w,
    ]))
}

/// `sqrt(max(v, 0) / 4)`, one quaternion component from a matrix trace term.
fn half_root<const SHIFT: u32>(value: Fixed<SHIFT>) -> Result<Fixed<SHIFT>> {
    value.max(Fixed::ZERO).checked_mul(Fixed::QUARTER)?.sqrt()
}

fn checked_cross<const SHIFT: u32>(
    a: &Vector3<Fixed<SHIFT>>,
    b: &Vector3<Fixed<SHIFT>>,
) -> Result<Vector3<Fixed<SHIFT>>> {
    let term = |p: Fixed<SHIFT>, q: Fixed<SHIFT>, r: Fixed<SHIFT>, s: Fixed<SHIFT>| {
        p.checked_mul(q)?.checked_sub(r.checked_mul(s)?)
    };
    Ok(Vector3::new(
        term(a.y, b.z, a.z, b.y)?,
        term(a.z, b.x, a.x, b.z)?,
        term(a.x, b.y, a.y, b.x)?,
    ))
}
