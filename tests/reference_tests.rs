//! Fixed-point results checked against `f64` math and nalgebra rotations
//!
//! Inputs come from seeded PCG sweeps so failures are reproducible.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Quaternion, Rotation3, UnitQuaternion, Vector3};
use q15_fusion::rotation::{rotation_vector, rotation_vector_precise};
use q15_fusion::{Q15, ThreeAxis, Vector3Ext, Wide};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const SAMPLES: usize = 5000;
/// Quarter-wave table step, π/1024, plus rounding
const TABLE_TOLERANCE: f64 = 0.0035;
/// Rational atan2 worst case is about 4.08°
const ATAN2_TOLERANCE_DEG: f64 = 4.2;

fn rng(seed: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed)
}

#[test]
fn test_sin_cos_against_f64() {
    let mut rng = rng(1);
    for _ in 0..SAMPLES {
        let angle = Q15::from_f64(rng.random_range(-4.0 * PI..4.0 * PI));
        let exact = angle.to_f64();

        let sin_error = (angle.sin().to_f64() - exact.sin()).abs();
        let cos_error = (angle.cos().to_f64() - exact.cos()).abs();
        assert!(sin_error < TABLE_TOLERANCE, "sin({}) off by {}", exact, sin_error);
        assert!(cos_error < TABLE_TOLERANCE, "cos({}) off by {}", exact, cos_error);

        let identity = angle.sin() * angle.sin() + angle.cos() * angle.cos();
        assert!((identity.to_f64() - 1.0).abs() < 0.01, "sin² + cos² = {}", identity);
    }
}

#[test]
fn test_arcsin_arccos_against_f64() {
    let mut rng = rng(2);
    for _ in 0..SAMPLES {
        let value = Q15::from_f64(rng.random_range(-1.0..1.0));
        let exact = value.to_f64();

        let asin_error = (value.arcsin().to_f64() - exact.asin()).abs();
        let acos_error = (value.arccos().to_f64() - exact.acos()).abs();
        assert!(asin_error < TABLE_TOLERANCE, "asin({}) off by {}", exact, asin_error);
        assert!(acos_error < TABLE_TOLERANCE, "acos({}) off by {}", exact, acos_error);
    }
}

#[test]
fn test_atan2_against_f64() {
    let mut rng = rng(3);
    for _ in 0..SAMPLES {
        let y = Q15::from_f64(rng.random_range(-50.0..50.0));
        let x = Q15::from_f64(rng.random_range(-50.0..50.0));

        let angle = y.atan2(x).to_f64();
        assert!((-PI..=PI).contains(&angle), "atan2 {} out of range", angle);

        let exact = y.to_f64().atan2(x.to_f64());
        let difference = (angle - exact).rem_euclid(2.0 * PI);
        let error = difference.min(2.0 * PI - difference).to_degrees();
        assert!(
            error < ATAN2_TOLERANCE_DEG,
            "atan2({}, {}) off by {} degrees",
            y,
            x,
            error
        );
    }
}

#[test]
fn test_sqrt_against_f64() {
    let mut rng = rng(4);
    for _ in 0..SAMPLES {
        let exponent: f64 = rng.random_range(-2.0..4.4);
        let value = Q15::from_f64(10f64.powf(exponent));
        let exact = value.to_f64().sqrt();

        let root = value.sqrt().unwrap().to_f64();
        let tolerance = if value.to_f64() >= 1.0 { 1e-4 } else { 5e-4 };
        assert!(
            (root - exact).abs() < tolerance,
            "sqrt({}) = {}, expected {}",
            value,
            root,
            exact
        );
    }
}

#[test]
fn test_wide_sqrt_against_f64() {
    let mut rng = rng(5);
    for _ in 0..SAMPLES {
        let value: f64 = rng.random_range(1.0..1.0e9);
        let root = Wide::<15>::from_f64(value).sqrt().unwrap().to_f64();
        let relative = (root - value.sqrt()).abs() / value.sqrt();
        assert!(relative < 1e-4, "sqrt({}) = {}", value, root);
    }
}

/// Orientation from the same east/north/up construction in floating point.
fn reference_orientation(mag: &Vector3<f64>, accel: &Vector3<f64>) -> UnitQuaternion<f64> {
    let h = mag.cross(accel).normalize();
    let a = accel.normalize();
    let m = a.cross(&h);
    let matrix = Matrix3::new(h.x, h.y, h.z, m.x, m.y, m.z, a.x, a.y, a.z);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(matrix))
}

fn random_direction(rng: &mut Pcg64) -> Vector3<f64> {
    loop {
        let candidate = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let norm = candidate.norm();
        if (0.1..=1.0).contains(&norm) {
            return candidate / norm;
        }
    }
}

#[test]
fn test_rotation_vector_against_nalgebra() {
    let mut rng = rng(6);
    let mut compared = 0;
    while compared < 1000 {
        let gravity = random_direction(&mut rng) * rng.random_range(9.0..10.5);
        let field = Vector3::new(
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
        );
        let accel = ThreeAxis::from_real(gravity.x as f32, gravity.y as f32, gravity.z as f32);
        let mag = ThreeAxis::from_real(field.x as f32, field.y as f32, field.z as f32);
        let accel_f64 = accel.to_real().cast::<f64>();
        let mag_f64 = mag.to_real().cast::<f64>();

        // Keep clear of weak fields and fields parallel to gravity
        if mag_f64.norm() < 10.0
            || mag_f64.cross(&accel_f64).norm() < 0.25 * mag_f64.norm() * accel_f64.norm()
        {
            continue;
        }
        let reference = reference_orientation(&mag_f64, &accel_f64);
        // Near half turns the component signs are not well conditioned
        if reference.w.abs() < 0.15 {
            continue;
        }

        let quat = rotation_vector(mag, accel).unwrap().expect("orientation is defined");
        let actual = UnitQuaternion::from_quaternion(Quaternion::new(
            quat.w.to_f64(),
            quat.x.to_f64(),
            quat.y.to_f64(),
            quat.z.to_f64(),
        ));

        let error = reference.angle_to(&actual).to_degrees();
        assert!(
            error < 2.0,
            "field {:?} gravity {:?}: off by {} degrees",
            mag_f64,
            accel_f64,
            error
        );
        compared += 1;
    }
}

#[test]
fn test_precise_rotation_vector_against_nalgebra() {
    let mut rng = rng(7);
    let mut compared = 0;
    while compared < 1000 {
        // g and gauss, the units the Q24 path is meant for
        let gravity = random_direction(&mut rng) * rng.random_range(0.9..1.1);
        let field = Vector3::new(
            rng.random_range(-0.6..0.6),
            rng.random_range(-0.6..0.6),
            rng.random_range(-0.6..0.6),
        );
        let accel = ThreeAxis::from_real(gravity.x as f32, gravity.y as f32, gravity.z as f32);
        let mag = ThreeAxis::from_real(field.x as f32, field.y as f32, field.z as f32);
        let accel_f64 = accel.to_real().cast::<f64>();
        let mag_f64 = mag.to_real().cast::<f64>();

        let east = mag_f64.cross(&accel_f64).norm();
        if mag_f64.norm() < 0.2 || east < 0.15 || east < 0.25 * mag_f64.norm() * accel_f64.norm() {
            continue;
        }
        let reference = reference_orientation(&mag_f64, &accel_f64);
        if reference.w.abs() < 0.15 {
            continue;
        }

        let quat = rotation_vector_precise(mag, accel)
            .unwrap()
            .expect("orientation is defined");
        let norm = quat.norm_squared().to_f64();
        assert!((norm - 1.0).abs() < 0.002, "norm² {} for {:?}", norm, quat);

        let actual = UnitQuaternion::from_quaternion(Quaternion::new(
            quat.w.to_f64(),
            quat.x.to_f64(),
            quat.y.to_f64(),
            quat.z.to_f64(),
        ));
        let error = reference.angle_to(&actual).to_degrees();
        assert!(
            error < 2.0,
            "field {:?} gravity {:?}: off by {} degrees",
            mag_f64,
            accel_f64,
            error
        );
        compared += 1;
    }
}
