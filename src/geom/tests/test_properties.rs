//! Algebraic properties checked over seeded random point sets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{
    Axis, Dimension, PointLayout, PointSet, Tolerance, TransformMatrix, apply, reflect_points,
    rotate_points, scale_points, shear_points,
};

const CASES: usize = 32;

fn random_set(rng: &mut StdRng, dim: Dimension) -> PointSet {
    let n = rng.random_range(1..20);
    let coords = (0..n * dim.get())
        .map(|_| rng.random_range(-100.0..100.0))
        .collect();
    PointSet::from_flat(dim, coords).unwrap()
}

#[test]
fn rotation_by_angle_then_negative_angle_is_identity() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..CASES {
        let points = random_set(&mut rng, Dimension::Two);
        let angle = rng.random_range(-720.0..720.0);
        let there = rotate_points(&points, angle, Axis::Z).unwrap();
        let back = rotate_points(&there, -angle, Axis::Z).unwrap();
        assert!(back.approx_eq(&points, Tolerance::LOOSE));
    }
}

#[test]
fn rotation_3d_inverse_for_every_axis() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..CASES {
        let points = random_set(&mut rng, Dimension::Three);
        let angle = rng.random_range(-180.0..180.0);
        for axis in Axis::ALL {
            let there = rotate_points(&points, angle, axis).unwrap();
            let back = rotate_points(&there, -angle, axis).unwrap();
            assert!(back.approx_eq(&points, Tolerance::LOOSE));
        }
    }
}

#[test]
fn unit_scale_is_exact_identity() {
    let mut rng = StdRng::seed_from_u64(1);
    for dim in [Dimension::Two, Dimension::Three] {
        for _ in 0..CASES {
            let points = random_set(&mut rng, dim);
            let ones = vec![1.0; dim.get()];
            assert_eq!(scale_points(&points, &ones).unwrap(), points);
        }
    }
}

#[test]
fn reflection_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(2);
    for dim in [Dimension::Two, Dimension::Three] {
        for _ in 0..CASES {
            let points = random_set(&mut rng, dim);
            let flags: Vec<bool> = (0..dim.get()).map(|_| rng.random_bool(0.5)).collect();
            let once = reflect_points(&points, &flags).unwrap();
            let twice = reflect_points(&once, &flags).unwrap();
            assert_eq!(twice, points);
        }
    }
}

#[test]
fn identity_matrix_leaves_points_unchanged() {
    let mut rng = StdRng::seed_from_u64(3);
    for dim in [Dimension::Two, Dimension::Three] {
        let identity = TransformMatrix::identity(dim);
        for _ in 0..CASES {
            let points = random_set(&mut rng, dim);
            for layout in [PointLayout::RowVectors, PointLayout::ColumnVectors] {
                assert_eq!(apply(&points, &identity, layout).unwrap(), points);
            }
        }
    }
}

#[test]
fn zero_shear_is_identity() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..CASES {
        let points = random_set(&mut rng, Dimension::Three);
        assert_eq!(shear_points(&points, 0.0, 2, 1).unwrap(), points);
        assert_eq!(shear_points(&points, 0.0, 0, 2).unwrap(), points);
    }
}

#[test]
fn rotation_preserves_distance_to_origin() {
    let mut rng = StdRng::seed_from_u64(5);
    let tol = Tolerance::LOOSE;
    for _ in 0..CASES {
        let points = random_set(&mut rng, Dimension::Three);
        let rotated = rotate_points(&points, rng.random_range(0.0..360.0), Axis::Y).unwrap();
        for (a, b) in points.iter().zip(rotated.iter()) {
            let la: f64 = a.iter().map(|v| v * v).sum();
            let lb: f64 = b.iter().map(|v| v * v).sum();
            assert!(tol.approx_eq_f64(la.sqrt(), lb.sqrt()));
        }
    }
}
