//! The 60 rotation operators of the icosahedral group in the I1 setting.
//!
//! Values are stored as `[w, i, j, k]` quaternion components rounded to three decimals,
//! matching the operator table used during subparticle extraction.

use nalgebra::{Quaternion, UnitQuaternion};

pub const OPERATOR_COUNT: usize = 60;

#[rustfmt::skip]
const I1_QUATERNIONS: [[f64; 4]; OPERATOR_COUNT] = [
    [ 1.000,  0.000,  0.000,  0.000], [ 0.000,  1.000,  0.000,  0.000],
    [ 0.809, -0.500,  0.000,  0.309], [-0.309,  0.809,  0.000, -0.500],
    [ 0.309,  0.809,  0.000, -0.500], [ 0.809,  0.500,  0.000, -0.309],
    [-0.500,  0.809,  0.309,  0.000], [ 0.500,  0.809,  0.309,  0.000],
    [ 0.500,  0.809, -0.309,  0.000], [ 0.809,  0.309, -0.500,  0.000],
    [ 0.809,  0.309,  0.500,  0.000], [ 0.809, -0.309, -0.500,  0.000],
    [ 0.809, -0.309,  0.500,  0.000], [-0.500,  0.809, -0.309,  0.000],
    [ 0.000,  0.809,  0.500, -0.309], [ 0.500,  0.500,  0.500, -0.500],
    [ 0.809,  0.000,  0.309, -0.500], [ 0.809, -0.500,  0.000, -0.309],
    [ 0.809,  0.500,  0.000,  0.309], [-0.500,  0.500,  0.500, -0.500],
    [ 0.809,  0.000, -0.309,  0.500], [ 0.809,  0.000,  0.309,  0.500],
    [-0.500,  0.500, -0.500, -0.500], [ 0.000,  0.809, -0.500, -0.309],
    [-0.309,  0.809,  0.000,  0.500], [ 0.809,  0.000, -0.309, -0.500],
    [ 0.500, -0.309,  0.000,  0.809], [ 0.000, -0.500,  0.309,  0.809],
    [ 0.500,  0.500, -0.500, -0.500], [-0.309, -0.500,  0.809,  0.000],
    [ 0.000,  0.809, -0.500,  0.309], [ 0.309,  0.809,  0.000,  0.500],
    [-0.500,  0.500,  0.500,  0.500], [ 0.000,  0.809,  0.500,  0.309],
    [ 0.309,  0.500,  0.809,  0.000], [ 0.000, -0.500, -0.309,  0.809],
    [-0.500, -0.309,  0.000,  0.809], [-0.500,  0.000,  0.809,  0.309],
    [-0.309,  0.500,  0.809,  0.000], [-0.500,  0.000,  0.809, -0.309],
    [ 0.500,  0.500, -0.500,  0.500], [ 0.500,  0.500,  0.500,  0.500],
    [ 0.500,  0.000,  0.809,  0.309], [ 0.309, -0.500,  0.809,  0.000],
    [ 0.500,  0.000,  0.809, -0.309], [-0.500,  0.500, -0.500,  0.500],
    [ 0.000,  0.309,  0.809, -0.500], [-0.309,  0.000, -0.500,  0.809],
    [-0.500,  0.309,  0.000,  0.809], [ 0.309,  0.000, -0.500,  0.809],
    [ 0.500,  0.309,  0.000,  0.809], [ 0.309,  0.000,  0.500,  0.809],
    [ 0.000, -0.309,  0.809,  0.500], [ 0.000,  0.000,  0.000,  1.000],
    [-0.309,  0.000,  0.500,  0.809], [ 0.000,  0.500,  0.309,  0.809],
    [ 0.000,  0.309,  0.809,  0.500], [ 0.000, -0.309,  0.809, -0.500],
    [ 0.000,  0.500, -0.309,  0.809], [ 0.000,  0.000,  1.000,  0.000],
];

/// Returns the I1 operators as normalized unit quaternions, in table order.
pub fn icosahedral_operators() -> Vec<UnitQuaternion<f64>> {
    I1_QUATERNIONS
        .iter()
        .map(|&[w, i, j, k]| UnitQuaternion::from_quaternion(Quaternion::new(w, i, j, k)))
        .collect()
}
