//! Vector and matrix primitives for limb matching.
//!
//! Vectors are plain `[f64; 3]` arrays. Matrices are row-major `[[f64; 4]; 4]`
//! with the basis axes stored in columns 0..3 and the translation in column 3,
//! so `m[row][col]` multiplies column vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A 3D vector or point.
pub type Vec3 = [f64; 3];

/// A 4x4 affine transform, row-major, column vectors.
pub type Mat4 = [[f64; 4]; 4];

/// Below this, a direction is treated as zero length.
pub const ZERO_LENGTH_EPSILON: f64 = 1e-12;

/// Below this, normalized aim and pole directions count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-6;

/// Below this, the Euler decomposition is treated as gimbal-locked.
pub const GIMBAL_EPSILON: f64 = 1e-6;

/// 4x4 identity.
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

// =============================================================================
// Axis
// =============================================================================

/// A principal local axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Local X.
    #[default]
    X,
    /// Local Y.
    Y,
    /// Local Z.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the column index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the axis name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Returns the axis that is neither `self` nor `other`.
    ///
    /// Returns `None` when both are the same axis.
    pub fn remaining(self, other: Axis) -> Option<Axis> {
        if self == other {
            return None;
        }
        Axis::ALL.into_iter().find(|a| *a != self && *a != other)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Vector Operations
// =============================================================================

/// Direction from `a` to `b` (`b - a`).
pub fn vector(a: Vec3, b: Vec3) -> Vec3 {
    subtract(b, a)
}

/// Vector addition.
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Vector subtraction.
pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Scale a vector.
pub fn scale(v: Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Vector dot product.
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Vector cross product.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean length.
pub fn length(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(subtract(b, a))
}

/// Normalize a vector. A zero-length vector stays zero.
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    if len > ZERO_LENGTH_EPSILON {
        scale(v, 1.0 / len)
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Angle between two directions in radians. Zero if either is zero length.
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    let denom = length(a) * length(b);
    if denom <= ZERO_LENGTH_EPSILON {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0).acos()
}

/// Converts a radian triple to degrees.
pub fn degrees3(v: Vec3) -> Vec3 {
    [v[0].to_degrees(), v[1].to_degrees(), v[2].to_degrees()]
}

/// Converts a degree triple to radians.
pub fn radians3(v: Vec3) -> Vec3 {
    [v[0].to_radians(), v[1].to_radians(), v[2].to_radians()]
}

// =============================================================================
// Matrix Operations
// =============================================================================

/// Returns basis column `axis` of a matrix.
pub fn column(m: &Mat4, axis: Axis) -> Vec3 {
    let c = axis.index();
    [m[0][c], m[1][c], m[2][c]]
}

/// Returns the translation column of a matrix.
pub fn translation(m: &Mat4) -> Vec3 {
    [m[0][3], m[1][3], m[2][3]]
}

/// Builds a transform whose `aim_axis` points along `aim_dir` and whose
/// `pole_axis` points along the part of `pole_dir` orthogonal to `aim_dir`.
///
/// The remaining axis is the cross product of the other two in cyclic order,
/// so the basis is always right-handed and orthonormal. The translation
/// column is `position`.
///
/// Fails before building anything when the axes coincide, when either
/// direction has zero length, or when the directions are parallel.
pub fn aim_matrix(
    position: Vec3,
    aim_dir: Vec3,
    pole_dir: Vec3,
    aim_axis: Axis,
    pole_axis: Axis,
) -> Result<Mat4, GeometryError> {
    let last_axis = aim_axis
        .remaining(pole_axis)
        .ok_or(GeometryError::SameAxis { axis: aim_axis })?;
    if length(aim_dir) <= ZERO_LENGTH_EPSILON {
        return Err(GeometryError::ZeroVector { what: "aim" });
    }
    if length(pole_dir) <= ZERO_LENGTH_EPSILON {
        return Err(GeometryError::ZeroVector { what: "pole" });
    }

    let aim = normalize(aim_dir);
    let last = cross(aim, normalize(pole_dir));
    if length(last) < PARALLEL_EPSILON {
        return Err(GeometryError::ParallelVectors);
    }
    let clean_pole = normalize(cross(last, aim));

    let mut axes: [Vec3; 3] = [[0.0; 3]; 3];
    axes[aim_axis.index()] = aim;
    axes[pole_axis.index()] = clean_pole;
    let r = last_axis.index();
    axes[r] = cross(axes[(r + 1) % 3], axes[(r + 2) % 3]);

    let mut m = IDENTITY;
    for (col, axis) in axes.iter().enumerate() {
        for row in 0..3 {
            m[row][col] = axis[row];
        }
    }
    for (row, value) in position.iter().enumerate() {
        m[row][3] = *value;
    }
    Ok(m)
}

/// Extracts XYZ-order Euler angles (radians) from the rotation part of `m`,
/// where the rotation is `Rz * Ry * Rx`.
///
/// Near gimbal lock (`sqrt(m00² + m10²) < 1e-6`) only two angles are
/// recoverable; Z is set to zero and X absorbs the remaining rotation.
pub fn euler_from_matrix(m: &Mat4) -> Vec3 {
    let sy = (m[0][0] * m[0][0] + m[1][0] * m[1][0]).sqrt();
    if sy >= GIMBAL_EPSILON {
        [
            m[2][1].atan2(m[2][2]),
            (-m[2][0]).atan2(sy),
            m[1][0].atan2(m[0][0]),
        ]
    } else {
        [(-m[1][2]).atan2(m[1][1]), (-m[2][0]).atan2(sy), 0.0]
    }
}

/// Builds a rotation matrix from XYZ-order Euler angles (radians).
pub fn matrix_from_euler(angles: Vec3) -> Mat4 {
    let (sx, cx) = angles[0].sin_cos();
    let (sy, cy) = angles[1].sin_cos();
    let (sz, cz) = angles[2].sin_cos();
    [
        [cz * cy, cz * sy * sx - sz * cx, cz * sy * cx + sz * sx, 0.0],
        [sz * cy, sz * sy * sx + cz * cx, sz * sy * cx - cz * sx, 0.0],
        [-sy, cy * sx, cy * cx, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < EPS, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_vector_is_b_minus_a() {
        assert_eq!(vector([1.0, 2.0, 3.0], [4.0, 6.0, 8.0]), [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_cross_and_normalize() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert_vec_eq(normalize([3.0, 0.0, 4.0]), [0.6, 0.0, 0.8]);
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert!((length([2.0, 3.0, 6.0]) - 7.0).abs() < EPS);
    }

    #[test]
    fn test_axis_remaining() {
        assert_eq!(Axis::X.remaining(Axis::Y), Some(Axis::Z));
        assert_eq!(Axis::Z.remaining(Axis::X), Some(Axis::Y));
        assert_eq!(Axis::Y.remaining(Axis::Y), None);
    }

    #[test]
    fn test_aim_matrix_x_aim_y_pole() {
        let m = aim_matrix(
            [1.0, 2.0, 3.0],
            [2.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            Axis::X,
            Axis::Y,
        )
        .unwrap();
        assert_vec_eq(column(&m, Axis::X), [1.0, 0.0, 0.0]);
        assert_vec_eq(column(&m, Axis::Y), [0.0, 1.0, 0.0]);
        assert_vec_eq(column(&m, Axis::Z), [0.0, 0.0, 1.0]);
        assert_vec_eq(translation(&m), [1.0, 2.0, 3.0]);
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_aim_matrix_is_right_handed_for_every_axis_pair() {
        let aim = [0.3, -0.2, 0.9];
        let pole = [0.0, 1.0, 0.1];
        for aim_axis in Axis::ALL {
            for pole_axis in Axis::ALL {
                if aim_axis == pole_axis {
                    continue;
                }
                let m = aim_matrix([0.0; 3], aim, pole, aim_axis, pole_axis).unwrap();
                let x = column(&m, Axis::X);
                let y = column(&m, Axis::Y);
                let z = column(&m, Axis::Z);
                assert_vec_eq(cross(x, y), z);
                assert_vec_eq(column(&m, aim_axis), normalize(aim));
                // Pole axis leans toward the pole direction.
                assert!(dot(column(&m, pole_axis), pole) > 0.0);
                assert!(dot(column(&m, pole_axis), aim).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_aim_matrix_rejects_same_axis() {
        let err = aim_matrix([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], Axis::Z, Axis::Z)
            .unwrap_err();
        assert_eq!(err, GeometryError::SameAxis { axis: Axis::Z });
    }

    #[test]
    fn test_aim_matrix_rejects_parallel_and_zero() {
        let err = aim_matrix([0.0; 3], [0.0, 2.0, 0.0], [0.0, -5.0, 0.0], Axis::X, Axis::Y)
            .unwrap_err();
        assert_eq!(err, GeometryError::ParallelVectors);

        let err = aim_matrix([0.0; 3], [0.0; 3], [0.0, 1.0, 0.0], Axis::X, Axis::Y)
            .unwrap_err();
        assert_eq!(err, GeometryError::ZeroVector { what: "aim" });
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = radians3([30.0, -45.0, 120.0]);
        let m = matrix_from_euler(angles);
        assert_vec_eq(euler_from_matrix(&m), angles);
    }

    #[test]
    fn test_euler_gimbal_lock_sets_z_to_zero() {
        let m = matrix_from_euler(radians3([10.0, 90.0, 0.0]));
        let angles = euler_from_matrix(&m);
        assert_eq!(angles[2], 0.0);
        assert!((angles[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
        // Rebuilding from the reduced angles gives the same rotation.
        let rebuilt = matrix_from_euler(angles);
        for row in 0..3 {
            for col in 0..3 {
                assert!((rebuilt[row][col] - m[row][col]).abs() < 1e-6);
            }
        }
    }
}
