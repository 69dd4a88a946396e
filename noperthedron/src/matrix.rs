//! 3x3 matrices acting on points

use noperthedron_hull::Point3;
use serde::{Deserialize, Serialize};

/// Row-major 3x3 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3 {
    pub rows: [[f64; 3]; 3],
}

impl Matrix3 {
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub const fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `angle` radians about the z axis (counter-clockwise seen from +z)
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Element-wise multiplication by a scalar
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.rows.map(|row| row.map(|x| s * x)))
    }

    /// Matrix-vector product
    pub fn apply(&self, p: &Point3) -> Point3 {
        let [r0, r1, r2] = &self.rows;
        Point3::new(
            r0[0] * p.x + r0[1] * p.y + r0[2] * p.z,
            r1[0] * p.x + r1[1] * p.y + r1[2] * p.z,
            r2[0] * p.x + r2[1] * p.y + r2[2] * p.z,
        )
    }

    /// Matrix product `self * other` (apply `other` first)
    pub fn compose(&self, other: &Matrix3) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Self::new(rows)
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Largest element-wise absolute difference
    pub fn max_abs_diff(&self, other: &Matrix3) -> f64 {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn approx_eq(&self, other: &Matrix3, epsilon: f64) -> bool {
        self.max_abs_diff(other) <= epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|x| x.is_finite())
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}
