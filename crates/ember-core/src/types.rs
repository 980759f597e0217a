//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// A 4x4 column-major matrix
pub type Mat4 = [[f32; 4]; 4];

/// The 4x4 identity matrix
pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 column-major matrices
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

/// Transform a point by a 4x4 column-major matrix (w = 1)
pub fn mat4_transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3 {
        x: m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        y: m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        z: m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    }
}

/// A 3D transform with position, rotation (Euler angles), and scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation in degrees (Euler angles around X, Y, Z)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 transformation matrix (column-major).
    ///
    /// The local matrix is `T * Rx * Ry * Rz * S` under the column-vector
    /// convention, so translation is outermost and scale innermost.
    pub fn to_matrix(&self) -> Mat4 {
        let (px, py, pz) = (
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );

        let (sx, cx) = (px.sin(), px.cos());
        let (sy, cy) = (py.sin(), py.cos());
        let (sz, cz) = (pz.sin(), pz.cos());

        // Combined rotation R = Rx * Ry * Rz
        let (r00, r01, r02) = (cy * cz, -cy * sz, sy);
        let (r10, r11, r12) = (
            cx * sz + sx * sy * cz,
            cx * cz - sx * sy * sz,
            -sx * cy,
        );
        let (r20, r21, r22) = (
            sx * sz - cx * sy * cz,
            sx * cz + cx * sy * sz,
            cx * cy,
        );

        // Apply scale and translation
        [
            [r00 * self.scale.x, r10 * self.scale.x, r20 * self.scale.x, 0.0],
            [r01 * self.scale.y, r11 * self.scale.y, r21 * self.scale.y, 0.0],
            [r02 * self.scale.z, r12 * self.scale.z, r22 * self.scale.z, 0.0],
            [self.position.x, self.position.y, self.position.z, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vec3::new(3.0, 3.0, 3.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_transform_default() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), MAT4_IDENTITY);
    }

    #[test]
    fn test_translation_matrix() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let p = mat4_transform_point(&t.to_matrix(), Vec3::ZERO);
        assert!(approx(p, Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_scale_before_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        // Scale applies in local space, then translation
        let p = mat4_transform_point(&t.to_matrix(), Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_x_90() {
        let t = Transform::default().with_rotation(Vec3::new(90.0, 0.0, 0.0));
        let p = mat4_transform_point(&t.to_matrix(), Vec3::new(0.0, 1.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotation_y_90() {
        let t = Transform::default().with_rotation(Vec3::new(0.0, 90.0, 0.0));
        let p = mat4_transform_point(&t.to_matrix(), Vec3::new(0.0, 0.0, 1.0));
        assert!(approx(p, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_mat4_mul_identity() {
        let t = Transform::from_position(Vec3::new(4.0, 5.0, 6.0)).to_matrix();
        assert_eq!(mat4_mul(&MAT4_IDENTITY, &t), t);
        assert_eq!(mat4_mul(&t, &MAT4_IDENTITY), t);
    }

    #[test]
    fn test_mat4_mul_composes_translations() {
        let a = Transform::from_position(Vec3::new(1.0, 0.0, 0.0)).to_matrix();
        let b = Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).to_matrix();
        let p = mat4_transform_point(&mat4_mul(&a, &b), Vec3::ZERO);
        assert!(approx(p, Vec3::new(1.0, 2.0, 0.0)));
    }
}
