//! 3D vector representation for directions

use std::ops::{Add, Mul, Neg, Sub};

/// Below this product of squared magnitudes two vectors have no usable angle.
const DEGENERATE_EPSILON: f32 = 1e-15;

/// A direction or offset in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector pointing forward (+Z)
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Unit-length copy of the vector, or [`Vector3D::ZERO`] for a zero vector
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self * (1.0 / mag)
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unsigned angle to another vector in degrees, in `[0, 180]`.
    ///
    /// Returns 0.0 when either vector is (nearly) zero.
    pub fn angle_degrees(&self, other: &Vector3D) -> f32 {
        let denominator = (self.magnitude_squared() * other.magnitude_squared()).sqrt();
        if denominator < DEGENERATE_EPSILON {
            return 0.0;
        }
        let cos = (self.dot(other) / denominator).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let n = Vector3D::new(3.0, 0.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 0.0001);
        assert_eq!(Vector3D::ZERO.normalize(), Vector3D::ZERO);
    }

    #[test]
    fn test_cross_product() {
        let result = Vector3D::RIGHT.cross(&Vector3D::UP);
        assert!((result.z - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_angle_degrees() {
        assert!((Vector3D::RIGHT.angle_degrees(&Vector3D::UP) - 90.0).abs() < 0.001);
        assert!(Vector3D::FORWARD.angle_degrees(&Vector3D::FORWARD).abs() < 0.001);
        assert!((Vector3D::FORWARD.angle_degrees(&-Vector3D::FORWARD) - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_angle_degrees_with_zero_vector() {
        assert_eq!(Vector3D::ZERO.angle_degrees(&Vector3D::UP), 0.0);
        assert_eq!(Vector3D::UP.angle_degrees(&Vector3D::ZERO), 0.0);
    }
}
