//! 3D point representation

use std::ops::{Add, Sub};

use super::Vector3D;

/// A world-space position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Origin point (0, 0, 0)
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new 3D point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f32 {
        (*other - *self).magnitude()
    }

    /// Unit vector pointing from this point towards `other` (zero if they coincide)
    pub fn direction_to(&self, other: &Point3D) -> Vector3D {
        (*other - *self).normalize()
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point3D::ORIGIN;
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
        assert!((b.distance(&a) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_direction_to() {
        let a = Point3D::new(1.0, 1.0, 1.0);
        let dir = a.direction_to(&Point3D::new(1.0, 1.0, 11.0));
        assert!((dir.z - 1.0).abs() < 0.0001);
        assert_eq!(a.direction_to(&a), Vector3D::ZERO);
    }
}
