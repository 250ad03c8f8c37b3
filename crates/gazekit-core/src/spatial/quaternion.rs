//! Quaternion rotations for observer orientation

use std::ops::Mul;

use super::Vector3D;

/// A unit quaternion describing an orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle_radians` around `axis`
    pub fn from_axis_angle(axis: Vector3D, angle_radians: f32) -> Self {
        let half = angle_radians / 2.0;
        let sin_half = half.sin();
        let axis = axis.normalize();

        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: half.cos(),
        }
    }

    /// Rotation from yaw (around Y) then pitch (around X), both in degrees.
    ///
    /// Positive yaw turns the forward axis towards +X, positive pitch tilts it
    /// towards -Y.
    pub fn from_yaw_pitch_degrees(yaw: f32, pitch: f32) -> Self {
        let yaw = Self::from_axis_angle(Vector3D::UP, yaw.to_radians());
        let pitch = Self::from_axis_angle(Vector3D::RIGHT, pitch.to_radians());
        yaw * pitch
    }

    /// Orientation whose forward axis points along `direction`.
    ///
    /// Returns [`Quaternion::IDENTITY`] for a zero direction.
    pub fn looking_along(direction: Vector3D) -> Self {
        let dir = direction.normalize();
        if dir.magnitude_squared() == 0.0 {
            return Self::IDENTITY;
        }
        let dot = Vector3D::FORWARD.dot(&dir);
        if dot < -0.999_999 {
            return Self::from_axis_angle(Vector3D::UP, std::f32::consts::PI);
        }
        let axis = Vector3D::FORWARD.cross(&dir);
        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3D) -> Vector3D {
        let q_vec = Vector3D::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Where this rotation points the +Z axis
    pub fn forward(&self) -> Vector3D {
        self.rotate_vector(Vector3D::FORWARD)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
