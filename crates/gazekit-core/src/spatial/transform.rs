//! World-space pose of an observer or target

use super::{Point3D, Quaternion, Vector3D};

/// Position and orientation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
}

impl Transform {
    /// Origin, facing +Z
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            rotation: Quaternion::IDENTITY,
        }
    }

    pub fn from_position_rotation(position: Point3D, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// A transform at `position` whose forward axis points at `target`
    pub fn looking_at(position: Point3D, target: Point3D) -> Self {
        Self {
            position,
            rotation: Quaternion::looking_along(target - position),
        }
    }

    /// Facing direction of this transform
    pub fn forward(&self) -> Vector3D {
        self.rotation.forward()
    }

    /// Apply `rotation` on top of the current orientation
    pub fn rotate(&mut self, rotation: Quaternion) {
        self.rotation = (rotation * self.rotation).normalize();
    }
}
