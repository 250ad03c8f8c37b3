//! Spatial primitives sampled by focus detection
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)

mod point3d;
mod quaternion;
mod transform;
mod vector3d;

pub use point3d::Point3D;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector3d::Vector3D;

/// Angle in degrees between an observer's facing direction and the
/// direction from the observer to `target`.
///
/// 0.0 means the observer faces the target exactly, 180.0 means it faces
/// exactly away. An observer standing on the target reports 0.0.
pub fn gaze_angle(observer: &Transform, target: Point3D) -> f32 {
    let to_target = (target - observer.position).normalize();
    let look = observer.forward().normalize();
    to_target.angle_degrees(&look)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaze_angle_facing_target() {
        let observer = Transform::from_position(Point3D::ORIGIN);
        let angle = gaze_angle(&observer, Point3D::new(0.0, 0.0, 5.0));
        assert!(angle.abs() < 0.001);
    }

    #[test]
    fn test_gaze_angle_facing_away() {
        let observer = Transform::from_position(Point3D::ORIGIN);
        let angle = gaze_angle(&observer, Point3D::new(0.0, 0.0, -5.0));
        assert!((angle - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_gaze_angle_ignores_roll() {
        let target = Point3D::new(1.0, 0.5, 6.0);
        let observer = Transform::from_position(Point3D::ORIGIN);
        let baseline = gaze_angle(&observer, target);

        for roll in [0.3_f32, 1.2, 2.5, -0.9] {
            let rolled = Transform::from_position_rotation(
                Point3D::ORIGIN,
                Quaternion::from_axis_angle(Vector3D::FORWARD, roll),
            );
            assert!((gaze_angle(&rolled, target) - baseline).abs() < 0.01);
        }
    }

    #[test]
    fn test_gaze_angle_coincident_positions() {
        let observer = Transform::from_position(Point3D::new(2.0, 2.0, 2.0));
        assert_eq!(gaze_angle(&observer, Point3D::new(2.0, 2.0, 2.0)), 0.0);
    }
}
