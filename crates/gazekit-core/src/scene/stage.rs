//! Tick driver for focus detectors

use tracing::trace;

use super::{EntityId, Scene};
use crate::focus::{FocusChange, FocusDetector};

/// A focus change reported by one detector during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub tick: u64,
    pub detector: EntityId,
    pub change: FocusChange,
}

/// A scene plus the detectors evaluated against it
#[derive(Debug, Default)]
pub struct Stage {
    scene: Scene,
    detectors: Vec<FocusDetector>,
    ticks: u64,
}

impl Stage {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            detectors: Vec::new(),
            ticks: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Register a detector; returns its index
    pub fn add_detector(&mut self, detector: FocusDetector) -> usize {
        self.detectors.push(detector);
        self.detectors.len() - 1
    }

    /// Remove a detector, releasing any focus it holds
    pub fn remove_detector(&mut self, index: usize) -> Option<FocusDetector> {
        if index >= self.detectors.len() {
            return None;
        }
        let mut detector = self.detectors.remove(index);
        detector.release();
        Some(detector)
    }

    pub fn detector(&self, index: usize) -> Option<&FocusDetector> {
        self.detectors.get(index)
    }

    pub fn detectors(&self) -> &[FocusDetector] {
        &self.detectors
    }

    /// Number of completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Evaluate every detector once, in registration order
    pub fn tick(&mut self) -> Vec<FocusEvent> {
        self.ticks += 1;
        let tick = self.ticks;
        let scene = &self.scene;
        let events: Vec<FocusEvent> = self
            .detectors
            .iter_mut()
            .filter_map(|detector| {
                detector.update(scene).map(|change| FocusEvent {
                    tick,
                    detector: detector.entity(),
                    change,
                })
            })
            .collect();
        trace!(tick, changes = events.len(), "stage tick");
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneQuery;
    use crate::spatial::{Point3D, Quaternion, Transform};

    #[test]
    fn test_tick_reports_changes() {
        let mut scene = Scene::new();
        let camera = scene.spawn("camera", Transform::identity());
        scene.set_main_camera(Some(camera));
        let cube = scene.spawn("cube", Transform::from_position(Point3D::new(0.0, 0.0, 4.0)));
        let gazeable = scene.attach_gazeable(cube).unwrap();

        let mut stage = Stage::new(scene);
        stage.add_detector(FocusDetector::new(cube));

        let events = stage.tick();
        assert_eq!(
            events,
            vec![FocusEvent {
                tick: 1,
                detector: cube,
                change: FocusChange::Gained
            }]
        );
        assert!(stage.tick().is_empty());

        if let Some(t) = stage.scene_mut().transform_mut(camera) {
            t.rotate(Quaternion::from_yaw_pitch_degrees(30.0, 0.0));
        }
        let events = stage.tick();
        assert_eq!(events[0].change, FocusChange::Lost);
        assert_eq!(stage.ticks(), 3);
        assert!(!gazeable.is_gazed_at());
        assert!(stage.scene().gazeable(cube).is_some());
    }

    #[test]
    fn test_remove_detector_releases() {
        let mut scene = Scene::new();
        let camera = scene.spawn("camera", Transform::identity());
        scene.set_main_camera(Some(camera));
        let cube = scene.spawn("cube", Transform::from_position(Point3D::new(0.0, 0.0, 4.0)));
        let gazeable = scene.attach_gazeable(cube).unwrap();

        let mut stage = Stage::new(scene);
        let index = stage.add_detector(FocusDetector::new(cube));
        stage.tick();
        assert!(gazeable.is_gazed_at());

        let detector = stage.remove_detector(index).unwrap();
        assert!(!detector.is_focused());
        assert!(!gazeable.is_gazed_at());
        assert!(stage.remove_detector(index).is_none());
    }
}
