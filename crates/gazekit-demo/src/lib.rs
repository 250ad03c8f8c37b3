//! Headless gaze demo scenario

use std::cell::RefCell;
use std::rc::Rc;

use gazekit_config::GazeConfig;
use gazekit_core::{
    ChargeMeter, FocusChange, FocusDetector, GazeCharger, Point3D, Quaternion, Scene, Stage,
    Transform,
};
use tracing::{info, warn};

/// Scenario parameters
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub ticks: u64,
    pub orbs: usize,
    pub radius: f32,
    pub sweep_degrees: f32,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            ticks: 240,
            orbs: 3,
            radius: 8.0,
            sweep_degrees: 1.5,
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoReport {
    pub ticks: u64,
    pub gained: usize,
    pub lost: usize,
    pub full_meters: usize,
}

/// Half-width of the arc the orbs and the camera sweep cover, in degrees
const ARC_HALF_WIDTH: f32 = 60.0;

fn orb_yaw(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    -ARC_HALF_WIDTH + 2.0 * ARC_HALF_WIDTH * index as f32 / (count - 1) as f32
}

/// Camera yaw at `tick`: a triangle wave over the arc
fn camera_yaw(tick: u64, sweep_degrees: f32) -> f32 {
    let span = 4.0 * ARC_HALF_WIDTH;
    let phase = (tick as f32 * sweep_degrees).rem_euclid(span);
    if phase < 2.0 * ARC_HALF_WIDTH {
        -ARC_HALF_WIDTH + phase
    } else {
        3.0 * ARC_HALF_WIDTH - phase
    }
}

/// Build the scene, run it for `options.ticks` ticks and report
pub fn run(config: &GazeConfig, options: &DemoOptions) -> DemoReport {
    let mut scene = Scene::new();
    let camera = scene.spawn("camera", Transform::identity());
    scene.set_main_camera(Some(camera));

    let mut stage_detectors = Vec::new();
    let mut meters = Vec::new();
    let mut chargers = Vec::new();
    for index in 0..options.orbs {
        let direction = Quaternion::from_yaw_pitch_degrees(orb_yaw(index, options.orbs), 0.0)
            .forward()
            * options.radius;
        let orb = scene.spawn(
            format!("orb-{index}"),
            Transform::from_position(Point3D::ORIGIN + direction),
        );
        scene.attach_gazeable(orb);

        let meter = Rc::new(RefCell::new(ChargeMeter::new(config.charge.rate)));
        match GazeCharger::attach_to(&scene, orb, Some(Rc::clone(&meter))) {
            Ok(charger) => chargers.push(charger),
            Err(e) => warn!(%orb, error = %e, "orb will not charge"),
        }
        meters.push(meter);
        stage_detectors.push(
            FocusDetector::builder(orb)
                .settings(config.detector)
                .build(),
        );
    }

    let mut stage = Stage::new(scene);
    for detector in stage_detectors {
        stage.add_detector(detector);
    }

    let mut report = DemoReport::default();
    for tick in 0..options.ticks {
        let yaw = camera_yaw(tick, options.sweep_degrees);
        stage.scene_mut().set_transform(
            camera,
            Transform::from_position_rotation(
                Point3D::ORIGIN,
                Quaternion::from_yaw_pitch_degrees(yaw, 0.0),
            ),
        );

        for event in stage.tick() {
            let name = stage.scene().name(event.detector).unwrap_or("?");
            match event.change {
                FocusChange::Gained => {
                    report.gained += 1;
                    info!(tick = event.tick, orb = name, yaw, "gaze started");
                }
                FocusChange::Lost => {
                    report.lost += 1;
                    info!(tick = event.tick, orb = name, yaw, "gaze ended");
                }
            }
        }
        for meter in &meters {
            meter.borrow_mut().advance();
        }
    }

    for charger in chargers {
        charger.detach();
    }
    report.ticks = stage.ticks();
    report.full_meters = meters.iter().filter(|m| m.borrow().is_full()).count();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_yaw_is_triangle_wave() {
        assert_eq!(camera_yaw(0, 1.0), -60.0);
        assert_eq!(camera_yaw(60, 1.0), 0.0);
        assert_eq!(camera_yaw(120, 1.0), 60.0);
        assert_eq!(camera_yaw(180, 1.0), 0.0);
        assert_eq!(camera_yaw(240, 1.0), -60.0);
    }

    #[test]
    fn test_orb_layout() {
        assert_eq!(orb_yaw(0, 1), 0.0);
        assert_eq!(orb_yaw(0, 3), -60.0);
        assert_eq!(orb_yaw(1, 3), 0.0);
        assert_eq!(orb_yaw(2, 3), 60.0);
    }

    #[test]
    fn test_full_sweep_visits_every_orb() {
        let report = run(
            &GazeConfig::default(),
            &DemoOptions {
                ticks: 121,
                orbs: 3,
                radius: 8.0,
                sweep_degrees: 1.0,
            },
        );
        assert_eq!(report.ticks, 121);
        // camera ends on the last orb, still focused
        assert_eq!(report.gained, 3);
        assert_eq!(report.lost, 2);
    }

    #[test]
    fn test_zero_orbs() {
        let report = run(
            &GazeConfig::default(),
            &DemoOptions {
                orbs: 0,
                ..DemoOptions::default()
            },
        );
        assert_eq!(report.gained, 0);
        assert_eq!(report.full_meters, 0);
    }
}
