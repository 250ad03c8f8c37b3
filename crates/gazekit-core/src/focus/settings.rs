//! Focus threshold parameters

use serde::{Deserialize, Serialize};

use crate::error::{GazeError, Result};

/// Angle tolerance of a focus detector.
///
/// The effective threshold is `base_angle - distance_correction * distance`
/// degrees. It goes negative past `base_angle / distance_correction`, after
/// which focus is impossible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    /// Maximum angle in degrees at zero distance
    pub base_angle: f32,
    /// Degrees subtracted per unit of distance
    pub distance_correction: f32,
}

impl DetectorSettings {
    pub const DEFAULT_BASE_ANGLE: f32 = 10.0;
    pub const DEFAULT_DISTANCE_CORRECTION: f32 = 0.1;

    pub fn new(base_angle: f32, distance_correction: f32) -> Self {
        Self {
            base_angle,
            distance_correction,
        }
    }

    /// Maximum angle in degrees for a target `distance` units away
    pub fn threshold_at(&self, distance: f32) -> f32 {
        self.base_angle - self.distance_correction * distance
    }

    pub fn is_focused(&self, angle: f32, distance: f32) -> bool {
        angle <= self.threshold_at(distance)
    }

    /// Distance past which the threshold is negative, if it ever is
    pub fn focus_cutoff(&self) -> Option<f32> {
        (self.distance_correction > 0.0).then(|| self.base_angle / self.distance_correction)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_angle.is_finite() {
            return Err(GazeError::InvalidSettings(format!(
                "base_angle must be finite, got {}",
                self.base_angle
            )));
        }
        if !self.distance_correction.is_finite() {
            return Err(GazeError::InvalidSettings(format!(
                "distance_correction must be finite, got {}",
                self.distance_correction
            )));
        }
        Ok(())
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_ANGLE, Self::DEFAULT_DISTANCE_CORRECTION)
    }
}
