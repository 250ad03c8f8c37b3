//! Angle-based focus detection
//!
//! A [`FocusDetector`] compares the angle between an observer's facing
//! direction and the direction to a target against a threshold that
//! shrinks with distance, and holds a single [`Gazer`](crate::Gazer) on its
//! [`Gazeable`](crate::Gazeable) while the target is in focus.

mod detector;
mod settings;

pub use detector::{DetectorStatus, FocusChange, FocusDetector, FocusDetectorBuilder};
pub use settings::DetectorSettings;
