//! gazekit: reference-counted gaze state and angle-based focus detection
//!
//! Re-exports the member crates:
//! - [`gazekit_core`]: gazeables, gazers, focus detectors and the hosting scene
//! - [`gazekit_config`]: TOML configuration loading

pub use gazekit_config;
pub use gazekit_core;

pub use gazekit_config::{default_config_path, ConfigError, GazeConfig};
pub use gazekit_core::{
    ChargeMeter, Chargeable, DetectorSettings, DetectorStatus, EntityId, FocusChange,
    FocusDetector, FocusDetectorBuilder, FocusEvent, GazeCharger, GazeError, GazeIntrospect,
    GazeSnapshot, Gazeable, GazeableId, Gazer, GazerId, GazerSink, OwnerKey, Point3D, Quaternion,
    Scene, SceneQuery, Stage, Subscription, Transform, Vector3D,
};
