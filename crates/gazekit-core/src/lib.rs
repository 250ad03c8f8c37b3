//! gazekit-core: gaze state and focus detection for game objects
//!
//! This crate provides:
//! - [`Gazeable`], a reference-counted "being gazed at" flag fed by
//!   [`Gazer`] handles, with edge-triggered notifications
//! - [`FocusDetector`], which drives a gazer from observer/target geometry
//! - A minimal hosting scene ([`Scene`], [`Stage`]) for transforms and
//!   component lookup
//! - [`GazeCharger`] for forwarding gaze to something that charges up
//!
//! Everything is single-threaded and runs synchronously inside a tick.

pub mod charge;
pub mod error;
pub mod focus;
pub mod gaze;
pub mod introspect;
pub mod scene;
pub mod spatial;

pub use charge::{ChargeMeter, Chargeable, GazeCharger};
pub use error::{GazeError, Result};
pub use focus::{DetectorSettings, DetectorStatus, FocusChange, FocusDetector, FocusDetectorBuilder};
pub use gaze::{Gazeable, GazeableId, Gazer, GazerId, GazerSink, OwnerKey, Subscription};
pub use introspect::{GazeIntrospect, GazeSnapshot};
pub use scene::{EntityId, FocusEvent, Scene, SceneQuery, Stage};
pub use spatial::{Point3D, Quaternion, Transform, Vector3D};
