//! Hosting scene collaborators
//!
//! Focus detection reads transforms and looks up components through
//! [`SceneQuery`]. [`Scene`] is a small in-memory implementation and
//! [`Stage`] drives detectors against it once per tick.

mod stage;
mod world;

use std::fmt;

use crate::gaze::Gazeable;
use crate::spatial::Transform;

pub use stage::{FocusEvent, Stage};
pub use world::Scene;

/// Opaque identity of a scene entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Read access to the hosting scene
pub trait SceneQuery {
    /// World-space transform of `entity`
    fn transform(&self, entity: EntityId) -> Option<Transform>;

    /// The scene's designated main camera
    fn main_camera(&self) -> Option<EntityId>;

    /// Gazeable attached directly to `entity`
    fn gazeable(&self, entity: EntityId) -> Option<Gazeable>;

    fn children(&self, entity: EntityId) -> Vec<EntityId>;

    /// Gazeable on `entity` or, failing that, the first one found depth-first
    /// among its descendants
    fn gazeable_in_children(&self, entity: EntityId) -> Option<Gazeable> {
        self.gazeable(entity).or_else(|| {
            self.children(entity)
                .into_iter()
                .find_map(|child| self.gazeable_in_children(child))
        })
    }
}
