//! In-memory scene

use std::collections::BTreeMap;

use super::{EntityId, SceneQuery};
use crate::gaze::Gazeable;
use crate::spatial::Transform;

#[derive(Debug)]
struct EntityRecord {
    name: String,
    transform: Transform,
    parent: Option<EntityId>,
    gazeable: Option<Gazeable>,
}

/// Entities with transforms, optional gazeables and a main camera
#[derive(Debug, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, EntityRecord>,
    main_camera: Option<EntityId>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> EntityId {
        self.insert(name.into(), transform, None)
    }

    /// Spawn an entity under `parent`; returns `None` if the parent does not exist
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Option<EntityId> {
        if !self.entities.contains_key(&parent) {
            return None;
        }
        Some(self.insert(name.into(), transform, Some(parent)))
    }

    fn insert(&mut self, name: String, transform: Transform, parent: Option<EntityId>) -> EntityId {
        self.next_id += 1;
        let id = EntityId::from_raw(self.next_id);
        self.entities.insert(
            id,
            EntityRecord {
                name,
                transform,
                parent,
                gazeable: None,
            },
        );
        id
    }

    /// Remove an entity; its children become roots
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if self.entities.remove(&entity).is_none() {
            return false;
        }
        for record in self.entities.values_mut() {
            if record.parent == Some(entity) {
                record.parent = None;
            }
        }
        if self.main_camera == Some(entity) {
            self.main_camera = None;
        }
        true
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.entities.get(&entity).map(|record| record.name.as_str())
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) -> bool {
        match self.entities.get_mut(&entity) {
            Some(record) => {
                record.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.entities.get_mut(&entity).map(|record| &mut record.transform)
    }

    /// The gazeable on `entity`, attaching a fresh one if it has none
    pub fn attach_gazeable(&mut self, entity: EntityId) -> Option<Gazeable> {
        let record = self.entities.get_mut(&entity)?;
        Some(record.gazeable.get_or_insert_with(Gazeable::new).clone())
    }

    pub fn set_main_camera(&mut self, camera: Option<EntityId>) {
        self.main_camera = camera;
    }
}

impl SceneQuery for Scene {
    fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.entities.get(&entity).map(|record| record.transform)
    }

    fn main_camera(&self) -> Option<EntityId> {
        self.main_camera.filter(|camera| self.entities.contains_key(camera))
    }

    fn gazeable(&self, entity: EntityId) -> Option<Gazeable> {
        self.entities.get(&entity)?.gazeable.clone()
    }

    fn children(&self, entity: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, record)| record.parent == Some(entity))
            .map(|(id, _)| *id)
            .collect()
    }
}
