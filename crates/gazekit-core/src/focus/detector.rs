//! Per-tick focus evaluation

use tracing::{debug, trace, warn};

use super::DetectorSettings;
use crate::error::{GazeError, Result};
use crate::gaze::{Gazeable, Gazer};
use crate::introspect::{DebugProbe, GazeIntrospect, GazeSnapshot};
use crate::scene::{EntityId, SceneQuery};
use crate::spatial::{self, Point3D, Transform};

/// Lifecycle of a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorStatus {
    /// Collaborators not resolved yet
    Pending,
    Running,
    /// Setup failed; the detector never evaluates again
    Disabled,
}

/// Focus transition produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    Gained,
    Lost,
}

/// Drives one [`Gazer`] on a [`Gazeable`] from observer/target geometry.
///
/// Unwired collaborators are resolved on [`start`](Self::start): the
/// target defaults to the detector's own entity and the gazeable to the one
/// attached to that entity. The observer defaults to the scene's main
/// camera and is re-resolved every tick.
///
/// Dropping the detector releases its gazer.
#[derive(Debug)]
pub struct FocusDetector {
    entity: EntityId,
    settings: DetectorSettings,
    actor: Option<EntityId>,
    target: Option<EntityId>,
    gazeable: Option<Gazeable>,
    gazer: Option<Gazer>,
    status: DetectorStatus,
    probe: DebugProbe,
}

/// Explicit wiring for a [`FocusDetector`]
#[derive(Debug)]
pub struct FocusDetectorBuilder {
    entity: EntityId,
    settings: DetectorSettings,
    actor: Option<EntityId>,
    target: Option<EntityId>,
    gazeable: Option<Gazeable>,
}

impl FocusDetectorBuilder {
    pub fn settings(mut self, settings: DetectorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Entity whose position and forward vector form the gaze ray
    pub fn actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Entity whose position is gazed at
    pub fn target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn gazeable(mut self, gazeable: Gazeable) -> Self {
        self.gazeable = Some(gazeable);
        self
    }

    pub fn build(self) -> FocusDetector {
        FocusDetector {
            entity: self.entity,
            settings: self.settings,
            actor: self.actor,
            target: self.target,
            gazeable: self.gazeable,
            gazer: None,
            status: DetectorStatus::Pending,
            probe: DebugProbe::default(),
        }
    }
}

impl FocusDetector {
    /// A detector on `entity` with default settings and no explicit wiring
    pub fn new(entity: EntityId) -> Self {
        Self::builder(entity).build()
    }

    pub fn builder(entity: EntityId) -> FocusDetectorBuilder {
        FocusDetectorBuilder {
            entity,
            settings: DetectorSettings::default(),
            actor: None,
            target: None,
            gazeable: None,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    pub fn status(&self) -> DetectorStatus {
        self.status
    }

    /// True while this detector holds an active gazer
    pub fn is_focused(&self) -> bool {
        self.gazer.is_some()
    }

    pub fn gazeable(&self) -> Option<&Gazeable> {
        self.gazeable.as_ref()
    }

    /// Resolve default collaborators. Runs once; a failure disables the
    /// detector for good.
    pub fn start<S: SceneQuery + ?Sized>(&mut self, scene: &S) -> Result<()> {
        match self.status {
            DetectorStatus::Running => return Ok(()),
            DetectorStatus::Disabled => {
                return Err(GazeError::DetectorDisabled {
                    entity: self.entity,
                })
            }
            DetectorStatus::Pending => {}
        }

        if let Err(e) = self.settings.validate() {
            return Err(self.disable(e));
        }

        if self.gazeable.is_none() {
            self.gazeable = scene.gazeable(self.entity);
        }
        if self.gazeable.is_none() {
            return Err(self.disable(GazeError::MissingGazeable {
                entity: self.entity,
            }));
        }

        self.target.get_or_insert(self.entity);
        self.status = DetectorStatus::Running;
        debug!(entity = %self.entity, "focus detector started");
        Ok(())
    }

    fn disable(&mut self, error: GazeError) -> GazeError {
        warn!(entity = %self.entity, %error, "disabling focus detector");
        self.status = DetectorStatus::Disabled;
        error
    }

    /// Evaluate one tick. Starts the detector on first use.
    ///
    /// An observer or target whose transform cannot be resolved counts as
    /// out of focus.
    pub fn update<S: SceneQuery + ?Sized>(&mut self, scene: &S) -> Option<FocusChange> {
        if self.status == DetectorStatus::Pending && self.start(scene).is_err() {
            return None;
        }
        if self.status != DetectorStatus::Running {
            return None;
        }

        let focused = match self.sample(scene) {
            Some((actor, target)) => {
                let angle = spatial::gaze_angle(&actor, target);
                let threshold = self.settings.threshold_at(target.distance(&actor.position));
                self.probe.record(angle, threshold);
                angle <= threshold
            }
            None => {
                trace!(entity = %self.entity, "observer or target unresolved");
                false
            }
        };
        self.apply(focused)
    }

    /// Current angle in degrees between the observer's forward vector and
    /// the direction to the target
    pub fn angle<S: SceneQuery + ?Sized>(&self, scene: &S) -> Option<f32> {
        self.sample(scene)
            .map(|(actor, target)| spatial::gaze_angle(&actor, target))
    }

    fn sample<S: SceneQuery + ?Sized>(&self, scene: &S) -> Option<(Transform, Point3D)> {
        let actor = self.actor.or_else(|| scene.main_camera())?;
        let actor = scene.transform(actor)?;
        let target = scene.transform(self.target.unwrap_or(self.entity))?;
        Some((actor, target.position))
    }

    fn apply(&mut self, focused: bool) -> Option<FocusChange> {
        match (focused, self.gazer.is_some()) {
            (true, false) => {
                let gazer = self.gazeable.as_ref()?.start_gazer();
                debug!(entity = %self.entity, gazer = %gazer.id(), "focus gained");
                self.gazer = Some(gazer);
                Some(FocusChange::Gained)
            }
            (false, true) => {
                self.release();
                debug!(entity = %self.entity, "focus lost");
                Some(FocusChange::Lost)
            }
            _ => None,
        }
    }

    /// Give up focus without waiting for the next tick
    pub fn release(&mut self) {
        if let Some(gazer) = self.gazer.take() {
            gazer.dispose();
        }
    }
}

impl GazeIntrospect for FocusDetector {
    fn snapshot(&self) -> GazeSnapshot {
        let (angle, threshold) = self.probe.values();
        GazeSnapshot {
            angle,
            threshold,
            gazed_at: self
                .gazeable
                .as_ref()
                .map(Gazeable::is_gazed_at)
                .unwrap_or(false),
        }
    }
}

impl Drop for FocusDetector {
    fn drop(&mut self) {
        self.release();
    }
}
