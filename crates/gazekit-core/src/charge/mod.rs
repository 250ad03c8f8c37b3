//! Gaze-driven charging
//!
//! [`GazeCharger`] forwards a gazeable's start/end transitions to a
//! [`Chargeable`], so something can fill up while it is being looked at.

mod meter;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{GazeError, Result};
use crate::gaze::{Gazeable, GazeableId, Subscription};
use crate::scene::{EntityId, SceneQuery};

pub use meter::ChargeMeter;

/// Receiver of charge sources
pub trait Chargeable {
    fn add_charger(&mut self, source: GazeableId);
    fn remove_charger(&mut self, source: GazeableId);
}

/// Subscription pair linking a [`Gazeable`] to a [`Chargeable`].
///
/// A transition that arrives while the chargeable is borrowed is deferred:
/// the latest gaze state is kept and applied on the next transition or on
/// [`flush`](Self::flush). Callers holding a borrow across gaze changes
/// should flush once they release it.
pub struct GazeCharger {
    gazeable: Gazeable,
    start: Subscription,
    end: Subscription,
    flush: Rc<dyn Fn() -> bool>,
}

/// Push the deferred state into `chargeable` if it is free
fn apply_pending<C: Chargeable>(
    chargeable: &RefCell<C>,
    pending: &Cell<Option<bool>>,
    source: GazeableId,
) -> bool {
    let Some(gazing) = pending.get() else {
        return true;
    };
    match chargeable.try_borrow_mut() {
        Ok(mut c) => {
            pending.set(None);
            if gazing {
                c.add_charger(source);
            } else {
                c.remove_charger(source);
            }
            true
        }
        Err(_) => {
            debug!(gazeable = %source, gazing, "chargeable busy, transition deferred");
            false
        }
    }
}

impl GazeCharger {
    /// Forward transitions of `gazeable` to `chargeable`
    pub fn attach<C>(gazeable: &Gazeable, chargeable: Rc<RefCell<C>>) -> Self
    where
        C: Chargeable + 'static,
    {
        let source = gazeable.id();
        let pending = Rc::new(Cell::new(None));

        let (c, p) = (Rc::clone(&chargeable), Rc::clone(&pending));
        let start = gazeable.on_start(move |_| {
            p.set(Some(true));
            apply_pending(&c, &p, source);
        });
        let (c, p) = (Rc::clone(&chargeable), Rc::clone(&pending));
        let end = gazeable.on_end(move |_| {
            p.set(Some(false));
            apply_pending(&c, &p, source);
        });
        let flush = Rc::new(move || apply_pending(&chargeable, &pending, source));

        Self {
            gazeable: gazeable.clone(),
            start,
            end,
            flush,
        }
    }

    /// Link the gazeable attached to `entity` with `chargeable`. Fails
    /// without subscribing anything if either is missing.
    pub fn attach_to<S, C>(
        scene: &S,
        entity: EntityId,
        chargeable: Option<Rc<RefCell<C>>>,
    ) -> Result<Self>
    where
        S: SceneQuery + ?Sized,
        C: Chargeable + 'static,
    {
        let gazeable = scene
            .gazeable(entity)
            .ok_or(GazeError::MissingGazeable { entity })?;
        let chargeable = chargeable.ok_or(GazeError::MissingChargeable)?;
        Ok(Self::attach(&gazeable, chargeable))
    }

    pub fn gazeable(&self) -> &Gazeable {
        &self.gazeable
    }

    /// Apply a deferred transition. Returns false if the chargeable is
    /// still borrowed.
    pub fn flush(&self) -> bool {
        (self.flush)()
    }

    /// Stop forwarding transitions. A still-deferred transition is dropped.
    pub fn detach(self) {
        self.gazeable.unsubscribe(self.start);
        self.gazeable.unsubscribe(self.end);
    }
}

impl fmt::Debug for GazeCharger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GazeCharger")
            .field("gazeable", &self.gazeable)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
