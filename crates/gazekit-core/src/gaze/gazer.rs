//! Contributor handles

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::gazeable::{Gazeable, GazeableInner};

/// Identity of a contributor handle, unique within its [`Gazeable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GazerId(pub(crate) u64);

impl fmt::Display for GazerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gazer#{}", self.0)
    }
}

/// Receiver of handle state changes.
///
/// Implemented by [`Gazeable`]; a [`Gazer`] reports every activation and
/// deactivation to the sink that issued it. Both calls must be idempotent.
/// A sink ignores handles it did not issue and reports whose flag disagrees
/// with the call.
pub trait GazerSink {
    fn gazer_activated(&self, gazer: &Gazer);
    fn gazer_deactivated(&self, gazer: &Gazer);
}

/// One producer's vote that its [`Gazeable`] is being gazed at.
///
/// Created inactive by [`Gazeable::create_gazer`] or active by
/// [`Gazeable::start_gazer`]. The handle only weakly references its
/// aggregate: operations on a handle whose aggregate is gone update the
/// local flag and do nothing else.
#[derive(Debug)]
pub struct Gazer {
    id: GazerId,
    owner: Weak<GazeableInner>,
    active: Cell<bool>,
}

impl Gazer {
    pub(crate) fn new(id: GazerId, owner: Weak<GazeableInner>) -> Self {
        Self {
            id,
            owner,
            active: Cell::new(false),
        }
    }

    pub fn id(&self) -> GazerId {
        self.id
    }

    pub(crate) fn is_owned_by(&self, inner: &Rc<GazeableInner>) -> bool {
        std::ptr::eq(self.owner.as_ptr(), Rc::as_ptr(inner))
    }

    /// The aggregate this handle contributes to, if it is still alive
    pub fn gazeable(&self) -> Option<Gazeable> {
        self.owner.upgrade().map(Gazeable::from_inner)
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Mark this handle active and report it to the aggregate
    pub fn activate(&self) {
        self.active.set(true);
        match self.gazeable() {
            Some(gazeable) => gazeable.gazer_activated(self),
            None => trace!(gazer = %self.id, "activate on orphaned gazer"),
        }
    }

    /// Mark this handle inactive and report it to the aggregate
    pub fn deactivate(&self) {
        self.active.set(false);
        match self.gazeable() {
            Some(gazeable) => gazeable.gazer_deactivated(self),
            None => trace!(gazer = %self.id, "deactivate on orphaned gazer"),
        }
    }

    pub fn set_active(&self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    pub fn toggle(&self) {
        self.set_active(!self.is_active());
    }

    /// Release this handle's contribution. Safe to call repeatedly.
    pub fn dispose(&self) {
        self.deactivate();
    }
}
