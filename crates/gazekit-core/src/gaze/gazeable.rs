//! The gaze aggregator

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use super::events::{Listener, Listeners, Subscription};
use super::gazer::{Gazer, GazerId, GazerSink};
use crate::introspect::{GazeIntrospect, GazeSnapshot};
use crate::scene::{EntityId, SceneQuery};

static NEXT_GAZEABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide identity of a [`Gazeable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GazeableId(u64);

impl fmt::Display for GazeableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gazeable#{}", self.0)
    }
}

/// Identity of a caller that lets the aggregate own its handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Name(String),
    Entity(EntityId),
}

impl From<&str> for OwnerKey {
    fn from(name: &str) -> Self {
        OwnerKey::Name(name.to_string())
    }
}

impl From<String> for OwnerKey {
    fn from(name: String) -> Self {
        OwnerKey::Name(name)
    }
}

impl From<EntityId> for OwnerKey {
    fn from(entity: EntityId) -> Self {
        OwnerKey::Entity(entity)
    }
}

#[derive(Debug)]
pub(crate) struct GazeableInner {
    id: GazeableId,
    next_gazer: Cell<u64>,
    active: RefCell<HashSet<GazerId>>,
    keyed: RefCell<HashMap<OwnerKey, Rc<Gazer>>>,
    listeners: Listeners,
    gazed_flag: Cell<bool>,
}

/// Shared "being gazed at" state of one entity.
///
/// Cloning yields another reference to the same aggregate.
#[derive(Clone)]
pub struct Gazeable {
    inner: Rc<GazeableInner>,
}

impl Gazeable {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(GazeableInner {
                id: GazeableId(NEXT_GAZEABLE_ID.fetch_add(1, Ordering::Relaxed)),
                next_gazer: Cell::new(0),
                active: RefCell::new(HashSet::new()),
                keyed: RefCell::new(HashMap::new()),
                listeners: Listeners::default(),
                gazed_flag: Cell::new(false),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<GazeableInner>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> GazeableId {
        self.inner.id
    }

    /// True while at least one handle is active
    pub fn is_gazed_at(&self) -> bool {
        !self.inner.active.borrow().is_empty()
    }

    /// Number of handles currently contributing
    pub fn active_count(&self) -> usize {
        self.inner.active.borrow().len()
    }

    /// Number of owners with a handle hosted by this aggregate
    pub fn keyed_count(&self) -> usize {
        self.inner.keyed.borrow().len()
    }

    /// Handle identity issued to `key`, if any
    pub fn keyed_gazer(&self, key: &OwnerKey) -> Option<GazerId> {
        self.inner.keyed.borrow().get(key).map(|gazer| gazer.id())
    }

    /// A new, inactive handle bound to this aggregate
    pub fn create_gazer(&self) -> Gazer {
        let id = self.inner.next_gazer.get();
        self.inner.next_gazer.set(id + 1);
        Gazer::new(GazerId(id), Rc::downgrade(&self.inner))
    }

    /// A new handle that has already been activated
    pub fn start_gazer(&self) -> Gazer {
        let gazer = self.create_gazer();
        gazer.activate();
        gazer
    }

    /// Activate the handle hosted for `key`, creating it on first use
    pub fn start_keyed(&self, key: impl Into<OwnerKey>) {
        let key = key.into();
        let gazer = {
            let mut keyed = self.inner.keyed.borrow_mut();
            let gazer = keyed.entry(key).or_insert_with_key(|key| {
                trace!(gazeable = %self.inner.id, ?key, "hosting new keyed gazer");
                Rc::new(self.create_gazer())
            });
            Rc::clone(gazer)
        };
        gazer.activate();
    }

    /// Deactivate the handle hosted for `key`. Unknown keys are ignored.
    pub fn end_keyed(&self, key: impl Into<OwnerKey>) {
        let key = key.into();
        match self.hosted(&key) {
            Some(gazer) => gazer.deactivate(),
            None => trace!(gazeable = %self.inner.id, ?key, "end for unknown key ignored"),
        }
    }

    /// Flip the handle hosted for `key`, or start one if there is none
    pub fn toggle_keyed(&self, key: impl Into<OwnerKey>) {
        let key = key.into();
        match self.hosted(&key) {
            Some(gazer) => gazer.toggle(),
            None => self.start_keyed(key),
        }
    }

    fn hosted(&self, key: &OwnerKey) -> Option<Rc<Gazer>> {
        self.inner.keyed.borrow().get(key).cloned()
    }

    /// An inactive handle for `explicit`, or for the first gazeable found on
    /// `entity` or its descendants.
    pub fn gazer_for<S: SceneQuery + ?Sized>(
        explicit: Option<&Gazeable>,
        scene: &S,
        entity: EntityId,
    ) -> Option<Gazer> {
        match explicit {
            Some(gazeable) => Some(gazeable.create_gazer()),
            None => scene
                .gazeable_in_children(entity)
                .map(|gazeable| gazeable.create_gazer()),
        }
    }

    /// Listen to every transition; receives the new state
    pub fn on_change(&self, f: impl Fn(&Gazeable, bool) + 'static) -> Subscription {
        self.inner.listeners.add(Listener::Changed(Rc::new(f)))
    }

    /// Listen to "nobody gazing" → "somebody gazing"
    pub fn on_start(&self, f: impl Fn(&Gazeable) + 'static) -> Subscription {
        self.inner.listeners.add(Listener::Start(Rc::new(f)))
    }

    /// Listen to "somebody gazing" → "nobody gazing"
    pub fn on_end(&self, f: impl Fn(&Gazeable) + 'static) -> Subscription {
        self.inner.listeners.add(Listener::End(Rc::new(f)))
    }

    pub fn on_start_plain(&self, f: impl Fn() + 'static) -> Subscription {
        self.inner.listeners.add(Listener::StartPlain(Rc::new(f)))
    }

    pub fn on_end_plain(&self, f: impl Fn() + 'static) -> Subscription {
        self.inner.listeners.add(Listener::EndPlain(Rc::new(f)))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.inner.listeners.remove(subscription)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// State as of the last completed notification
    pub fn debug_flag(&self) -> bool {
        self.inner.gazed_flag.get()
    }

    fn notify_change(&self, gazed: bool) {
        debug!(gazeable = %self.inner.id, gazed, "gaze state changed");
        self.inner.listeners.dispatch(self, gazed);
        // a listener may already have flipped the state back
        self.inner.gazed_flag.set(self.is_gazed_at());
    }
}

impl GazerSink for Gazeable {
    fn gazer_activated(&self, gazer: &Gazer) {
        if !gazer.is_owned_by(&self.inner) || !gazer.is_active() {
            trace!(gazeable = %self.inner.id, gazer = %gazer.id(), "activation report ignored");
            return;
        }
        let gazer = gazer.id();
        let was_gazed = {
            let mut active = self.inner.active.borrow_mut();
            if active.contains(&gazer) {
                trace!(gazeable = %self.inner.id, %gazer, "gazer already active");
                return;
            }
            let was_gazed = !active.is_empty();
            active.insert(gazer);
            was_gazed
        };
        if !was_gazed {
            self.notify_change(true);
        }
    }

    fn gazer_deactivated(&self, gazer: &Gazer) {
        if !gazer.is_owned_by(&self.inner) || gazer.is_active() {
            trace!(gazeable = %self.inner.id, gazer = %gazer.id(), "deactivation report ignored");
            return;
        }
        let gazer = gazer.id();
        let (was_gazed, gazed_now) = {
            let mut active = self.inner.active.borrow_mut();
            let was_gazed = !active.is_empty();
            active.remove(&gazer);
            (was_gazed, !active.is_empty())
        };
        if was_gazed && !gazed_now {
            self.notify_change(false);
        }
    }
}

impl GazeIntrospect for Gazeable {
    fn snapshot(&self) -> GazeSnapshot {
        GazeSnapshot {
            gazed_at: self.debug_flag(),
            ..GazeSnapshot::default()
        }
    }
}

impl Default for Gazeable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Gazeable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Gazeable {}

impl fmt::Debug for Gazeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gazeable")
            .field("id", &self.inner.id)
            .field("active", &self.active_count())
            .field("keyed", &self.keyed_count())
            .field("listeners", &self.inner.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every notification as a short tag, in dispatch order
    fn record(gazeable: &Gazeable) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        gazeable.on_change(move |_, gazed| l.borrow_mut().push(format!("change:{gazed}")));
        let l = Rc::clone(&log);
        gazeable.on_start(move |_| l.borrow_mut().push("start".into()));
        let l = Rc::clone(&log);
        gazeable.on_end(move |_| l.borrow_mut().push("end".into()));
        let l = Rc::clone(&log);
        gazeable.on_start_plain(move || l.borrow_mut().push("start_plain".into()));
        let l = Rc::clone(&log);
        gazeable.on_end_plain(move || l.borrow_mut().push("end_plain".into()));
        log
    }

    #[test]
    fn test_create_gazer_is_inactive() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);
        let gazer = gazeable.create_gazer();
        assert!(!gazer.is_active());
        assert!(!gazeable.is_gazed_at());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_notification_order() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);

        let gazer = gazeable.start_gazer();
        gazer.deactivate();

        assert_eq!(
            *log.borrow(),
            vec![
                "change:true",
                "start_plain",
                "start",
                "change:false",
                "end_plain",
                "end"
            ]
        );
    }

    #[test]
    fn test_two_contributors_single_edge() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);

        let a = gazeable.start_gazer();
        let b = gazeable.start_gazer();
        assert_eq!(gazeable.active_count(), 2);
        assert_eq!(log.borrow().iter().filter(|e| *e == "start").count(), 1);

        a.deactivate();
        assert!(gazeable.is_gazed_at());
        assert_eq!(log.borrow().iter().filter(|e| *e == "end").count(), 0);

        b.deactivate();
        assert!(!gazeable.is_gazed_at());
        assert_eq!(log.borrow().iter().filter(|e| *e == "end").count(), 1);
    }

    #[test]
    fn test_reactivation_is_silent() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);
        let gazer = gazeable.start_gazer();
        let before = log.borrow().len();

        gazer.activate();
        assert!(gazer.is_active());
        assert_eq!(gazeable.active_count(), 1);
        assert_eq!(log.borrow().len(), before);
    }

    #[test]
    fn test_double_deactivate_single_end() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);
        let gazer = gazeable.start_gazer();

        gazer.deactivate();
        gazer.deactivate();
        assert_eq!(log.borrow().iter().filter(|e| *e == "end").count(), 1);
    }

    #[test]
    fn test_deactivating_inactive_gazer_does_not_disturb_others() {
        let gazeable = Gazeable::new();
        let active = gazeable.start_gazer();
        let idle = gazeable.create_gazer();

        idle.deactivate();
        assert!(active.is_active());
        assert!(gazeable.is_gazed_at());
        assert_eq!(gazeable.active_count(), 1);
    }

    #[test]
    fn test_start_keyed_reuses_gazer() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);

        gazeable.start_keyed("k");
        let first = gazeable.keyed_gazer(&"k".into());
        gazeable.start_keyed("k");

        assert_eq!(gazeable.keyed_count(), 1);
        assert_eq!(gazeable.active_count(), 1);
        assert_eq!(gazeable.keyed_gazer(&"k".into()), first);
        assert_eq!(log.borrow().iter().filter(|e| *e == "start").count(), 1);
    }

    #[test]
    fn test_end_keyed_unknown_is_noop() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);
        gazeable.end_keyed("nobody");
        assert_eq!(gazeable.keyed_count(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_end_keyed_keeps_registration() {
        let gazeable = Gazeable::new();
        gazeable.start_keyed("k");
        gazeable.end_keyed("k");
        assert!(!gazeable.is_gazed_at());
        assert_eq!(gazeable.keyed_count(), 1);
    }

    #[test]
    fn test_toggle_keyed() {
        let gazeable = Gazeable::new();

        gazeable.toggle_keyed("k");
        assert!(gazeable.is_gazed_at());
        assert_eq!(gazeable.keyed_count(), 1);

        gazeable.toggle_keyed("k");
        assert!(!gazeable.is_gazed_at());

        gazeable.toggle_keyed("k");
        assert!(gazeable.is_gazed_at());
        assert_eq!(gazeable.keyed_count(), 1);
    }

    #[test]
    fn test_keyed_owners_are_independent() {
        let gazeable = Gazeable::new();
        let owner = EntityId::from_raw(7);
        gazeable.start_keyed("k");
        gazeable.start_keyed(owner);
        assert_eq!(gazeable.active_count(), 2);

        gazeable.end_keyed("k");
        assert!(gazeable.is_gazed_at());
        gazeable.end_keyed(owner);
        assert!(!gazeable.is_gazed_at());
    }

    #[test]
    fn test_unsubscribe() {
        let gazeable = Gazeable::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let subscription = gazeable.on_start(move |_| h.set(h.get() + 1));

        assert!(gazeable.unsubscribe(subscription));
        assert!(!gazeable.unsubscribe(subscription));

        gazeable.start_gazer();
        assert_eq!(hits.get(), 0);
        assert_eq!(gazeable.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_reenter() {
        let gazeable = Gazeable::new();
        gazeable.on_start(|g| g.start_keyed("echo"));

        let gazer = gazeable.start_gazer();
        assert_eq!(gazeable.active_count(), 2);

        gazer.deactivate();
        assert!(gazeable.is_gazed_at());
    }

    #[test]
    fn test_reentrant_end_leaves_flag_in_sync() {
        let gazeable = Gazeable::new();
        let log = record(&gazeable);
        gazeable.on_start(|g| g.end_keyed("k"));

        gazeable.start_keyed("k");
        assert!(!gazeable.is_gazed_at());
        assert_eq!(gazeable.debug_flag(), gazeable.is_gazed_at());
        assert!(!gazeable.snapshot().gazed_at);
        assert_eq!(log.borrow().iter().filter(|e| *e == "end").count(), 1);
    }

    #[test]
    fn test_listener_receives_aggregate() {
        let gazeable = Gazeable::new();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        gazeable.on_start(move |g| *s.borrow_mut() = Some(g.id()));

        gazeable.start_gazer();
        assert_eq!(*seen.borrow(), Some(gazeable.id()));
    }

    #[test]
    fn test_debug_flag_set_after_listeners() {
        let gazeable = Gazeable::new();
        let during = Rc::new(Cell::new(None));
        let d = Rc::clone(&during);
        gazeable.on_start(move |g| d.set(Some(g.debug_flag())));

        gazeable.start_gazer();
        assert_eq!(during.get(), Some(false));
        assert!(gazeable.debug_flag());
        assert!(gazeable.snapshot().gazed_at);
    }

    #[test]
    fn test_gazer_for_prefers_explicit() {
        use crate::scene::Scene;
        use crate::spatial::Transform;

        let mut scene = Scene::new();
        let root = scene.spawn("root", Transform::identity());
        let child = scene.spawn_child(root, "child", Transform::identity()).unwrap();
        let nested = scene.attach_gazeable(child).unwrap();
        let explicit = Gazeable::new();

        let gazer = Gazeable::gazer_for(Some(&explicit), &scene, root).unwrap();
        assert_eq!(gazer.gazeable(), Some(explicit));
        assert!(!gazer.is_active());

        let gazer = Gazeable::gazer_for(None, &scene, root).unwrap();
        assert_eq!(gazer.gazeable(), Some(nested));

        let lonely = scene.spawn("lonely", Transform::identity());
        assert!(Gazeable::gazer_for(None, &scene, lonely).is_none());
    }

    #[test]
    fn test_leaked_gazer_keeps_aggregate_on() {
        let gazeable = Gazeable::new();
        drop(gazeable.start_gazer());
        assert!(gazeable.is_gazed_at());
        assert_eq!(gazeable.active_count(), 1);
    }
}
