//! Reference-counted "being gazed at" state
//!
//! A [`Gazeable`] is a boolean that is on while at least one of its
//! contributor handles ([`Gazer`]) is active. Producers hold a handle each
//! and flip it on and off; the aggregate only notifies listeners when it
//! crosses between "nobody gazing" and "somebody gazing".
//!
//! # Invariants
//!
//! 1. A handle is in the active set iff it has been activated more recently
//!    than deactivated.
//! 2. `is_gazed_at()` is true iff the active set is non-empty.
//! 3. Listeners fire exactly once per 0→1 and 1→0 transition of the
//!    aggregate, never on re-affirmation.
//! 4. A keyed owner has at most one handle for the lifetime of the
//!    aggregate.
//!
//! Dropping an active [`Gazer`] does not deactivate it. Whoever owns a
//! handle is responsible for deactivating it on every exit path.

mod events;
mod gazeable;
mod gazer;

pub use events::Subscription;
pub use gazeable::{Gazeable, GazeableId, OwnerKey};
pub use gazer::{Gazer, GazerId, GazerSink};
