//! # Subscriber registry.
//!
//! Maps each [`TypeKey`] to the ordered sequence of subscribers registered for it.
//!
//! ## Architecture
//! ```text
//! subscribe ──► write lock ──► map[key] = old ++ [entry]   (new Arc<[Entry]>)
//! publish   ──► read lock  ──► clone Arc<[Entry]> ──► unlock ──► invoke
//! ```
//!
//! ## Rules
//! - Insertion order is delivery order; duplicates are kept.
//! - Sequences are copy-on-write: a snapshot taken by a publish never changes,
//!   even if a subscribe lands while it is being iterated.
//! - The lock is never held while a subscriber runs, so subscribers may
//!   subscribe or publish re-entrantly.
//! - Entries are never removed.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::events::{Event, TypeKey};
use crate::subscribers::{Subscribe, SubscriberRef};

/// Immutable view of one key's subscribers at a point in time.
pub(crate) type Snapshot = Arc<[Entry]>;

/// Type-erased registration.
///
/// `handler` always holds a `SubscriberRef<E>` for the `E` of the key it is
/// stored under.
#[derive(Clone)]
pub(crate) struct Entry {
    name: Arc<str>,
    handler: Arc<dyn Any + Send + Sync>,
}

impl Entry {
    pub(crate) fn new<E: Event>(sub: SubscriberRef<E>) -> Self {
        Self {
            name: Arc::from(sub.name()),
            handler: Arc::new(sub),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn downcast<E: Event>(&self) -> Option<&SubscriberRef<E>> {
        self.handler.downcast_ref::<SubscriberRef<E>>()
    }
}

/// Ordered, append-only registry of subscribers keyed by event type.
#[derive(Default)]
pub(crate) struct Registry {
    map: RwLock<HashMap<TypeKey, Snapshot>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` to the sequence for `key`; returns the new sequence length.
    pub(crate) fn append(&self, key: TypeKey, entry: Entry) -> usize {
        let mut map = self.map.write();
        let next: Snapshot = match map.get(&key) {
            Some(current) => current.iter().cloned().chain(Some(entry)).collect(),
            None => Arc::from(vec![entry]),
        };
        let len = next.len();
        map.insert(key, next);
        len
    }

    /// Subscribers for `key` in registration order (possibly empty).
    pub(crate) fn subscribers_for(&self, key: &TypeKey) -> Snapshot {
        self.map
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Number of registrations for `key`.
    pub(crate) fn len(&self, key: &TypeKey) -> usize {
        self.map.read().get(key).map_or(0, |s| s.len())
    }

    /// Keys that have at least one subscriber, in no particular order.
    pub(crate) fn keys(&self) -> Vec<TypeKey> {
        self.map.read().keys().copied().collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubscriberError;
    use crate::subscribers::SubscriberFn;

    struct A;
    struct B;
    crate::impl_event!(A, B);

    fn named(name: &'static str) -> Entry {
        Entry::new::<A>(SubscriberFn::arc(name, |_: &A| -> Result<(), SubscriberError> {
            Ok(())
        }))
    }

    fn names(snapshot: &Snapshot) -> Vec<String> {
        snapshot
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    #[test]
    fn test_empty_lookup() {
        let reg = Registry::new();
        assert!(reg.is_empty());
        assert!(reg.subscribers_for(&TypeKey::of::<A>()).is_empty());
        assert_eq!(reg.len(&TypeKey::of::<A>()), 0);
    }

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let reg = Registry::new();
        let key = TypeKey::of::<A>();
        assert_eq!(reg.append(key, named("s1")), 1);
        assert_eq!(reg.append(key, named("s2")), 2);
        assert_eq!(reg.append(key, named("s1")), 3);

        assert_eq!(names(&reg.subscribers_for(&key)), vec!["s1", "s2", "s1"]);
        assert_eq!(reg.keys(), vec![key]);
        assert_eq!(reg.len(&TypeKey::of::<B>()), 0);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_append() {
        let reg = Registry::new();
        let key = TypeKey::of::<A>();
        reg.append(key, named("s1"));

        let before = reg.subscribers_for(&key);
        reg.append(key, named("s2"));

        assert_eq!(names(&before), vec!["s1"]);
        assert_eq!(names(&reg.subscribers_for(&key)), vec!["s1", "s2"]);
    }

    #[test]
    fn test_downcast_to_other_type_fails() {
        let entry = named("s1");
        assert_eq!(entry.downcast::<A>().map(|s| s.name().to_string()), Some("s1".to_string()));
        assert!(entry.downcast::<B>().is_none());
    }
}
