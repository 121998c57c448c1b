//! # Dispatcher: subscribe and publish.
//!
//! [`Dispatcher`] owns the subscriber registry and implements the publish algorithm.
//!
//! ## Publish
//! ```text
//! publish(&ev)
//!   ├─► key = TypeKey::of::<E>()          (declared static type, never widened)
//!   ├─► snapshot = registry[key]           (read lock, released immediately)
//!   ├─► for sub in snapshot:               (registration order, caller's thread)
//!   │       sub.on_event(&ev) ─► Err(e) ─► errors.push(e)   (no short-circuit)
//!   └─► errors.is_empty() ? Ok(()) : Err(DispatchError(errors))
//! ```
//!
//! ## Rules
//! - Every subscriber registered when the publish began runs exactly once.
//! - A publish in flight may or may not observe a concurrent subscribe.
//! - Subscriber panics are not caught.
//! - No retries, timeouts or cancellation.

use std::any::type_name;

use super::builder::DispatcherBuilder;
use super::registry::{Entry, Registry};
use super::Config;
use crate::error::{DispatchError, SubscriberError};
use crate::events::{Event, TypeKey};
use crate::subscribers::{Subscribe, SubscriberFn, SubscriberRef};

/// In-process typed event dispatcher.
///
/// Routes each published payload to the subscribers registered for its exact
/// type and aggregates their failures.
///
/// # Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use evdispatch::{impl_event, Dispatcher, SubscriberError};
///
/// struct Msg { id: u64 }
/// impl_event!(Msg);
///
/// let d = Dispatcher::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let log = Arc::clone(&seen);
/// d.subscribe(move |m: &Msg| -> Result<(), SubscriberError> {
///     log.lock().unwrap().push(m.id);
///     Ok(())
/// });
/// d.subscribe(|m: &Msg| -> Result<(), SubscriberError> {
///     Err(format!("rejected {}", m.id).into())
/// });
///
/// let err = d.publish(&Msg { id: 7 }).unwrap_err();
/// assert_eq!(err.to_string(), "dispatch: rejected 7");
/// assert_eq!(*seen.lock().unwrap(), vec![7]);
/// ```
pub struct Dispatcher {
    cfg: Config,
    registry: Registry,
}

impl Dispatcher {
    /// Creates an empty dispatcher with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty dispatcher with the given configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            registry: Registry::new(),
        }
    }

    /// Returns a builder starting from the default configuration.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Configuration this instance was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Registers a closure for events of type `E`.
    ///
    /// `E` is taken from the closure's argument type. Registering the same
    /// logic twice delivers it twice.
    pub fn subscribe<E, F>(&self, f: F)
    where
        E: Event,
        F: Fn(&E) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        self.subscribe_ref::<E>(SubscriberFn::arc(type_name::<F>(), f));
    }

    /// Registers a closure that takes the event by value.
    ///
    /// The payload is cloned for this subscriber; it shares the key of `E`
    /// with by-reference subscribers and runs in the same ordered sequence.
    pub fn subscribe_owned<E, F>(&self, f: F)
    where
        E: Event + Clone,
        F: Fn(E) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        let sub = SubscriberFn::arc(type_name::<F>(), move |ev: &E| f(ev.clone()));
        self.subscribe_ref::<E>(sub);
    }

    /// Registers a shared subscriber for events of type `E`.
    pub fn subscribe_ref<E: Event>(&self, sub: SubscriberRef<E>) {
        let key = TypeKey::of::<E>();
        let entry = Entry::new(sub);
        let subscriber = entry.name().to_string();
        let total = self.registry.append(key, entry);
        tracing::debug!(
            dispatcher = %self.cfg.name,
            event = key.name(),
            subscriber = %subscriber,
            total,
            "subscriber registered"
        );
    }

    /// Publishes `event` to every subscriber of its type and waits for all of them.
    ///
    /// Returns `Ok(())` when nobody is subscribed or every subscriber succeeded,
    /// otherwise a [`DispatchError`] holding the failures in invocation order.
    pub fn publish<E: Event>(&self, event: &E) -> Result<(), DispatchError> {
        let key = TypeKey::of::<E>();
        let snapshot = self.registry.subscribers_for(&key);
        tracing::trace!(
            dispatcher = %self.cfg.name,
            event = key.name(),
            subscribers = snapshot.len(),
            "publish"
        );
        deliver(key, &snapshot, event)
    }

    /// Publishes `event` without waiting for subscribers.
    ///
    /// The subscriber set is captured before returning. Failures are logged at
    /// error level since there is no caller left to return them to. With
    /// [`AsyncMode::Inline`](crate::AsyncMode::Inline) the publish completes
    /// before this returns.
    pub fn publish_async<E: Event>(&self, event: E) {
        let key = TypeKey::of::<E>();
        let snapshot = self.registry.subscribers_for(&key);
        if snapshot.is_empty() {
            return;
        }

        let name = self.cfg.name.clone();
        let job = move || {
            if let Err(err) = deliver(key, &snapshot, &event) {
                tracing::error!(
                    dispatcher = %name,
                    event = key.name(),
                    label = err.as_label(),
                    error = %err,
                    "background publish failed"
                );
            }
        };

        if self.cfg.is_inline() {
            job();
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                let spawned = std::thread::Builder::new()
                    .name("evdispatch-publish".into())
                    .spawn(job);
                if let Err(err) = spawned {
                    tracing::error!(
                        dispatcher = %self.cfg.name,
                        event = key.name(),
                        error = %err,
                        "failed to spawn background publish"
                    );
                }
            }
        }
    }

    /// Number of registrations for events of type `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.registry.len(&TypeKey::of::<E>())
    }

    /// Returns `true` if at least one subscriber is registered for `E`.
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.subscriber_count::<E>() > 0
    }

    /// Names of the subscribers registered under `key`, in delivery order.
    pub fn subscribers_for(&self, key: &TypeKey) -> Vec<String> {
        self.registry
            .subscribers_for(key)
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    /// Event types with at least one subscriber, in no particular order.
    pub fn event_types(&self) -> Vec<TypeKey> {
        self.registry.keys()
    }

    /// Returns `true` if nothing has been subscribed yet.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.cfg.name)
            .field("async_mode", &self.cfg.async_mode)
            .field("event_types", &self.registry.keys())
            .finish()
    }
}

/// Runs `subscribers` in order against `event` and aggregates their failures.
fn deliver<E: Event>(key: TypeKey, subscribers: &[Entry], event: &E) -> Result<(), DispatchError> {
    let mut errors = Vec::new();

    for entry in subscribers {
        let Some(sub) = entry.downcast::<E>() else {
            unreachable!("registry entry under {key} holds a subscriber of another type");
        };
        if let Err(err) = sub.on_event(event) {
            tracing::debug!(
                event = key.name(),
                subscriber = sub.name(),
                error = %err,
                "subscriber failed"
            );
            errors.push(err);
        }
    }

    DispatchError::from_errors(errors).map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;
    use crate::AsyncMode;

    #[derive(Debug, Clone, Default)]
    struct Msg {
        id: u64,
    }

    #[derive(Debug, Clone, Default)]
    struct A {
        id: u64,
    }

    #[derive(Debug, Clone, Default)]
    struct B {
        id: u64,
    }

    crate::impl_event!(Msg, A, B);

    fn counter<E: Event>(d: &Dispatcher) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        d.subscribe(move |_: &E| -> Result<(), SubscriberError> {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        hits
    }

    #[test]
    fn test_publish_without_subscribers_succeeds() {
        let d = Dispatcher::new();
        assert!(d.is_empty());
        assert!(d.publish(&Msg { id: 1 }).is_ok());
    }

    #[test]
    fn test_single_subscriber_receives_payload() {
        let d = Dispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        d.subscribe(move |m: &Msg| -> Result<(), SubscriberError> {
            s.lock().push(m.id);
            Ok(())
        });

        assert!(d.publish(&Msg { id: 7 }).is_ok());
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn test_fan_out_in_registration_order() {
        let d = Dispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 1..=3 {
            let l = Arc::clone(&log);
            d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
                l.lock().push(i);
                Ok(())
            });
        }

        assert!(d.publish(&Msg::default()).is_ok());
        assert_eq!(*log.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_partial_failure_is_aggregated_without_short_circuit() {
        let d = Dispatcher::new();
        let ran = Arc::new(Mutex::new(Vec::new()));

        let r = Arc::clone(&ran);
        d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
            r.lock().push("s1");
            Err("a".into())
        });
        let r = Arc::clone(&ran);
        d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
            r.lock().push("s2");
            Ok(())
        });
        let r = Arc::clone(&ran);
        d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
            r.lock().push("s3");
            Err("c".into())
        });

        let err = d.publish(&Msg::default()).unwrap_err();
        assert_eq!(err.to_string(), "dispatch: a,c");
        assert_eq!(err.len(), 2);
        assert_eq!(*ran.lock(), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_every_subscriber_failing() {
        let d = Dispatcher::new();
        for tag in ["x", "y", "z"] {
            d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> { Err(tag.into()) });
        }

        let err = d.publish(&Msg::default()).unwrap_err();
        let rendered: Vec<String> = err.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered, vec!["x", "y", "z"]);
        assert_eq!(err.to_string(), "dispatch: x,y,z");
    }

    #[test]
    fn test_single_failure_renders_without_comma() {
        let d = Dispatcher::new();
        d.subscribe(|_: &Msg| -> Result<(), SubscriberError> { Err("only".into()) });
        assert_eq!(d.publish(&Msg::default()).unwrap_err().to_string(), "dispatch: only");
    }

    #[test]
    fn test_type_key_isolation() {
        let d = Dispatcher::new();
        let a_hits = counter::<A>(&d);
        let b_hits = counter::<B>(&d);

        assert!(d.publish(&A { id: 1 }).is_ok());
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
        assert_eq!(b_hits.load(Ordering::SeqCst), 0);

        assert!(d.publish(&B { id: 1 }).is_ok());
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);

        // structurally identical, still not delivered to `A` subscribers
        assert!(d.publish(&Msg { id: 1 }).is_ok());
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_registration_delivers_twice() {
        let d = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let sub = SubscriberFn::arc("dup", {
            let h = Arc::clone(&hits);
            move |_: &Msg| -> Result<(), SubscriberError> {
                h.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        d.subscribe_ref::<Msg>(sub.clone());
        d.subscribe_ref::<Msg>(sub);

        assert!(d.publish(&Msg::default()).is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(d.subscribers_for(&TypeKey::of::<Msg>()), vec!["dup", "dup"]);
    }

    #[test]
    fn test_publish_twice_invokes_twice() {
        let d = Dispatcher::new();
        let hits = counter::<Msg>(&d);
        d.publish(&Msg::default()).unwrap();
        d.publish(&Msg::default()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_owned_and_borrowed_subscribers_share_a_sequence() {
        let d = Dispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = Arc::clone(&log);
        d.subscribe(move |m: &Msg| -> Result<(), SubscriberError> {
            l.lock().push(format!("ref:{}", m.id));
            Ok(())
        });
        let l = Arc::clone(&log);
        d.subscribe_owned(move |m: Msg| -> Result<(), SubscriberError> {
            l.lock().push(format!("owned:{}", m.id));
            Ok(())
        });

        assert_eq!(d.subscriber_count::<Msg>(), 2);
        d.publish(&Msg { id: 4 }).unwrap();
        assert_eq!(*log.lock(), vec!["ref:4", "owned:4"]);
    }

    #[test]
    fn test_subscribe_during_publish_applies_to_next_publish() {
        let d = Arc::new(Dispatcher::new());
        let late_hits = Arc::new(AtomicUsize::new(0));

        let (d2, hits) = (Arc::clone(&d), Arc::clone(&late_hits));
        d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
            let h = Arc::clone(&hits);
            d2.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
                h.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            Ok(())
        });

        d.publish(&Msg::default()).unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 0);
        assert_eq!(d.subscriber_count::<Msg>(), 2);

        d.publish(&Msg::default()).unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_publish_from_subscriber() {
        let d = Arc::new(Dispatcher::new());
        let b_hits = counter::<B>(&d);

        let d2 = Arc::clone(&d);
        d.subscribe(move |a: &A| -> Result<(), SubscriberError> {
            d2.publish(&B { id: a.id })?;
            Ok(())
        });

        d.publish(&A { id: 9 }).unwrap();
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_failure_propagates_as_member() {
        let d = Arc::new(Dispatcher::new());
        d.subscribe(|_: &B| -> Result<(), SubscriberError> { Err("inner".into()) });

        let d2 = Arc::clone(&d);
        d.subscribe(move |a: &A| -> Result<(), SubscriberError> {
            d2.publish(&B { id: a.id })?;
            Ok(())
        });

        let err = d.publish(&A::default()).unwrap_err();
        assert_eq!(err.to_string(), "dispatch: dispatch: inner");
        assert!(err.errors()[0].downcast_ref::<DispatchError>().is_some());
    }

    #[test]
    fn test_panicking_subscriber_unwinds_and_registry_survives() {
        let d = Dispatcher::new();
        d.subscribe(|m: &Msg| -> Result<(), SubscriberError> {
            if m.id == 13 {
                panic!("unlucky");
            }
            Ok(())
        });

        let outcome = catch_unwind(AssertUnwindSafe(|| d.publish(&Msg { id: 13 })));
        assert!(outcome.is_err());

        assert!(d.publish(&Msg { id: 1 }).is_ok());
        assert_eq!(d.subscriber_count::<Msg>(), 1);
    }

    #[test]
    fn test_concurrent_subscribe_and_publish() {
        let d = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        let h = Arc::clone(&hits);
                        d.subscribe(move |_: &Msg| -> Result<(), SubscriberError> {
                            h.fetch_add(1, Ordering::SeqCst);
                            Ok(())
                        });
                        d.publish(&Msg::default()).unwrap();
                    }
                });
            }
        });

        assert_eq!(d.subscriber_count::<Msg>(), 400);

        hits.store(0, Ordering::SeqCst);
        d.publish(&Msg::default()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 400);
    }

    #[test]
    fn test_event_types_and_debug() {
        let d = Dispatcher::builder().with_name("api").build();
        counter::<A>(&d);
        assert!(d.has_subscribers::<A>());
        assert!(!d.has_subscribers::<B>());
        assert_eq!(d.event_types(), vec![TypeKey::of::<A>()]);
        assert!(format!("{d:?}").contains("\"api\""));
    }

    #[test]
    fn test_publish_async_inline_completes_before_return() {
        let d = Dispatcher::builder().inline().build();
        let hits = counter::<Msg>(&d);
        d.subscribe(|_: &Msg| -> Result<(), SubscriberError> { Err("logged only".into()) });

        d.publish_async(Msg::default());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_async_without_runtime_uses_thread() {
        let d = Dispatcher::new();
        assert_eq!(d.config().async_mode, AsyncMode::Background);

        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        d.subscribe(move |m: &Msg| -> Result<(), SubscriberError> {
            tx.lock().send(m.id)?;
            Ok(())
        });

        d.publish_async(Msg { id: 42 });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_publish_async_on_runtime() {
        let d = Dispatcher::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        d.subscribe(move |m: &Msg| -> Result<(), SubscriberError> {
            tx.send(m.id)?;
            Ok(())
        });

        d.publish_async(Msg { id: 5 });
        let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(got, Some(5));
    }

    #[test]
    fn test_publish_async_without_subscribers_is_noop() {
        let d = Dispatcher::new();
        d.publish_async(Msg::default());
    }
}
