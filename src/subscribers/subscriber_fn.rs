//! # Function-backed subscriber (`SubscriberFn`)
//!
//! [`SubscriberFn`] wraps a closure `F: Fn(&E) -> Result<(), SubscriberError>`
//! and gives it a name. [`Dispatcher::subscribe`](crate::Dispatcher::subscribe)
//! uses it under the hood; build one yourself when you want a readable name in
//! logs.
//!
//! ## Example
//! ```rust
//! use evdispatch::{impl_event, Dispatcher, Subscribe, SubscriberError, SubscriberFn};
//!
//! struct PostCreated { thread_id: u64 }
//! impl_event!(PostCreated);
//!
//! let notify = SubscriberFn::arc("notify-care-team", |ev: &PostCreated| {
//!     let _ = ev.thread_id;
//!     Ok::<_, SubscriberError>(())
//! });
//! assert_eq!(Subscribe::<PostCreated>::name(notify.as_ref()), "notify-care-team");
//!
//! let d = Dispatcher::new();
//! d.subscribe_ref::<PostCreated>(notify);
//! assert_eq!(d.subscriber_count::<PostCreated>(), 1);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::SubscriberError;
use crate::events::Event;
use crate::subscribers::Subscribe;

/// Function-backed subscriber implementation.
pub struct SubscriberFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> SubscriberFn<F> {
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscriberFn::arc`] when you immediately register it.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<E, F> Subscribe<E> for SubscriberFn<F>
where
    E: Event,
    F: Fn(&E) -> Result<(), SubscriberError> + Send + Sync + 'static,
{
    fn on_event(&self, event: &E) -> Result<(), SubscriberError> {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for SubscriberFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberFn").field("name", &self.name).finish()
    }
}
