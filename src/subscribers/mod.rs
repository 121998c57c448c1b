//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the closure adapter
//! [`SubscriberFn`] and (behind the `logging` feature) a built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Dispatcher::publish(&ev)
//!     │
//!     ├──► snapshot = registry[TypeKey::of::<E>()]
//!     │
//!     ├──► sub1.on_event(&ev) ──► Ok / Err(e1)
//!     ├──► sub2.on_event(&ev) ──► Ok / Err(e2)      (sequential, caller's thread)
//!     └──► subN.on_event(&ev) ──► Ok / Err(eN)
//!                 │
//!                 └──► DispatchError[e1, e2, ...]  (only the failures, in order)
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use std::sync::Arc;
//! use evdispatch::{impl_event, Dispatcher, Subscribe, SubscriberError};
//!
//! struct RefillRequested { patient_id: u64 }
//! impl_event!(RefillRequested);
//!
//! struct QueueUpdater;
//!
//! impl Subscribe<RefillRequested> for QueueUpdater {
//!     fn on_event(&self, ev: &RefillRequested) -> Result<(), SubscriberError> {
//!         if ev.patient_id == 0 {
//!             return Err("unknown patient".into());
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str { "queue-updater" }
//! }
//!
//! let d = Dispatcher::new();
//! d.subscribe_ref::<RefillRequested>(Arc::new(QueueUpdater));
//! assert!(d.publish(&RefillRequested { patient_id: 3 }).is_ok());
//! assert_eq!(d.publish(&RefillRequested { patient_id: 0 }).unwrap_err().to_string(),
//!            "dispatch: unknown patient");
//! ```

mod subscribe;
mod subscriber_fn;

#[cfg(feature = "logging")]
mod embedded;

pub use subscribe::{Subscribe, SubscriberRef};
pub use subscriber_fn::SubscriberFn;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
