//! # evdispatch
//!
//! **evdispatch** is an in-process, typed publish/subscribe dispatcher.
//!
//! Publishers emit plain record values; subscribers register for one payload
//! type and are invoked synchronously, in registration order, every time a
//! value of exactly that type is published. Subscriber failures never stop the
//! fan-out; they are collected and returned to the publisher as one
//! [`DispatchError`].
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │  Publisher   │   │  Publisher   │   │  Publisher   │
//!   │ (visit svc)  │   │ (refill svc) │   │ (messaging)  │
//!   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!          │ publish(&VisitSubmitted)            │ publish_async(PostCreated)
//!          ▼                  ▼                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                     │
//! │  - Registry: TypeKey ──► [sub1, sub2, ...]  (RwLock, COW)       │
//! │  - Config:   name, AsyncMode                                    │
//! └──────┬──────────────────┬──────────────────┬────────────────────┘
//!        ▼                  ▼                  ▼
//!   sub1.on_event()    sub2.on_event()    subN.on_event()    (in order)
//!        │                  │                  │
//!        └──── Err(e) ──────┴──── Err(e) ──────┘
//!                           ▼
//!            DispatchError: "dispatch: e1,e2"
//! ```
//!
//! ### Publish lifecycle
//! ```text
//! publish(&ev)
//!   ├─► key = TypeKey::of::<E>()
//!   ├─► snapshot subscribers for key (shared lock, released)
//!   ├─► call each subscriber; keep going after failures
//!   └─► Ok(()) or Err(DispatchError[failures in order])
//!
//! publish_async(ev)
//!   ├─► snapshot subscribers for key
//!   ├─► AsyncMode::Inline     ─► publish now, log failure
//!   └─► AsyncMode::Background ─► tokio blocking pool | std thread, log failure
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                       |
//! |-------------------|----------------------------------------------------------|------------------------------------------|
//! | **Events**        | Record payloads and their type keys.                     | [`Event`], [`TypeKey`], [`impl_event!`]  |
//! | **Subscriber API**| Closures or trait objects receiving one event type.      | [`Subscribe`], [`SubscriberFn`]          |
//! | **Dispatch**      | Synchronous ordered fan-out, background publish.         | [`Dispatcher`], [`global`]               |
//! | **Errors**        | Per-subscriber failures and their aggregate.             | [`SubscriberError`], [`DispatchError`]   |
//! | **Configuration** | Instance name and background publish mode.               | [`Config`], [`AsyncMode`]                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use evdispatch::{impl_event, Dispatcher, SubscriberError};
//!
//! #[derive(Debug, Clone)]
//! struct VisitSubmitted {
//!     visit_id: u64,
//!     patient_id: u64,
//! }
//! impl_event!(VisitSubmitted);
//!
//! let dispatcher = Dispatcher::new();
//!
//! dispatcher.subscribe(|ev: &VisitSubmitted| -> Result<(), SubscriberError> {
//!     println!("queue visit {} for review", ev.visit_id);
//!     Ok(())
//! });
//! dispatcher.subscribe(|ev: &VisitSubmitted| -> Result<(), SubscriberError> {
//!     Err(format!("no email on file for patient {}", ev.patient_id).into())
//! });
//!
//! let err = dispatcher
//!     .publish(&VisitSubmitted { visit_id: 10, patient_id: 3 })
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "dispatch: no email on file for patient 3");
//! ```
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use self::core::{global, AsyncMode, Config, Dispatcher, DispatcherBuilder};
pub use error::{DispatchError, SubscriberError};
pub use events::{Event, TypeKey};
pub use subscribers::{Subscribe, SubscriberFn, SubscriberRef};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
