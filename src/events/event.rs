//! # Event payload contract.
//!
//! An event is an immutable record describing something that happened. Payloads
//! are routed by their **declared static type**: a subscriber registered for
//! `VisitSubmitted` only sees `VisitSubmitted` values, never values of another
//! struct with the same fields.
//!
//! ## Record-only payloads
//! [`Event`] is implemented by hand (or with [`impl_event!`](crate::impl_event)) for
//! local struct types. Outside this crate the orphan rule forbids implementing it for
//! primitives, collections, `Option`, tuples or references, so a subscriber taking one
//! of those is rejected when the program is compiled:
//!
//! ```compile_fail
//! use evdispatch::{Dispatcher, SubscriberError};
//!
//! let d = Dispatcher::new();
//! // scalar argument: `u64` is not an `Event`
//! d.subscribe(|_id: &u64| -> Result<(), SubscriberError> { Ok(()) });
//! ```
//!
//! ## Example
//! ```rust
//! use evdispatch::{impl_event, Event};
//!
//! #[derive(Debug, Clone)]
//! struct VisitSubmitted {
//!     visit_id: u64,
//! }
//!
//! #[derive(Debug, Clone)]
//! struct RefillRequested {
//!     patient_id: u64,
//! }
//!
//! impl_event!(VisitSubmitted, RefillRequested);
//!
//! fn assert_event<E: Event>() {}
//! assert_event::<VisitSubmitted>();
//! assert_event::<RefillRequested>();
//! ```

use std::any::Any;

/// Marker trait for record payloads that can be published.
///
/// `Any` gives every payload a stable runtime type identity; `Send + Sync`
/// allow payloads to be shared with subscribers on any thread and handed to
/// background publishes.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable event",
    label = "subscriber argument must be a record type implementing `Event`",
    note = "scalars, collections and unions cannot be published; wrap the data in a struct and add `impl Event for YourStruct {{}}`"
)]
pub trait Event: Any + Send + Sync {}

/// Implements [`Event`] for one or more local struct types.
///
/// ```rust
/// use evdispatch::impl_event;
///
/// struct CaseAssigned { case_id: u64 }
/// struct PaymentFailed;
///
/// impl_event!(CaseAssigned, PaymentFailed);
/// ```
#[macro_export]
macro_rules! impl_event {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::Event for $ty {})+
    };
}
