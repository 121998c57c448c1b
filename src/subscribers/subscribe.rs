//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging side effects (notification
//! senders, queue updaters, analytics) into a [`Dispatcher`](crate::Dispatcher).
//!
//! ## Contract
//! - Exactly one input: a shared reference to the event.
//! - Exactly one outcome: `Result<(), SubscriberError>`.
//! - Runs on the publisher's thread; return promptly and move slow work elsewhere.
//! - Report failures by returning `Err`; a panic is not caught and unwinds
//!   through `publish`.
//!
//! ## Rejected shapes
//! The three shape rules are checked when the program is compiled, so an
//! ill-formed subscriber can never be registered.
//!
//! Wrong arity (no argument):
//! ```compile_fail
//! use evdispatch::{impl_event, Dispatcher, SubscriberError};
//! struct Msg { id: u64 }
//! impl_event!(Msg);
//!
//! let d = Dispatcher::new();
//! d.subscribe::<Msg, _>(|| -> Result<(), SubscriberError> { Ok(()) });
//! ```
//!
//! Wrong arity (two arguments):
//! ```compile_fail
//! use evdispatch::{impl_event, Dispatcher, SubscriberError};
//! struct Msg { id: u64 }
//! impl_event!(Msg);
//!
//! let d = Dispatcher::new();
//! d.subscribe(|_a: &Msg, _b: &Msg| -> Result<(), SubscriberError> { Ok(()) });
//! ```
//!
//! Non-record argument:
//! ```compile_fail
//! use evdispatch::{Dispatcher, SubscriberError};
//!
//! let d = Dispatcher::new();
//! d.subscribe(|_ids: &Vec<u64>| -> Result<(), SubscriberError> { Ok(()) });
//! ```
//!
//! No outcome:
//! ```compile_fail
//! use evdispatch::{impl_event, Dispatcher};
//! struct Msg { id: u64 }
//! impl_event!(Msg);
//!
//! let d = Dispatcher::new();
//! d.subscribe(|_e: &Msg| {});
//! ```

use std::sync::Arc;

use crate::error::SubscriberError;
use crate::events::Event;

/// Contract for subscribers of events of type `E`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot subscribe to `{E}`",
    label = "a subscriber takes one `&{E}` and returns `Result<(), SubscriberError>`"
)]
pub trait Subscribe<E: Event>: Send + Sync + 'static {
    /// Handle a single event.
    ///
    /// # Parameters
    /// - `event`: Reference to the payload (owned by the publisher)
    fn on_event(&self, event: &E) -> Result<(), SubscriberError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a subscriber of `E`.
pub type SubscriberRef<E> = Arc<dyn Subscribe<E>>;
