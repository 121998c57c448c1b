//! Event payload contract and type keys.
//!
//! This module groups the **payload contract** every published value satisfies
//! and the **key** the registry uses to route payloads to subscribers.
//!
//! ## Contents
//! - [`Event`] marker trait for record payloads, plus [`impl_event!`](crate::impl_event)
//! - [`TypeKey`] opaque identity of a payload's declared static type
//!
//! ## Quick reference
//! - **Publishers**: services emitting facts (`VisitSubmitted`, `RefillRequested`, ...)
//!   call [`Dispatcher::publish`](crate::Dispatcher::publish).
//! - **Consumers**: side-effect modules (notifications, queues, analytics) register
//!   with [`Dispatcher::subscribe`](crate::Dispatcher::subscribe).

mod event;
mod key;

pub use event::Event;
pub use key::TypeKey;
