//! Dispatcher core: registry, publish algorithm and configuration.
//!
//! The public API from this module is [`Dispatcher`], its [`Config`] and
//! builder, and the process-wide [`global`] instance.
//!
//! Internal modules:
//! - [`registry`]: ordered, copy-on-write subscriber sequences per event type;
//! - [`dispatcher`]: subscribe/publish, aggregation of subscriber failures;
//! - [`builder`]: fluent construction of configured instances;
//! - [`global`]: lazily created process-wide instance.

mod builder;
mod config;
mod dispatcher;
mod global;
mod registry;

pub use builder::DispatcherBuilder;
pub use config::{AsyncMode, Config};
pub use dispatcher::Dispatcher;
pub use global::global;
