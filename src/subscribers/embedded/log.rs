//! # LogWriter — event tracer
//!
//! A minimal subscriber that records incoming events through `tracing` at
//! debug level. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! DEBUG evdispatch::subscribers::embedded::log: event published event="visit_events::VisitSubmitted" payload=VisitSubmitted { visit_id: 10 }
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use evdispatch::{impl_event, Dispatcher, LogWriter};
//!
//! #[derive(Debug)]
//! struct VisitSubmitted { visit_id: u64 }
//! impl_event!(VisitSubmitted);
//!
//! let d = Dispatcher::new();
//! d.subscribe_ref::<VisitSubmitted>(Arc::new(LogWriter::new()));
//! assert!(d.publish(&VisitSubmitted { visit_id: 10 }).is_ok());
//! ```

use std::any::type_name;
use std::fmt::Debug;

use crate::error::SubscriberError;
use crate::events::Event;
use crate::subscribers::Subscribe;

/// Event tracing subscriber; never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<E: Event + Debug> Subscribe<E> for LogWriter {
    fn on_event(&self, e: &E) -> Result<(), SubscriberError> {
        tracing::debug!(event = type_name::<E>(), payload = ?e, "event published");
        Ok(())
    }

    fn name(&self) -> &str {
        "LogWriter"
    }
}
