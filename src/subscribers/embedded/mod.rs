//! # Built-in subscribers
//!
//! Small, self-contained implementations useful for demos and debugging.
//!
//! - [`LogWriter`]: records every event of a `Debug` type through `tracing`.

mod log;

pub use log::LogWriter;
