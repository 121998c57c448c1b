use std::borrow::Cow;

use super::{config::AsyncMode, dispatcher::Dispatcher, Config};

/// Builder for constructing a [`Dispatcher`] with non-default settings.
///
/// ```rust
/// use evdispatch::{AsyncMode, Dispatcher};
///
/// let d = Dispatcher::builder()
///     .with_name("regimens-api")
///     .inline()
///     .build();
/// assert_eq!(d.config().name, "regimens-api");
/// assert_eq!(d.config().async_mode, AsyncMode::Inline);
/// ```
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    cfg: Config,
}

impl DispatcherBuilder {
    /// Creates a new builder starting from the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Sets the label used in logs.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Sets how `publish_async` executes.
    pub fn with_async_mode(mut self, mode: AsyncMode) -> Self {
        self.cfg.async_mode = mode;
        self
    }

    /// Shorthand for `with_async_mode(AsyncMode::Inline)`.
    pub fn inline(self) -> Self {
        self.with_async_mode(AsyncMode::Inline)
    }

    /// Builds an empty dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher::with_config(self.cfg)
    }
}
