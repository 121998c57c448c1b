//! # Dispatcher configuration.
//!
//! Provides [`Config`], the settings a [`Dispatcher`](crate::Dispatcher) is built with,
//! and [`AsyncMode`], which decides how
//! [`Dispatcher::publish_async`](crate::Dispatcher::publish_async) runs.
//!
//! Config is used in two ways:
//! 1. **Direct construction**: `Dispatcher::with_config(config)`
//! 2. **Builder**: `Dispatcher::builder().with_name("api").inline().build()`

use std::borrow::Cow;

/// How background publishes are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsyncMode {
    /// Hand the publish to a worker and return immediately.
    ///
    /// Uses the current Tokio runtime's blocking pool when one is entered,
    /// a dedicated thread otherwise.
    #[default]
    Background,

    /// Run the publish on the caller's thread before returning.
    ///
    /// Meant for tests that assert on subscriber side effects right after
    /// `publish_async` returns.
    Inline,
}

/// Settings for a dispatcher instance.
///
/// ## Field semantics
/// - `name`: label attached to every log record of this instance
/// - `async_mode`: execution strategy of `publish_async`
#[derive(Clone, Debug)]
pub struct Config {
    /// Label used in logs to tell dispatcher instances apart.
    pub name: Cow<'static, str>,

    /// Execution strategy for [`Dispatcher::publish_async`](crate::Dispatcher::publish_async).
    pub async_mode: AsyncMode,
}

impl Config {
    /// Returns `true` when `publish_async` runs on the caller's thread.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.async_mode == AsyncMode::Inline
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "default"`
    /// - `async_mode = AsyncMode::Background`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("default"),
            async_mode: AsyncMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_background() {
        let cfg = Config::default();
        assert_eq!(cfg.name, "default");
        assert_eq!(cfg.async_mode, AsyncMode::Background);
        assert!(!cfg.is_inline());
    }
}
