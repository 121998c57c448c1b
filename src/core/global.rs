//! # Process-wide default dispatcher.
//!
//! Convenience instance for code that has no dispatcher handed to it.
//! Prefer passing a [`Dispatcher`] explicitly; tests should build their own
//! instance so registrations never leak between them.

use once_cell::sync::Lazy;

use super::{dispatcher::Dispatcher, Config};

static GLOBAL: Lazy<Dispatcher> = Lazy::new(|| {
    Dispatcher::with_config(Config {
        name: "global".into(),
        ..Config::default()
    })
});

/// Returns the process-wide dispatcher, creating it on first use.
///
/// ```rust
/// use evdispatch::{global, impl_event, SubscriberError};
///
/// struct AppStarted;
/// impl_event!(AppStarted);
///
/// global().subscribe(|_: &AppStarted| -> Result<(), SubscriberError> { Ok(()) });
/// assert!(global().publish(&AppStarted).is_ok());
/// assert!(std::ptr::eq(global(), global()));
/// ```
pub fn global() -> &'static Dispatcher {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_a_singleton() {
        assert!(std::ptr::eq(global(), global()));
        assert_eq!(global().config().name, "global");
    }
}
