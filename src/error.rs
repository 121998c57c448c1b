//! Error types used by the dispatcher and its subscribers.
//!
//! This module defines two types:
//!
//! - [`SubscriberError`] — the failure value a single subscriber reports.
//! - [`DispatchError`] — the aggregate of every failure reported during one publish.
//!
//! `DispatchError` renders deterministically, log consumers match on it:
//!
//! ```text
//! dispatch: a          (one failure)
//! dispatch: a,c        (several failures, invocation order)
//! ```

use std::fmt;

use thiserror::Error;

/// Failure value reported by a subscriber.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?` or `.into()`,
/// and so do `&str` and `String`.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Aggregated publish failure.
///
/// Holds one or more [`SubscriberError`]s in the order the failing subscribers
/// were invoked. It never holds a success and is never empty.
///
/// # Example
/// ```
/// use evdispatch::{DispatchError, SubscriberError};
///
/// let errs: Vec<SubscriberError> = vec!["a".into(), "c".into()];
/// let err = DispatchError::from_errors(errs).unwrap();
/// assert_eq!(err.to_string(), "dispatch: a,c");
/// assert_eq!(err.len(), 2);
/// ```
#[derive(Error)]
#[error("dispatch: {}", render(.errors))]
pub struct DispatchError {
    errors: Vec<SubscriberError>,
}

fn render(errors: &[SubscriberError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl DispatchError {
    /// Wraps the collected failures; `None` when there are none.
    pub fn from_errors(errors: Vec<SubscriberError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Failures in invocation order.
    pub fn errors(&self) -> &[SubscriberError] {
        &self.errors
    }

    /// Consumes the aggregate and returns the failures in invocation order.
    pub fn into_errors(self) -> Vec<SubscriberError> {
        self.errors
    }

    /// Number of failed subscribers (always `>= 1`).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evdispatch::DispatchError;
    ///
    /// let err = DispatchError::from_errors(vec!["boom".into()]).unwrap();
    /// assert_eq!(err.as_label(), "dispatch_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        "dispatch_failed"
    }

    /// Returns a human-readable message with the failure count.
    pub fn as_message(&self) -> String {
        format!("{} subscriber(s) failed: {}", self.errors.len(), render(&self.errors))
    }
}

// Hand-written so that `{:?}` shows the members rather than the boxed type noise.
impl fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.errors.iter().map(|e| e.to_string()))
            .finish()
    }
}

impl<'a> IntoIterator for &'a DispatchError {
    type Item = &'a SubscriberError;
    type IntoIter = std::slice::Iter<'a, SubscriberError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for DispatchError {
    type Item = SubscriberError;
    type IntoIter = std::vec::IntoIter<SubscriberError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("visit {0} not found")]
    struct NotFound(u64);

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(DispatchError::from_errors(Vec::new()).is_none());
    }

    #[test]
    fn test_single_failure_has_no_trailing_comma() {
        let err = DispatchError::from_errors(vec!["a".into()]).unwrap();
        assert_eq!(err.to_string(), "dispatch: a");
    }

    #[test]
    fn test_multiple_failures_comma_joined_in_order() {
        let err =
            DispatchError::from_errors(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(err.to_string(), "dispatch: a,b,c");
        assert_eq!(err.as_message(), "3 subscriber(s) failed: a,b,c");
    }

    #[test]
    fn test_members_are_preserved_verbatim() {
        let errs: Vec<SubscriberError> = vec![Box::new(NotFound(7)) as SubscriberError, "plain".into()];
        let err = DispatchError::from_errors(errs).unwrap();

        let first = &err.errors()[0];
        assert_eq!(first.downcast_ref::<NotFound>().map(|e| e.0), Some(7));

        let rendered: Vec<String> = err.into_iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered, vec!["visit 7 not found", "plain"]);
    }

    #[test]
    fn test_debug_lists_members() {
        let err = DispatchError::from_errors(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(format!("{err:?}"), r#"["x", "y"]"#);
    }
}
