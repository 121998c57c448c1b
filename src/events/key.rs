//! # Type keys.
//!
//! [`TypeKey`] is the registry's routing key: the identity of a payload's
//! declared static type. Equal keys mean identical types; nothing is coerced
//! or widened.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Event;

/// Opaque, copyable handle identifying an event type.
///
/// Equality and hashing use the [`TypeId`] only; the type name is carried for
/// logs and diagnostics.
///
/// # Example
/// ```
/// use evdispatch::{impl_event, TypeKey};
///
/// struct A { id: u64 }
/// struct B { id: u64 }
/// impl_event!(A, B);
///
/// assert_eq!(TypeKey::of::<A>(), TypeKey::of::<A>());
/// assert_ne!(TypeKey::of::<A>(), TypeKey::of::<B>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of the event type `E`.
    #[inline]
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// Fully qualified type name (diagnostic only, not guaranteed stable).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Msg {
        _id: u64,
    }
    struct LookAlike {
        _id: u64,
    }
    crate::impl_event!(Msg, LookAlike);

    #[test]
    fn test_structurally_equal_types_have_distinct_keys() {
        assert_ne!(TypeKey::of::<Msg>(), TypeKey::of::<LookAlike>());
    }

    #[test]
    fn test_key_is_stable_across_calls() {
        let mut set = HashSet::new();
        set.insert(TypeKey::of::<Msg>());
        set.insert(TypeKey::of::<Msg>());
        set.insert(TypeKey::of::<LookAlike>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_name_and_display() {
        let key = TypeKey::of::<Msg>();
        assert!(key.name().ends_with("Msg"));
        assert_eq!(key.to_string(), key.name());
    }
}
