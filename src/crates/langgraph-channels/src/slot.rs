//! The value slot held by single-valued channels.
//!
//! A [`Slot`] is either [`Slot::Missing`] (nothing was ever stored) or
//! [`Slot::Value`]. `Missing` is its own variant rather than a reserved value
//! of `T`, so null-like values (`serde_json::Value::Null`, `Option::None`)
//! remain ordinary stored values.
//!
//! ```rust
//! use langgraph_channels::Slot;
//! use serde_json::{json, Value};
//!
//! let empty: Slot<Value> = Slot::MISSING;
//! let null = Slot::Value(json!(null));
//!
//! assert!(empty.is_missing());
//! assert!(!null.is_missing());
//! assert_ne!(empty, null);
//! ```

use serde::{Deserialize, Serialize};

/// Storage for at most one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot<T> {
    /// No value has ever been stored
    Missing,
    /// A stored value
    Value(T),
}

impl<T> Slot<T> {
    /// The "no value" sentinel.
    pub const MISSING: Self = Slot::Missing;

    pub fn is_missing(&self) -> bool {
        matches!(self, Slot::Missing)
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Borrow the stored value, if any.
    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Missing => Slot::Missing,
            Slot::Value(v) => Slot::Value(v),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Missing => None,
            Slot::Value(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Missing => None,
            Slot::Value(v) => Some(v),
        }
    }

    /// Take the value out, leaving `Missing` behind.
    pub fn take(&mut self) -> Slot<T> {
        std::mem::replace(self, Slot::Missing)
    }

    /// Store `value`, returning what was there before.
    pub fn replace(&mut self, value: T) -> Slot<T> {
        std::mem::replace(self, Slot::Value(value))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Slot<U> {
        match self {
            Slot::Missing => Slot::Missing,
            Slot::Value(v) => Slot::Value(f(v)),
        }
    }
}

// Manual impl: no `T: Default` bound.
impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Missing
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Slot::Value(v),
            None => Slot::Missing,
        }
    }
}

impl<T> From<Slot<T>> for Option<T> {
    fn from(slot: Slot<T>) -> Self {
        slot.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_is_default() {
        let slot: Slot<i32> = Slot::default();
        assert!(slot.is_missing());
        assert_eq!(slot, Slot::MISSING);
    }

    #[test]
    fn test_none_is_a_value() {
        let slot: Slot<Option<i32>> = Slot::Value(None);
        assert!(slot.is_present());
        assert_ne!(slot, Slot::MISSING);
        assert_eq!(slot.value(), Some(&None));
    }

    #[test]
    fn test_take_and_replace() {
        let mut slot = Slot::Value(3);
        assert_eq!(slot.replace(4), Slot::Value(3));
        assert_eq!(slot.take(), Slot::Value(4));
        assert!(slot.is_missing());
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(Slot::from(Some(1)), Slot::Value(1));
        assert_eq!(Slot::<i32>::from(None), Slot::Missing);
        let value: Option<&str> = Slot::Value("a").into();
        assert_eq!(value, Some("a"));
    }

    #[test]
    fn test_json_keeps_missing_and_null_apart() {
        let missing = serde_json::to_value(Slot::<serde_json::Value>::Missing).unwrap();
        let null = serde_json::to_value(Slot::Value(json!(null))).unwrap();
        assert_ne!(missing, null);

        let back: Slot<serde_json::Value> = serde_json::from_value(null).unwrap();
        assert_eq!(back, Slot::Value(json!(null)));
        let back: Slot<serde_json::Value> = serde_json::from_value(missing).unwrap();
        assert!(back.is_missing());
    }
}
