//! Strongly-typed ID newtypes for domain entities.
//!
//! Both snippets and users are keyed by positive `BIGSERIAL` integers. The
//! newtypes keep a `SnippetId` from being passed where a `UserId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_models::ids::SnippetId;
//!
//! let id = SnippetId::parse_positive("42").expect("valid id");
//! assert_eq!(id.get(), 42);
//! assert!(SnippetId::parse_positive("-1").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Parses a path segment, accepting only integers >= 1.
            pub fn parse_positive(raw: &str) -> Option<Self> {
                raw.parse::<i64>().ok().filter(|id| *id >= 1).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for snippets.
    SnippetId
);

define_id!(
    /// Strongly-typed ID for user accounts.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(SnippetId::parse_positive("1"), Some(SnippetId(1)));
        assert_eq!(SnippetId::parse_positive("9001"), Some(SnippetId(9001)));
    }

    #[test]
    fn test_parse_rejects_zero_negative_and_garbage() {
        for raw in ["0", "-1", "abc", "", "1.5", "99999999999999999999", " 1"] {
            assert!(SnippetId::parse_positive(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_id_debug_and_display() {
        let id = UserId::new(7);
        assert_eq!(format!("{:?}", id), "UserId(7)");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&UserId::new(12)).unwrap();
        assert_eq!(json, "12");
        let id: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }
}
