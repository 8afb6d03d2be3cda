//! crates/fw_core/src/ids.rs
//! Display-only identifiers carried through from the feeds.
//! No shape validation: the feeds own these values and we only echo them.

use core::fmt;

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self { Self(value.to_owned()) }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self { Self(value) }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }
    }
}

simple_string_newtype!(
    /// Unique Identifying Number assigned to a tabled question.
    Uin
);
simple_string_newtype!(
    /// Answering-body key as it appears in the question feed (e.g. "Department of Health and Social Care").
    BodyCode
);
