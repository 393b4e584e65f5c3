//! JSONPath-style addressing into an output document.
//!
//! A path is an ordered descent through nested containers. It is encoded into
//! a single [`Address`] string:
//!
//! ```
//! use airplane_output::{encode_path, path};
//!
//! assert_eq!(encode_path(&path!["foo", 0, "bar"]).as_str(), "foo[0].bar");
//! assert_eq!(encode_path(&path!["a", "hello world"]).as_str(), r#"a["hello world"]"#);
//! ```
//!
//! Keys made only of ASCII word characters are written with a dot. Every
//! other key is written as a JSON string literal inside brackets, so brackets,
//! quotes and backslashes inside a key can never be confused with the
//! structure of the address.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{Error, Result};

/// Keys that can be written with dot notation.
///
/// ASCII classes are spelled out: `\w` in `regex` also matches non-ASCII letters.
static DOTTABLE_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").ok());

fn is_dottable(key: &str) -> bool {
    DOTTABLE_KEY.as_ref().is_some_and(|re| re.is_match(key))
}

// ============================================================================
// PATH SEGMENTS
// ============================================================================

/// One step of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key. Any string, including the empty string.
    Key(String),
    /// Array position. Wide enough to hold every primitive integer losslessly.
    Index(i128),
}

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    pub fn index(index: impl Into<i128>) -> Self {
        Self::Index(index.into())
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

macro_rules! impl_index_from {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for PathSegment {
                fn from(index: $int) -> Self {
                    Self::Index(i128::from(index))
                }
            }
        )*
    };
}

impl_index_from!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Self::Index(index as i128)
    }
}

impl From<isize> for PathSegment {
    fn from(index: isize) -> Self {
        Self::Index(index as i128)
    }
}

/// Dynamic segments, e.g. decoded from a command line or a config file.
///
/// Only strings and integers are segments. Anything else is rejected rather
/// than dropped, since skipping it would silently address a different location.
impl TryFrom<&serde_json::Value> for PathSegment {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(key) => Ok(Self::Key(key.clone())),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .map(Self::Index)
                .ok_or_else(|| {
                    Error::invalid_path_segment(format!("expected an integer index, got {n}"))
                }),
            other => Err(Error::invalid_path_segment(format!(
                "expected a string or an integer, got {other}"
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for PathSegment {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::try_from(&value)
    }
}

/// Build a path from mixed key and index literals.
///
/// ```
/// use airplane_output::{path, PathSegment};
///
/// let p = path!["rows", 3, "name"];
/// assert_eq!(p[1], PathSegment::Index(3));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::PathSegment>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        ::std::vec![$($crate::PathSegment::from($segment)),+]
    };
}

// ============================================================================
// ADDRESS
// ============================================================================

/// Encoded form of a path, as sent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode a path into its address.
///
/// The empty path encodes to the empty address.
pub fn encode_path(path: &[PathSegment]) -> Address {
    let encoded = path.iter().fold(String::new(), |mut out, segment| {
        match segment {
            PathSegment::Key(key) if is_dottable(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Key(key) => {
                out.push('[');
                out.push_str(&serde_json::Value::from(key.as_str()).to_string());
                out.push(']');
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
        out
    });
    Address(encoded)
}
