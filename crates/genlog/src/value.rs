//! Loggable values.
//!
//! Key/value arguments are loosely typed: any mix of strings, numbers,
//! byte buffers, errors, sequences and maps can be attached to a log call.
//! [`Value`] is the tagged union those arguments are converted into, and the
//! [`kv!`](crate::kv) macro performs the conversion for a flat argument list.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};
use tracing::debug;

/// Error object shared between a logger call, its entry and any values.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A single loggable key or value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value; also pairs with a trailing key that had no value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Raw bytes, rendered as hex pairs.
    Bytes(Vec<u8>),
    /// An error, rendered as its message.
    Error(SharedError),
    /// Ordered sequence of values.
    Seq(Vec<Value>),
    /// String-keyed map, iterated in key order.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Wraps raw bytes.
    ///
    /// `Vec<u8>` converts into a [`Value::Seq`] of numbers through the
    /// generic `From<Vec<T>>` impl; use this (or `&[u8]`) for byte buffers.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Wraps an error. Accepts anything that converts into a boxed error,
    /// including plain strings.
    #[must_use]
    pub fn error(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Error(Arc::from(err.into()))
    }

    /// Converts any serializable value through `serde_json`.
    ///
    /// Values that fail to serialize (non-string map keys, failing custom
    /// `Serialize` impls) degrade to their `Debug` text.
    pub fn serialized<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(json) => Self::from(json),
            Err(e) => {
                debug!(error = %e, "value not serializable, using debug text");
                Self::Str(format!("{value:?}"))
            }
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a.to_string() == b.to_string(),
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Uint(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.serialize_str(&hex_pairs(b)),
            Self::Error(e) => serializer.collect_str(e),
            Self::Seq(items) => serializer.collect_seq(items),
            Self::Map(map) => serializer.collect_map(map),
        }
    }
}

/// Formats bytes as lower-case hex pairs separated by single spaces.
pub(crate) fn hex_pairs(bytes: &[u8]) -> String {
    use fmt::Write as _;

    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}

// Conversions

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                #[allow(clippy::cast_lossless)]
                fn from(n: $t) -> Self {
                    Self::$variant(n as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Str(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<std::borrow::Cow<'_, str>> for Value {
    fn from(s: std::borrow::Cow<'_, str>) -> Self {
        Self::Str(s.into_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<SharedError> for Value {
    fn from(e: SharedError) -> Self {
        Self::Error(e)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

/// Builds an array of [`Value`]s from a flat, alternating key/value list.
///
/// ```rust
/// use genlog::{kv, Value};
///
/// let pairs = kv!["user", "alice", "attempts", 3];
/// assert_eq!(pairs[1], Value::from("alice"));
/// ```
#[macro_export]
macro_rules! kv {
    () => {{
        let empty: [$crate::Value; 0] = [];
        empty
    }};
    ($($item:expr),+ $(,)?) => {
        [$($crate::Value::from($item)),+]
    };
}
