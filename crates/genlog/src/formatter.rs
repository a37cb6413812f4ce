//! Human-readable rendering of keys, values and field lists.
//!
//! Rendering never fails: values that cannot be encoded fall back to their
//! `Debug` text, and non-string keys are replaced by a `!(<value>)` marker.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{hex_pairs, Value};

static SAFE_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap_or_else(|_| unreachable!()));

/// Quotes and escapes a string the way JSON does.
#[must_use]
pub fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

/// Renders a key, leaving it bare when it only contains `[A-Za-z0-9._-]`.
#[must_use]
pub fn pretty_key(key: &str) -> Cow<'_, str> {
    if SAFE_KEY_REGEX.is_match(key) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(quote(key))
    }
}

/// Renders a value.
///
/// Bytes become quoted hex pairs (`"66 6f 6f"`), errors their quoted message,
/// and everything else compact JSON.
#[must_use]
pub fn pretty(value: &Value) -> String {
    match value {
        Value::Bytes(b) => format!("\"{}\"", hex_pairs(b)),
        Value::Error(e) => quote(&e.to_string()),
        other => serde_json::to_string(other).unwrap_or_else(|_| quote(&format!("{other:?}"))),
    }
}

/// Returns the map key for a value in key position.
///
/// Strings are used as-is; anything else becomes `!(<rendered value>)` so a
/// misplaced argument stays visible without breaking the pairing.
#[must_use]
pub fn key_string(key: &Value) -> Cow<'_, str> {
    match key {
        Value::Str(s) => Cow::Borrowed(s),
        other => Cow::Owned(format!("!({})", pretty(other))),
    }
}

/// Pairs an alternating key/value list into a map.
///
/// A trailing key without a value maps to [`Value::Null`]; later duplicates
/// overwrite earlier ones.
#[must_use]
pub fn fields_map(fields: &[Value]) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    for pair in fields.chunks(2) {
        let key = key_string(&pair[0]).into_owned();
        let value = pair.get(1).cloned().unwrap_or(Value::Null);
        map.insert(key, value);
    }
    map
}

/// Renders a key/value list as space separated `key=value` tokens, sorted by
/// key.
#[must_use]
pub fn flatten(fields: &[Value]) -> String {
    let mut out = String::new();
    for (i, (key, value)) in fields_map(fields).iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&pretty_key(key));
        out.push('=');
        out.push_str(&pretty(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;
    use test_case::test_case;

    // ===========================================
    // Key Tests
    // ===========================================

    #[test_case("simple", "simple" ; "plain word")]
    #[test_case("with.dots_and-dash9", "with.dots_and-dash9" ; "safe punctuation")]
    #[test_case("has space", "\"has space\"" ; "space is quoted")]
    #[test_case("", "\"\"" ; "empty is quoted")]
    #[test_case("quo\"te", "\"quo\\\"te\"" ; "quote is escaped")]
    fn pretty_key_quoting(key: &str, expected: &str) {
        assert_eq!(pretty_key(key), expected);
    }

    #[test]
    fn key_string_marks_non_strings() {
        assert_eq!(key_string(&Value::from("a")), "a");
        assert_eq!(key_string(&Value::from(42)), "!(42)");
        assert_eq!(key_string(&Value::Null), "!(null)");
        assert_eq!(key_string(&Value::from(true)), "!(true)");
    }

    // ===========================================
    // Value Tests
    // ===========================================

    #[test_case(Value::from(42), "42" ; "int")]
    #[test_case(Value::from("foo"), "\"foo\"" ; "string")]
    #[test_case(Value::from(&b"foo"[..]), "\"66 6f 6f\"" ; "bytes")]
    #[test_case(Value::from(2.75), "2.75" ; "float")]
    #[test_case(Value::Null, "null" ; "null")]
    #[test_case(Value::error("oops"), "\"oops\"" ; "error")]
    #[test_case(Value::from(vec!["a", "b"]), "[\"a\",\"b\"]" ; "string slice")]
    #[test_case(Value::Seq(vec![Value::from(&b"\x01"[..])]), "[\"01\"]" ; "nested bytes")]
    fn pretty_values(value: Value, expected: &str) {
        assert_eq!(pretty(&value), expected);
    }

    #[test]
    fn pretty_map() {
        let mut map = std::collections::HashMap::new();
        map.insert("foo", 12);
        assert_eq!(pretty(&Value::from(map)), "{\"foo\":12}");
    }

    #[test]
    fn pretty_non_finite_float_is_null() {
        assert_eq!(pretty(&Value::from(f64::NAN)), "null");
    }

    // ===========================================
    // Field List Tests
    // ===========================================

    #[test]
    fn fields_map_pairs_trailing_key_with_null() {
        let map = fields_map(&kv!["a", 1, "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(1)));
        assert_eq!(map.get("b"), Some(&Value::Null));
    }

    #[test]
    fn fields_map_last_value_wins() {
        let map = fields_map(&kv!["a", 1, "a", 2]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn flatten_sorts_keys() {
        assert_eq!(flatten(&kv!["z", 1, "a", "x", "m", true]), "a=\"x\" m=true z=1");
    }

    #[test]
    fn flatten_non_string_key() {
        assert_eq!(flatten(&kv![42]), "\"!(42)\"=null");
    }

    #[test]
    fn flatten_empty() {
        assert_eq!(flatten(&[]), "");
    }
}
