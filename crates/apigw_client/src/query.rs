//! Query string construction from typed list requests.
//!
//! List endpoints take optional filters and paging parameters. Their request
//! types derive `Serialize` with camelCase names; this module flattens such a
//! value into `(name, value)` pairs that are appended to the request URL.
//!
//! Unset (`null`) fields are skipped, arrays repeat the parameter once per
//! element, and numbers and booleans are rendered as text.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;

/// Flattens a serializable query struct into name/value pairs sorted by name.
///
/// Repeated array values keep their order.
///
/// # Errors
/// Returns `Error::Deserialization` if `query` cannot be represented as JSON,
/// and `Error::Copy` if it is not a struct or map.
pub fn to_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, Error> {
    let value = serde_json::to_value(query)?;
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (name, value) in map {
                push_value(&mut pairs, &name, value);
            }
        }
        Value::Null => {}
        other => {
            return Err(Error::Copy(format!(
                "query parameters must be an object, found {other}"
            )))
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

/// Appends the pairs of `query` to `url`.
///
/// Nothing is appended, and no `?` is added, when every field is unset.
///
/// # Errors
/// See [`to_pairs`].
pub fn append<Q: Serialize + ?Sized>(url: &mut Url, query: &Q) -> Result<(), Error> {
    let pairs = to_pairs(query)?;
    if pairs.is_empty() {
        return Ok(());
    }

    let mut serializer = url.query_pairs_mut();
    for (name, value) in &pairs {
        serializer.append_pair(name, value);
    }
    Ok(())
}

fn push_value(pairs: &mut Vec<(String, String)>, name: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((name.to_string(), s)),
        Value::Number(n) => pairs.push((name.to_string(), n.to_string())),
        Value::Bool(b) => pairs.push((name.to_string(), b.to_string())),
        Value::Array(items) => {
            for item in items {
                push_value(pairs, name, item);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                push_value(pairs, &format!("{name}.{key}"), nested);
            }
        }
    }
}
