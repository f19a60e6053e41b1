//! Key-case conversion for JSON payloads.
//!
//! The service speaks camelCase while the response types in this crate use
//! snake_case field names. [`convert_keys`] rewrites every object key of a
//! JSON value, at any depth, so a decoded response can be deserialized
//! directly into those types.
//!
//! An underscore goes in front of every uppercase character and the result
//! is lowercased. Runs of capitals are not treated as acronyms, so `apiID` becomes `api_i_d`.

use serde_json::{Map, Value};

#[cfg(test)]
#[path = "casing_tests.rs"]
mod tests;

/// The key style to rewrite object keys into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Leave keys untouched.
    #[default]
    AsIs,
    /// `productName` -> `product_name`
    Snake,
    /// `product_name` -> `productName`
    Camel,
}

impl KeyCase {
    /// Applies this case to a single key.
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::AsIs => key.to_string(),
            KeyCase::Snake => camel_to_snake(key),
            KeyCase::Camel => snake_to_camel(key),
        }
    }
}

/// Converts a camelCase identifier to snake_case.
///
/// # Examples
///
/// ```
/// use apigw_client::casing::camel_to_snake;
///
/// assert_eq!(camel_to_snake("productName"), "product_name");
/// assert_eq!(camel_to_snake("isMaxQpsThrottleValid"), "is_max_qps_throttle_valid");
/// assert_eq!(camel_to_snake("ID"), "i_d");
/// ```
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a snake_case identifier to camelCase.
///
/// Each underscore is dropped and the character after it is uppercased.
///
/// ```
/// use apigw_client::casing::snake_to_camel;
///
/// assert_eq!(snake_to_camel("product_name"), "productName");
/// assert_eq!(snake_to_camel("rate_rps"), "rateRps");
/// ```
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrites all object keys in `value` into `case`, recursing through objects and arrays.
///
/// Scalars are returned unchanged.
pub fn convert_keys(value: Value, case: KeyCase) -> Value {
    if case == KeyCase::AsIs {
        return value;
    }

    match value {
        Value::Object(map) => Value::Object(convert_map(map, case)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_keys(item, case))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Rewrites the keys of a JSON object, recursing into its values.
pub fn convert_map(map: Map<String, Value>, case: KeyCase) -> Map<String, Value> {
    map.into_iter()
        .map(|(k, v)| (case.apply(&k), convert_keys(v, case)))
        .collect()
}

/// Shorthand for `convert_map(map, KeyCase::Snake)`, the transform applied to every response.
pub fn to_snake_keys(map: Map<String, Value>) -> Map<String, Value> {
    convert_map(map, KeyCase::Snake)
}
