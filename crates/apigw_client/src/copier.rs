//! Struct-to-struct copying through the serde data model.
//!
//! A [`Copier`] moves the fields of one serializable value into another type
//! that shares field names with it. It is used to type decoded responses and
//! to build update requests from entities fetched from the service.
//!
//! ```
//! use apigw_client::copier::Copier;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct Source { name: String, description: Option<String>, internal: u32 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Target { title: String, description: Option<String> }
//!
//! let target: Target = Copier::new()
//!     .rename("name", "title")
//!     .skip("internal")
//!     .copy(&Source { name: "a".into(), description: None, internal: 7 })
//!     .unwrap();
//! assert_eq!(target, Target { title: "a".into(), description: None });
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::casing::{convert_keys, KeyCase};
use crate::Error;

#[cfg(test)]
#[path = "copier_tests.rs"]
mod tests;

/// A per-field value transformation. Returning `Err` aborts the copy.
pub type Converter = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Configurable struct-to-struct copier.
///
/// Field processing order: key case, skip, rename, convert, empty filtering.
/// Skips, renames and converters address top-level fields by their name
/// after the key case has been applied.
#[derive(Clone, Default)]
pub struct Copier {
    ignore_empty: bool,
    key_case: KeyCase,
    renames: Vec<(String, String)>,
    skipped: Vec<String>,
    converters: Vec<(String, Converter)>,
}

impl fmt::Debug for Copier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Copier")
            .field("ignore_empty", &self.ignore_empty)
            .field("key_case", &self.key_case)
            .field("renames", &self.renames)
            .field("skipped", &self.skipped)
            .field(
                "converters",
                &self.converters.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Copier {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, null values, empty strings and empty arrays in the source
    /// never overwrite the destination.
    pub fn ignore_empty(mut self, ignore_empty: bool) -> Self {
        self.ignore_empty = ignore_empty;
        self
    }

    /// Rewrites source keys, at every depth, into `case` before anything else.
    pub fn key_case(mut self, case: KeyCase) -> Self {
        self.key_case = case;
        self
    }

    /// Copies the source field `from` into the destination field `to`.
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.push((from.into(), to.into()));
        self
    }

    /// Leaves the source field out of the copy.
    pub fn skip(mut self, field: impl Into<String>) -> Self {
        self.skipped.push(field.into());
        self
    }

    /// Passes the value of destination field `field` through `converter`.
    pub fn convert<F>(mut self, field: impl Into<String>, converter: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.converters.push((field.into(), Arc::new(converter)));
        self
    }

    /// Builds a new `D` from the fields of `src`.
    ///
    /// # Errors
    /// `Error::Copy` when `src` is not a struct or map or a converter fails,
    /// `Error::Deserialization` when the fields do not fit `D`.
    pub fn copy<S, D>(&self, src: &S) -> Result<D, Error>
    where
        S: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        self.copy_value(serde_json::to_value(src)?)
    }

    /// Like [`Copier::copy`], starting from an already decoded JSON value.
    ///
    /// # Errors
    /// See [`Copier::copy`].
    pub fn copy_value<D: DeserializeOwned>(&self, value: Value) -> Result<D, Error> {
        let fields = self.map_fields(value)?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Deep-merges the fields of `src` onto `dst`.
    ///
    /// Nested objects merge field by field; arrays and scalars are replaced.
    ///
    /// # Errors
    /// See [`Copier::copy`].
    pub fn copy_into<S, D>(&self, src: &S, dst: &mut D) -> Result<(), Error>
    where
        S: Serialize + ?Sized,
        D: Serialize + DeserializeOwned,
    {
        let fields = self.map_fields(serde_json::to_value(src)?)?;
        let mut target = match serde_json::to_value(&*dst)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::Copy(format!(
                    "destination must be a struct or map, found {}",
                    kind(&other)
                )))
            }
        };

        merge(&mut target, fields, self.ignore_empty);
        *dst = serde_json::from_value(Value::Object(target))?;
        Ok(())
    }

    fn map_fields(&self, value: Value) -> Result<Map<String, Value>, Error> {
        let source = match convert_keys(value, self.key_case) {
            Value::Object(map) => map,
            other => {
                return Err(Error::Copy(format!(
                    "source must be a struct or map, found {}",
                    kind(&other)
                )))
            }
        };

        let mut fields = Map::new();
        for (key, value) in source {
            if self.skipped.iter().any(|s| *s == key) {
                continue;
            }

            let name = self
                .renames
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| to.clone())
                .unwrap_or(key);

            let value = match self.converters.iter().find(|(field, _)| *field == name) {
                Some((_, converter)) => converter(value)
                    .map_err(|e| Error::Copy(format!("converter for `{name}` failed: {e}")))?,
                None => value,
            };

            if self.ignore_empty && is_empty(&value) {
                continue;
            }
            fields.insert(name, value);
        }
        Ok(fields)
    }
}

/// Copies `src` into a new `D` with the default options.
///
/// # Errors
/// See [`Copier::copy`].
pub fn copy<S, D>(src: &S) -> Result<D, Error>
where
    S: Serialize + ?Sized,
    D: DeserializeOwned,
{
    Copier::new().copy(src)
}

/// Builds a camelCase request type from a snake_case entity.
///
/// Update requests share their field names with the entity they modify, so
/// the entity fetched from the service is a complete starting point.
///
/// # Errors
/// See [`Copier::copy`].
pub fn request_from<S, D>(entity: &S) -> Result<D, Error>
where
    S: Serialize + ?Sized,
    D: DeserializeOwned,
{
    Copier::new().key_case(KeyCase::Camel).copy(entity)
}

fn merge(target: &mut Map<String, Value>, source: Map<String, Value>, ignore_empty: bool) {
    for (key, value) in source {
        if ignore_empty && is_empty(&value) {
            continue;
        }
        match value {
            Value::Object(incoming) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => merge(existing, incoming, ignore_empty),
                _ => {
                    target.insert(key, Value::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
