use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::QueryError;

/// Flat query-parameter mapping, as produced by URL query-string decoding.
/// Values are plain strings; list values arrive comma-joined and are split
/// during bracket-group extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

/// A bracket-group value: kept scalar unless the raw string contained a
/// comma, in which case it splits into a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    fn from_raw(raw: &str) -> Self {
        if raw.contains(',') {
            ParamValue::List(raw.split(',').map(str::to_string).collect())
        } else {
            ParamValue::Scalar(raw.to_string())
        }
    }

    /// Normalize to a list; scalars become single-element lists.
    pub fn into_list(self) -> Vec<String> {
        match self {
            ParamValue::Scalar(value) => vec![value],
            ParamValue::List(values) => values,
        }
    }
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Build from an untyped JSON value, the shape a framework hands over
    /// when it decoded the query string itself. Anything but an object is
    /// rejected. Scalar values are stringified and array values comma-joined,
    /// matching the flat string form URL decoding produces.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, QueryError> {
        let object = value.as_object().ok_or_else(|| {
            QueryError::InvalidArgument("query parameters must be a string-keyed mapping".into())
        })?;

        let mut params = Params::new();
        for (key, value) in object {
            let flat = match value {
                serde_json::Value::Array(items) => {
                    let mut parts = Vec::with_capacity(items.len());
                    for item in items {
                        parts.push(flatten_scalar(key, item)?);
                    }
                    parts.join(",")
                }
                other => flatten_scalar(key, other)?,
            };
            params.insert(key.clone(), flat);
        }
        Ok(params)
    }

    /// Extract bracket-group values for parameter names starting with
    /// `prefix`: `page[size]=10` under prefix `"page"` yields `size -> 10`.
    /// A matching name without a well-formed `[subkey]` part is a client
    /// error naming that parameter.
    pub fn bracket_values(&self, prefix: &str) -> Result<BTreeMap<String, ParamValue>, QueryError> {
        let mut results = BTreeMap::new();

        for (key, value) in &self.entries {
            if !key.starts_with(prefix) {
                continue;
            }
            let open = key.find('[');
            let close = key.find(']');
            let sub_key = match (open, close) {
                (Some(open), Some(close)) if open < close => &key[open + 1..close],
                _ => return Err(QueryError::bad_request("parse error", key.clone())),
            };
            results.insert(sub_key.to_string(), ParamValue::from_raw(value));
        }

        Ok(results)
    }
}

fn flatten_scalar(key: &str, value: &serde_json::Value) -> Result<String, QueryError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(QueryError::InvalidArgument(format!(
            "unsupported value for query parameter {key}"
        ))),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
