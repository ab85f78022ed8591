//! Brainstem list parameters and the query-string codec.
//!
//! `QueryParams` describes filtering, association includes, field selection,
//! ordering, search and pagination for a collection request. `to_params`
//! flattens it into the wire mapping and `encode` turns any flat mapping into
//! a query string.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::object::compact;

/// Characters escaped in keys and values: everything `encodeURIComponent`
/// escapes, minus `,` so joined selections stay readable.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b',');

/// A list-valued parameter such as `include` or `only`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Joined with commas on the wire.
    Many(Vec<Value>),
    /// Sent unchanged.
    One(Value),
}

impl Selection {
    fn to_wire(&self) -> Value {
        match self {
            Selection::Many(items) | Selection::One(Value::Array(items)) => {
                Value::String(join(items))
            }
            Selection::One(value) => value.clone(),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Selection {
    fn from(items: Vec<T>) -> Self {
        Selection::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Selection {
    fn from(items: [T; N]) -> Self {
        Selection::Many(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::One(Value::String(value.to_string()))
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::One(Value::String(value))
    }
}

/// Options for a Brainstem collection request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Merged flatly into the top-level parameters.
    #[serde(default)]
    pub filters: Map<String, Value>,
    pub include: Option<Selection>,
    pub only: Option<Selection>,
    pub order: Option<String>,
    pub page: Option<u64>,
    /// Sent as `per_page`.
    pub per_page: Option<u64>,
    pub search: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn include(mut self, include: impl Into<Selection>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn only(mut self, only: impl Into<Selection>) -> Self {
        self.only = Some(only.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Flatten into the wire mapping, with unset entries removed.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("include".into(), wire(self.include.as_ref().map(Selection::to_wire)));
        params.insert("only".into(), wire(self.only.as_ref().map(Selection::to_wire)));
        params.insert("order".into(), wire(self.order.clone()));
        params.insert("page".into(), wire(self.page));
        params.insert("per_page".into(), wire(self.per_page));
        params.insert("search".into(), wire(self.search.clone()));
        for (key, value) in &self.filters {
            params.insert(key.clone(), value.clone());
        }
        compact(Some(&params))
    }

    pub fn to_query_string(&self) -> String {
        encode(&self.to_params())
    }
}

fn wire<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}

/// `Array.prototype.join(",")` over JSON values.
fn join(items: &[Value]) -> String {
    items.iter().map(join_item).collect::<Vec<_>>().join(",")
}

fn join_item(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => join(items),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Number(n) => number(n),
        Value::Bool(b) => b.to_string(),
    }
}

/// JavaScript `Number#toString` for integral floats: `2.0` is `2`.
fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

/// Encode a flat mapping as a query string.
///
/// Arrays of scalars repeat as `key[]=value`, arrays holding containers use
/// `key[index]`, objects nest as `key[name]`, and `null` encodes as the empty
/// string.
pub fn encode(params: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        build_pairs(key, value, &mut pairs);
    }
    pairs.join("&")
}

fn build_pairs(prefix: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if prefix.ends_with("[]") {
                    push_pair(prefix, item, pairs);
                } else if item.is_array() || item.is_object() {
                    build_pairs(&format!("{prefix}[{index}]"), item, pairs);
                } else {
                    build_pairs(&format!("{prefix}[]"), item, pairs);
                }
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                build_pairs(&format!("{prefix}[{name}]"), field, pairs);
            }
        }
        scalar => push_pair(prefix, scalar, pairs),
    }
}

fn push_pair(key: &str, value: &Value, pairs: &mut Vec<String>) {
    let value = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => join_item(other),
    };
    pairs.push(format!(
        "{}={}",
        utf8_percent_encode(key, COMPONENT),
        utf8_percent_encode(&value, COMPONENT)
    ));
}
