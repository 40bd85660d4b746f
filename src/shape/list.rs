use serde_json::{Map, Value};

use crate::error::ShapeError;

use super::json_kind;

const ITEMS_KEY: &str = "items";

/// Wrapper a listing was found under, in resolution precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListShape {
    /// `{ field: { field: [..] } }`
    Nested,
    /// `{ field: [..] }`
    Direct,
    /// `{ field: { items: [..] } }`
    NestedItems,
    /// `{ field: { key: [..] } }`, first array value in document order.
    Scanned { key: String },
    /// `{ items: [..] }`
    TopLevelItems,
    /// `[..]`
    BareList,
}

impl std::fmt::Display for ListShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListShape::Nested => f.write_str("nested list"),
            ListShape::Direct => f.write_str("direct list"),
            ListShape::NestedItems => f.write_str("nested items list"),
            ListShape::Scanned { key } => write!(f, "list found by scan under key '{}'", key),
            ListShape::TopLevelItems => f.write_str("top-level items list"),
            ListShape::BareList => f.write_str("bare list body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedList<'body> {
    pub shape: ListShape,
    pub records: &'body [Value],
}

impl<'body> ResolvedList<'body> {
    const fn new(shape: ListShape, records: &'body [Value]) -> Self {
        Self { shape, records }
    }

    #[must_use]
    pub fn first(&self) -> Option<&'body Value> {
        self.records.first()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Locates the record list in a listing response.
///
/// Precedence: `field` as a nested list, a direct list, an `items` sub-list,
/// or the first list among its values; then a top-level `items` list; then a
/// bare array body.
///
/// # Errors
///
/// Returns [`ShapeError::UnrecognizedListShape`] when no supported wrapper matches.
pub fn resolve_list<'body>(body: &'body Value, field: &str) -> Result<ResolvedList<'body>, ShapeError> {
    let map = match body {
        Value::Array(records) => return Ok(ResolvedList::new(ListShape::BareList, records)),
        Value::Object(map) => map,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            return Err(ShapeError::UnrecognizedListShape {
                field: field.to_owned(),
                keys: format!("<{} body>", json_kind(body)),
            });
        }
    };

    if let Some(resolved) = map.get(field).and_then(|inner| resolve_field(inner, field)) {
        return Ok(resolved);
    }

    if let Some(Value::Array(records)) = map.get(ITEMS_KEY) {
        return Ok(ResolvedList::new(ListShape::TopLevelItems, records));
    }

    Err(ShapeError::UnrecognizedListShape {
        field: field.to_owned(),
        keys: join_keys(map),
    })
}

fn resolve_field<'body>(inner: &'body Value, field: &str) -> Option<ResolvedList<'body>> {
    match inner {
        Value::Array(records) => Some(ResolvedList::new(ListShape::Direct, records)),
        Value::Object(inner_map) => {
            if let Some(Value::Array(records)) = inner_map.get(field) {
                return Some(ResolvedList::new(ListShape::Nested, records));
            }
            if let Some(Value::Array(records)) = inner_map.get(ITEMS_KEY) {
                return Some(ResolvedList::new(ListShape::NestedItems, records));
            }
            inner_map.iter().find_map(|(key, value)| {
                value.as_array().map(|records| {
                    ResolvedList::new(ListShape::Scanned { key: key.clone() }, records)
                })
            })
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Top-level keys of an object body, in document order.
#[must_use]
pub fn top_level_keys(body: &Value) -> Vec<String> {
    body.as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn join_keys(map: &Map<String, Value>) -> String {
    if map.is_empty() {
        return "<none>".to_owned();
    }
    map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
