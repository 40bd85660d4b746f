//! Response-shape resolution for JSON bodies whose nesting is not guaranteed.
//!
//! The probed server has returned the same listing under several wrappers
//! across versions. Each wrapper is a named [`ListShape`]; when none matches
//! the caller gets a [`ShapeError`](crate::error::ShapeError) instead of an
//! empty list.
mod detail;
mod identifier;
mod list;


pub use detail::{DetailVerdict, classify_detail};
pub use identifier::{
    PRODUCT_ID_KEYS, REGISTERED_USER_ID_PATHS, extract_identifier, find_identifier_at_paths,
    find_record_by_field, lookup_path,
};
pub use list::{ListShape, ResolvedList, resolve_list, top_level_keys};

/// Short JSON type name used in reports and error messages.
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
