use serde_json::Value;

/// Candidate product id keys, tried in order.
pub const PRODUCT_ID_KEYS: [&str; 3] = ["id", "Id", "productId"];

/// Paths that have carried the new user's id in registration responses.
pub const REGISTERED_USER_ID_PATHS: [&[&str]; 5] = [
    &["userIdentity", "id"],
    &["userIdentity", "userId"],
    &["user", "id"],
    &["userId"],
    &["id"],
];

/// Returns the first non-empty identifier among `candidates`.
///
/// Strings count when non-blank, numbers always count.
#[must_use]
pub fn extract_identifier(record: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find_map(|key| record.get(key).and_then(identifier_text))
}

/// Walks a key path through nested objects.
#[must_use]
pub fn lookup_path<'body>(value: &'body Value, path: &[&str]) -> Option<&'body Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Probes each path in order; returns the id and the dotted path it came from.
#[must_use]
pub fn find_identifier_at_paths(value: &Value, paths: &[&[&str]]) -> Option<(String, String)> {
    paths.iter().find_map(|path| {
        lookup_path(value, path)
            .and_then(identifier_text)
            .map(|id| (id, path.join(".")))
    })
}

/// Finds the record whose string `field` equals `expected`, ignoring ASCII case.
#[must_use]
pub fn find_record_by_field<'body>(
    records: &'body [Value],
    field: &str,
    expected: &str,
) -> Option<&'body Value> {
    records.iter().find(|record| {
        record
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| value.eq_ignore_ascii_case(expected))
    })
}

fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
