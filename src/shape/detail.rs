use reqwest::StatusCode;
use serde_json::Value;

use super::list::top_level_keys;

/// Keys whose presence marks a detail body as carrying a product.
const DETAIL_MARKER_KEYS: [&str; 2] = ["product", "id"];

/// Outcome of fetching a record that the listing said exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailVerdict {
    Found,
    /// Listed, then 404 on fetch. The system contradicts itself.
    NotFoundAfterListing,
    UnexpectedStructure { keys: Vec<String> },
    UnreadableBody,
    UnexpectedStatus(u16),
}

impl DetailVerdict {
    #[must_use]
    pub const fn is_inconsistency(&self) -> bool {
        matches!(self, DetailVerdict::NotFoundAfterListing)
    }
}

#[must_use]
pub fn classify_detail(status: StatusCode, body: &str) -> DetailVerdict {
    if status == StatusCode::NOT_FOUND {
        return DetailVerdict::NotFoundAfterListing;
    }
    if status != StatusCode::OK {
        return DetailVerdict::UnexpectedStatus(status.as_u16());
    }
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return DetailVerdict::UnreadableBody;
    };
    let has_marker = parsed
        .as_object()
        .is_some_and(|map| DETAIL_MARKER_KEYS.iter().any(|key| map.contains_key(*key)));
    if has_marker {
        DetailVerdict::Found
    } else {
        DetailVerdict::UnexpectedStructure {
            keys: top_level_keys(&parsed),
        }
    }
}
