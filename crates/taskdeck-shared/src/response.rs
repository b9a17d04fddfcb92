//! Error body the backend attaches to rejected requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a non-2xx response.
///
/// The backend reports a top-level `message` and, for validation
/// failures, a per-field `errors` map. Both are optional - some error
/// responses carry no usable body at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    /// The most specific message available: a field error beats the
    /// generic top-level message, which beats nothing.
    pub fn display_message(&self) -> Option<String> {
        if let Some(errors) = &self.errors {
            if let Some(first) = errors.values().flatten().next() {
                return Some(first.clone());
            }
        }
        self.message.clone()
    }
}
