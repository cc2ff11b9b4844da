use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result list as it travels through the service. Entries are kept as raw
/// JSON so whatever the model produced reaches the caller unchanged.
pub type PlaceResults = Vec<Value>;

/// One recommended place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    pub title: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,

    /// Why this place matches the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<String>,

    /// May hold several comma separated tags
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PlaceResult {
    pub const FORMAT_ISSUE_TITLE: &'static str = "Response Format Issue";

    pub const FORMAT_ISSUE_CATEGORY: &'static str = "Error";

    /// Placeholder returned when the model answer holds no usable list.
    #[must_use]
    pub fn format_issue() -> Self {
        Self {
            title: Self::FORMAT_ISSUE_TITLE.to_string(),
            description: "The search service returned data in an unexpected format.".to_string(),
            location_details: Some("Please try a different search query".to_string()),
            similarity: Some("N/A".to_string()),
            category: Self::FORMAT_ISSUE_CATEGORY.to_string(),
            url: None,
        }
    }

    #[must_use]
    pub fn is_format_issue(&self) -> bool {
        self.title == Self::FORMAT_ISSUE_TITLE && self.category == Self::FORMAT_ISSUE_CATEGORY
    }

    /// Lenient decode of one raw entry; `None` when required fields are missing.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
