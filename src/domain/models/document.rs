//! Source document model.

use serde::{Deserialize, Serialize};

/// A raw help-center article produced by the acquisition collaborator.
///
/// Documents are immutable once fetched; a refresh replaces the whole
/// corpus, it never patches records in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier assigned by the source, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Article title.
    pub title: String,

    /// Canonical article URL.
    pub url: String,

    /// Extracted article text.
    pub content: String,
}

impl Document {
    pub fn new(
        id: Option<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}
