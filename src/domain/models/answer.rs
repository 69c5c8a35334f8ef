//! Query answer model.

use serde::{Deserialize, Serialize};

/// A deduplicated `(title, url)` pair pointing at a source article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

/// The synthesized answer to one query, plus the articles it drew from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Prose produced by the completion collaborator, returned verbatim.
    pub summary: String,

    /// First-seen-ordered source list with exact URL repeats dropped.
    pub sources: Vec<SourceRef>,
}
