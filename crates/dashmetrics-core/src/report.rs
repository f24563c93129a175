use serde::{Deserialize, Serialize};

use crate::metrics::MetricsRecord;

/// OCR outcome for a single source image, kept for display and debugging.
///
/// Exactly one of `text` or `error` is normally set: a failed page carries an
/// error note and contributes nothing to extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// Position of the image in the original upload order.
    pub index: usize,
    /// Where the text came from (file path, upload name, ...).
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageText {
    #[must_use]
    pub fn recognized(index: usize, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            text: Some(text.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(index: usize, source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            text: None,
            error: Some(error.into()),
        }
    }

    /// Returns `true` if the page produced usable (non-blank) text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// What the downstream storage/presentation layer receives: the merged
/// metrics plus the raw per-image texts they were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub metrics: MetricsRecord,
    pub pages: Vec<PageText>,
}

impl ExtractionReport {
    /// Number of pages that failed before extraction.
    #[must_use]
    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.error.is_some()).count()
    }
}
