//! Fan-in of per-image OCR results into a single engine run.

use chrono::NaiveDate;
use dashmetrics_core::{ExtractionReport, PageText};

use crate::assemble::MetricsExtractor;

const PAGE_SEPARATOR: &str = "\n\n";

/// Joins page texts in order, separated by a blank line. Blank pages are
/// skipped.
#[must_use]
pub fn combine_page_texts<S: AsRef<str>>(pages: &[S]) -> String {
    let texts: Vec<&str> = pages
        .iter()
        .map(|page| page.as_ref())
        .filter(|text| !text.trim().is_empty())
        .collect();
    texts.join(PAGE_SEPARATOR)
}

impl MetricsExtractor {
    /// Combines the recognized pages in image order and extracts once.
    ///
    /// Failed pages contribute no text but stay in the report so the caller
    /// can show their error notes next to the results.
    #[must_use]
    pub fn extract_pages(&self, mut pages: Vec<PageText>, today: NaiveDate) -> ExtractionReport {
        pages.sort_by_key(|page| page.index);

        let texts: Vec<&str> = pages
            .iter()
            .filter(|page| page.has_text())
            .filter_map(|page| page.text.as_deref())
            .collect();
        let combined = combine_page_texts(&texts);

        tracing::debug!(
            pages = pages.len(),
            recognized = texts.len(),
            "combined page texts"
        );

        ExtractionReport {
            metrics: self.extract(&combined, today),
            pages,
        }
    }
}
