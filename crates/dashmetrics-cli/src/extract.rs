//! `extract` command: read OCR text files, combine them in order and run the
//! engine once.
//!
//! A file that cannot be read becomes a failed page with an error note; the
//! run only fails when no page could be read at all.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dashmetrics_core::{ExtractionLimits, PageText};
use dashmetrics_extract::MetricsExtractor;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::io::AsyncReadExt;

const STDIN_PATH: &str = "-";

#[derive(Debug)]
pub(crate) struct ExtractOptions {
    pub(crate) files: Vec<PathBuf>,
    pub(crate) today: NaiveDate,
    pub(crate) pretty: bool,
    pub(crate) metrics_only: bool,
    pub(crate) concurrency: usize,
}

/// Runs the `extract` command and prints the JSON result to stdout.
///
/// # Errors
///
/// Returns an error if every input failed to read or the result cannot be
/// serialized.
pub(crate) async fn run_extract(
    limits: ExtractionLimits,
    options: ExtractOptions,
) -> anyhow::Result<()> {
    let pages = read_pages(&options.files, options.concurrency).await;
    let report = MetricsExtractor::new(limits).extract_pages(pages, options.today);

    let failed = report.failed_pages();
    if failed == report.pages.len() {
        anyhow::bail!("none of the {failed} input file(s) could be read");
    }

    tracing::info!(
        pages = report.pages.len(),
        failed,
        fields = report.metrics.populated_fields(),
        "extraction complete"
    );

    let output = if options.metrics_only {
        render(&report.metrics, options.pretty)?
    } else {
        render(&report, options.pretty)?
    };
    println!("{output}");
    Ok(())
}

/// Reads every input concurrently, keeping the original file order.
pub(crate) async fn read_pages(files: &[PathBuf], concurrency: usize) -> Vec<PageText> {
    stream::iter(files.iter().enumerate())
        .map(|(index, path)| read_page(index, path))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn read_page(index: usize, path: &Path) -> PageText {
    let source = path.display().to_string();
    let result = if source == STDIN_PATH {
        read_stdin().await
    } else {
        tokio::fs::read_to_string(path).await
    };

    match result {
        Ok(text) => {
            tracing::debug!(index, source = %source, bytes = text.len(), "read page text");
            PageText::recognized(index, source, text)
        }
        Err(e) => {
            tracing::warn!(index, source = %source, error = %e, "failed to read page text");
            PageText::failed(index, source, e.to_string())
        }
    }
}

async fn read_stdin() -> std::io::Result<String> {
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}

pub(crate) fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
