//! Bounding topic sections ("gender", "top cities", ...) inside OCR text.
//!
//! Marker search is ASCII case-insensitive. Lowercasing with
//! [`str::to_ascii_lowercase`] keeps byte offsets identical to the original
//! text, so indices found in the lowered copy slice the original directly.

/// How to cut one section out of the full text.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule<'a> {
    /// Lowercase phrases that open the section; the earliest one wins.
    pub markers: &'a [&'a str],
    /// Maximum section length in bytes, measured from the marker.
    pub window: Option<usize>,
    /// Lowercase phrases that close the section early.
    pub end_markers: &'a [&'a str],
    /// End markers closer than this to the section start are ignored, since
    /// they are usually part of the heading itself.
    pub min_end_offset: usize,
}

impl<'a> SectionRule<'a> {
    #[must_use]
    pub const fn new(markers: &'a [&'a str]) -> Self {
        Self {
            markers,
            window: None,
            end_markers: &[],
            min_end_offset: 0,
        }
    }

    #[must_use]
    pub const fn window(mut self, window: usize) -> Self {
        self.window = Some(window);
        self
    }

    #[must_use]
    pub const fn ending_at(mut self, end_markers: &'a [&'a str], min_end_offset: usize) -> Self {
        self.end_markers = end_markers;
        self.min_end_offset = min_end_offset;
        self
    }
}

/// Byte offset of the earliest occurrence of any marker, case-insensitive.
#[must_use]
pub fn find_marker(text: &str, markers: &[&str]) -> Option<usize> {
    let lower = text.to_ascii_lowercase();
    earliest(&lower, markers)
}

/// Returns the section described by `rule`, or the whole text when no marker
/// is present.
#[must_use]
pub fn locate<'t>(text: &'t str, rule: &SectionRule<'_>) -> &'t str {
    locate_bounded(text, rule).unwrap_or(text)
}

/// Returns the section described by `rule`, or `None` when no marker is
/// present.
#[must_use]
pub fn locate_bounded<'t>(text: &'t str, rule: &SectionRule<'_>) -> Option<&'t str> {
    let lower = text.to_ascii_lowercase();
    let start = earliest(&lower, rule.markers)?;

    let mut end = match rule.window {
        Some(window) => snap_forward(text, start.saturating_add(window).min(text.len())),
        None => text.len(),
    };

    let search_from = snap_forward(text, start.saturating_add(rule.min_end_offset).min(text.len()));
    if search_from < end {
        if let Some(rel) = earliest(&lower[search_from..end], rule.end_markers) {
            end = search_from + rel;
        }
    }

    Some(&text[start..end])
}

fn earliest(lower: &str, markers: &[&str]) -> Option<usize> {
    markers.iter().filter_map(|m| lower.find(m)).min()
}

/// Moves `idx` forward to the next UTF-8 char boundary.
fn snap_forward(text: &str, idx: usize) -> usize {
    (idx..=text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len())
}
