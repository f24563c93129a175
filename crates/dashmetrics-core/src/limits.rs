use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Thresholds and section windows used by the extraction engine.
///
/// The defaults were tuned against sample dashboard screenshots rather than
/// derived from a documented rule, so every value can be overridden (see
/// [`crate::config`]). Windows are measured in bytes of OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionLimits {
    /// Upper bound for an interactions count read near its label.
    pub interactions_max: u64,
    /// Upper bound used by the backward scan of the content-type-bounded block.
    pub interactions_wide_max: u64,
    /// Window after the "gender"/"audience" marker.
    pub gender_window: usize,
    /// Window after the interactions marker when no "growth" marker bounds it.
    pub interactions_window: usize,
    /// Window after the interactions marker when bounding at "by content type".
    pub content_type_window: usize,
    /// Window after the locations marker.
    pub locations_window: usize,
    /// End markers closer than this to a section start are treated as part of
    /// the heading and ignored.
    pub section_end_min_offset: usize,
    /// Largest `N` accepted in "Last N days".
    pub max_relative_days: u32,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            interactions_max: 99_999,
            interactions_wide_max: 999_999,
            gender_window: 400,
            interactions_window: 600,
            content_type_window: 900,
            locations_window: 1_200,
            section_end_min_offset: 15,
            max_relative_days: 365,
        }
    }
}

impl ExtractionLimits {
    /// Checks the limits for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimits`] when a window is zero, a maximum
    /// is zero, or the wide interactions cap is below the narrow one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("gender_window", self.gender_window),
            ("interactions_window", self.interactions_window),
            ("content_type_window", self.content_type_window),
            ("locations_window", self.locations_window),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(ConfigError::InvalidLimits(format!("{name} must be > 0")));
        }
        if self.interactions_max == 0 {
            return Err(ConfigError::InvalidLimits(
                "interactions_max must be > 0".to_string(),
            ));
        }
        if self.interactions_wide_max < self.interactions_max {
            return Err(ConfigError::InvalidLimits(format!(
                "interactions_wide_max ({}) is below interactions_max ({})",
                self.interactions_wide_max, self.interactions_max
            )));
        }
        if self.max_relative_days == 0 {
            return Err(ConfigError::InvalidLimits(
                "max_relative_days must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
