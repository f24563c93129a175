use crate::limits::ExtractionLimits;
use crate::ConfigError;

/// Runtime configuration for the `dashmetrics` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    pub limits: ExtractionLimits,
}

/// Load CLI configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the resulting limits
/// are inconsistent.
pub fn load_cli_config() -> Result<CliConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_cli_config_from_env()
}

/// Load CLI configuration from environment variables already in the process.
///
/// Unlike [`load_cli_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the resulting limits
/// are inconsistent.
pub fn load_cli_config_from_env() -> Result<CliConfig, ConfigError> {
    build_cli_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can drive it from a plain `HashMap`.
fn build_cli_config<F>(lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ExtractionLimits::default();

    let or_default = |var: &str, default: String| -> String { lookup(var).unwrap_or(default) };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let raw = or_default(var, default.to_string());
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        let raw = or_default(var, default.to_string());
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        let raw = or_default(var, default.to_string());
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("DASHMETRICS_LOG_LEVEL", "info".to_string());

    let limits = ExtractionLimits {
        interactions_max: parse_u64("DASHMETRICS_INTERACTIONS_MAX", defaults.interactions_max)?,
        interactions_wide_max: parse_u64(
            "DASHMETRICS_INTERACTIONS_WIDE_MAX",
            defaults.interactions_wide_max,
        )?,
        gender_window: parse_usize("DASHMETRICS_GENDER_WINDOW", defaults.gender_window)?,
        interactions_window: parse_usize(
            "DASHMETRICS_INTERACTIONS_WINDOW",
            defaults.interactions_window,
        )?,
        content_type_window: parse_usize(
            "DASHMETRICS_CONTENT_TYPE_WINDOW",
            defaults.content_type_window,
        )?,
        locations_window: parse_usize("DASHMETRICS_LOCATIONS_WINDOW", defaults.locations_window)?,
        section_end_min_offset: parse_usize(
            "DASHMETRICS_SECTION_END_MIN_OFFSET",
            defaults.section_end_min_offset,
        )?,
        max_relative_days: parse_u32(
            "DASHMETRICS_MAX_RELATIVE_DAYS",
            defaults.max_relative_days,
        )?,
    };
    limits.validate()?;

    Ok(CliConfig { log_level, limits })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
