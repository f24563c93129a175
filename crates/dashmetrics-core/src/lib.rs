//! Shared data model and configuration for dashboard metrics extraction.

pub mod config;
pub mod error;
pub mod limits;
pub mod metrics;
pub mod report;

pub use config::{load_cli_config, load_cli_config_from_env, CliConfig};
pub use error::ConfigError;
pub use limits::ExtractionLimits;
pub use metrics::{
    AgeRange, AgeShare, CityShare, ContentShare, ContentType, GenderSplit, Growth, MetricsRecord,
};
pub use report::{ExtractionReport, PageText};
