//! naive-pi: approximate pi three naive ways and compare the results
//!
//! The estimators live in `naive-pi-core`; this crate resolves the run
//! configuration and drives the report.

pub mod config;
pub mod report;

pub use config::{Config, OutputFormat, PartialConfig};
pub use report::{MethodResult, Outcome, Report, run};

/// Whether the summary should use ANSI colour.
///
/// Disabled by the config/flag or by a non-empty `NO_COLOR` variable.
pub fn color_enabled(config: &Config) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    config.output.color && !no_color
}
