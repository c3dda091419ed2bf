//! Run configuration
//!
//! Settings come from three layers, later layers overriding earlier ones key
//! by key:
//!
//! 1. Embedded defaults (`defaults.toml`)
//! 2. An optional user TOML file
//! 3. Command line flags
//!
//! Layers 2 and 3 are both expressed as a [`PartialConfig`], so a user file
//! only needs the keys it wants to change:
//!
//! ```toml
//! seed = 42
//! methods = ["leibniz"]
//!
//! [leibniz]
//! terms = 1_000_000
//! ```

use naive_pi_core::{EstimateError, Method, NeedleGeometry, leibniz};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Embedded default settings
pub static DEFAULT_CONFIG: &str = include_str!("defaults.toml");

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labeled sections and a summary table
    Human,
    /// A single JSON document
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonteCarloConfig {
    pub iterations: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeibnizConfig {
    pub terms: u64,
    pub precision: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuffonConfig {
    pub drops: u64,
    pub needle_length: f64,
    pub line_spacing: f64,
}

impl BuffonConfig {
    pub fn geometry(&self) -> Result<NeedleGeometry, EstimateError> {
        NeedleGeometry::new(self.needle_length, self.line_spacing)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Highlight where each estimate departs from pi
    pub color: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seed for the sampling estimators; `None` seeds from the OS
    pub seed: Option<u64>,
    pub methods: Vec<Method>,
    pub monte_carlo: MonteCarloConfig,
    pub leibniz: LeibnizConfig,
    pub buffon: BuffonConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialMonteCarlo {
    pub iterations: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialLeibniz {
    pub terms: Option<u64>,
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialBuffon {
    pub drops: Option<u64>,
    pub needle_length: Option<f64>,
    pub line_spacing: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialOutput {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

/// A set of overrides where every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub seed: Option<u64>,
    pub methods: Option<Vec<Method>>,
    pub monte_carlo: PartialMonteCarlo,
    pub leibniz: PartialLeibniz,
    pub buffon: PartialBuffon,
    pub output: PartialOutput,
}

impl PartialConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse config: {}", e))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }
}

impl Config {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load the embedded defaults
    pub fn default_config() -> Result<Self, String> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Apply overrides; keys absent from `other` keep their current value
    pub fn merge(&mut self, other: PartialConfig) {
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if let Some(methods) = other.methods {
            self.methods = methods;
        }
        if let Some(iterations) = other.monte_carlo.iterations {
            self.monte_carlo.iterations = iterations;
        }
        if let Some(terms) = other.leibniz.terms {
            self.leibniz.terms = terms;
        }
        if let Some(precision) = other.leibniz.precision {
            self.leibniz.precision = precision;
        }
        if let Some(drops) = other.buffon.drops {
            self.buffon.drops = drops;
        }
        if let Some(needle_length) = other.buffon.needle_length {
            self.buffon.needle_length = needle_length;
        }
        if let Some(line_spacing) = other.buffon.line_spacing {
            self.buffon.line_spacing = line_spacing;
        }
        if let Some(format) = other.output.format {
            self.output.format = format;
        }
        if let Some(color) = other.output.color {
            self.output.color = color;
        }
    }

    /// Resolve defaults, then the optional file, then command line overrides
    pub fn load(file: Option<&Path>, overrides: PartialConfig) -> Result<Self, String> {
        let mut config = Self::default_config()?;
        if let Some(path) = file {
            debug!("Loading config from {}", path.display());
            config.merge(PartialConfig::from_file(path)?);
        }
        config.merge(overrides);
        config.normalize_methods();
        config.validate()?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Put methods in run order and drop duplicates
    pub fn normalize_methods(&mut self) {
        self.methods.sort();
        self.methods.dedup();
    }

    /// Reject settings no estimator could run with.
    ///
    /// Only selected methods are checked, so an unused section may hold
    /// placeholder values.
    pub fn validate(&self) -> Result<(), String> {
        if self.methods.is_empty() {
            return Err("No methods selected".to_string());
        }

        for method in &self.methods {
            let check = match method {
                Method::MonteCarlo => nonzero(*method, self.monte_carlo.iterations),
                Method::Leibniz => nonzero(*method, self.leibniz.terms)
                    .and_then(|_| leibniz::check_precision(self.leibniz.precision)),
                Method::BuffonNeedle => nonzero(*method, self.buffon.drops)
                    .and_then(|_| self.buffon.geometry().map(|_| ())),
            };
            check.map_err(|e| format!("Invalid configuration: {}", e))?;
        }
        Ok(())
    }

    /// Sample count configured for `method`
    pub fn samples(&self, method: Method) -> u64 {
        match method {
            Method::MonteCarlo => self.monte_carlo.iterations,
            Method::Leibniz => self.leibniz.terms,
            Method::BuffonNeedle => self.buffon.drops,
        }
    }
}

fn nonzero(method: Method, samples: u64) -> Result<(), EstimateError> {
    if samples == 0 {
        Err(EstimateError::ZeroIterations { method })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::default_config().unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.methods, Method::ALL.to_vec());
        assert_eq!(config.monte_carlo.iterations, 100_000_000);
        assert_eq!(config.leibniz.terms, 50_000_000);
        assert_eq!(config.leibniz.precision, 28);
        assert_eq!(config.buffon.drops, 10_000_000);
        assert_eq!(config.buffon.needle_length, 1.0);
        assert_eq!(config.buffon.line_spacing, 1.0);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert!(config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_only_touches_present_keys() {
        let mut config = Config::default_config().unwrap();
        let user = PartialConfig::from_toml(
            r#"
            seed = 9

            [leibniz]
            terms = 1000

            [buffon]
            line_spacing = 2.0
            "#,
        )
        .unwrap();
        config.merge(user);

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.leibniz.terms, 1000);
        assert_eq!(config.leibniz.precision, 28);
        assert_eq!(config.buffon.line_spacing, 2.0);
        assert_eq!(config.buffon.needle_length, 1.0);
        assert_eq!(config.monte_carlo.iterations, 100_000_000);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = PartialConfig::from_toml("[leibniz]\nterm = 5").unwrap_err();
        assert!(err.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(PartialConfig::from_toml(r#"methods = ["archimedes"]"#).is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let mut config = Config::default_config().unwrap();
        config.monte_carlo.iterations = 0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("Monte Carlo Simulation"), "{}", err);
    }

    #[test]
    fn test_validate_skips_unselected_methods() {
        let mut config = Config::default_config().unwrap();
        config.monte_carlo.iterations = 0;
        config.methods = vec![Method::Leibniz];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_needle_longer_than_spacing() {
        let mut config = Config::default_config().unwrap();
        config.buffon.needle_length = 3.0;
        config.buffon.line_spacing = 2.0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("needle geometry"), "{}", err);
    }

    #[test]
    fn test_validate_precision_range() {
        let mut config = Config::default_config().unwrap();
        config.leibniz.precision = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_methods() {
        let mut config = Config::default_config().unwrap();
        config.methods.clear();
        assert_eq!(config.validate(), Err("No methods selected".to_string()));
    }

    #[test]
    fn test_normalize_methods() {
        let mut config = Config::default_config().unwrap();
        config.methods = vec![Method::BuffonNeedle, Method::MonteCarlo, Method::BuffonNeedle];
        config.normalize_methods();
        assert_eq!(config.methods, vec![Method::MonteCarlo, Method::BuffonNeedle]);
    }

    #[test]
    fn test_load_layers_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1\n[monte_carlo]\niterations = 500").unwrap();

        let overrides = PartialConfig {
            seed: Some(2),
            ..PartialConfig::default()
        };
        let config = Config::load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.monte_carlo.iterations, 500);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(
            Some(Path::new("/nonexistent/naive-pi.toml")),
            PartialConfig::default(),
        )
        .unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }
}
