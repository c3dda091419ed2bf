//! Reporting driver
//!
//! Runs the selected estimators one after another and writes either the
//! human-readable report or a JSON document.
//!
//! Human output looks like:
//!
//! ```text
//! Method 1: Monte Carlo Simulation
//! ------------------------------------------------------------
//! Generating 100,000,000 random points...
//! Estimated pi: 3.14160123999999987398
//! ```
//!
//! followed by a summary table comparing every estimate with the reference
//! value.

use crate::config::{Config, OutputFormat};
use naive_pi_core::{EstimateError, Method, REFERENCE_PI, buffon, leibniz, monte_carlo, seeded_rng};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{info, warn};

/// Digits after the decimal point in every printed estimate
pub const DISPLAY_PLACES: usize = 20;

const RULE_WIDTH: usize = 60;
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// What one estimator run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Estimated {
        /// Estimate to [`DISPLAY_PLACES`] decimal places
        value: String,
        /// Absolute distance from pi
        error: f64,
    },
    /// No estimate; carries the reason
    Inconclusive { inconclusive: String },
}

/// Result of one estimator run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodResult {
    pub method: Method,
    pub samples: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl MethodResult {
    /// The formatted estimate, if the run produced one
    pub fn value(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Estimated { value, .. } => Some(value),
            Outcome::Inconclusive { .. } => None,
        }
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self.outcome, Outcome::Inconclusive { .. })
    }
}

/// Results of a whole run, in run order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub seed: Option<u64>,
    pub reference: &'static str,
    pub results: Vec<MethodResult>,
}

/// Run every selected method and write the report to `out`.
///
/// `config` is expected to have passed [`Config::validate`]. Inconclusive
/// runs are recorded in the report; any other estimator error aborts.
pub fn run<W: Write>(config: &Config, color: bool, out: &mut W) -> Result<Report, String> {
    let human = config.output.format == OutputFormat::Human;
    let io_err = |e: io::Error| format!("Failed to write report: {}", e);

    if human {
        write_banner(out, "Pi Calculator").map_err(io_err)?;
        writeln!(out).map_err(io_err)?;
    }

    let mut results = Vec::with_capacity(config.methods.len());
    for (index, &method) in config.methods.iter().enumerate() {
        let samples = config.samples(method);
        if human {
            writeln!(out, "Method {}: {}", index + 1, method.label()).map_err(io_err)?;
            writeln!(out, "{}", "-".repeat(RULE_WIDTH)).map_err(io_err)?;
            writeln!(out, "{}", progress_line(method, samples)).map_err(io_err)?;
        }

        info!(method = method.name(), samples, "Starting estimate");
        let result = run_method(config, method)?;

        if human {
            match &result.outcome {
                Outcome::Estimated { value, .. } => writeln!(out, "Estimated pi: {}", value),
                Outcome::Inconclusive { inconclusive } => {
                    writeln!(out, "Estimated pi: inconclusive ({})", inconclusive)
                }
            }
            .map_err(io_err)?;
            writeln!(out).map_err(io_err)?;
        }
        results.push(result);
    }

    let report = Report {
        seed: config.seed,
        reference: REFERENCE_PI,
        results,
    };

    match config.output.format {
        OutputFormat::Human => write_summary(out, &report, color).map_err(io_err)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to encode report: {}", e))?;
            writeln!(out, "{}", json).map_err(io_err)?;
        }
    }
    Ok(report)
}

/// Run a single estimator with its configured settings
pub fn run_method(config: &Config, method: Method) -> Result<MethodResult, String> {
    let samples = config.samples(method);
    let outcome = match method {
        Method::MonteCarlo => {
            let mut rng = seeded_rng(method_seed(config.seed, method));
            monte_carlo::estimate(samples, &mut rng)
                .map(|e| (format!("{:.*}", DISPLAY_PLACES, e.value), e.error()))
        }
        Method::Leibniz => leibniz::estimate(samples, config.leibniz.precision)
            .map(|e| (e.to_fixed(DISPLAY_PLACES as u32), e.error())),
        Method::BuffonNeedle => {
            let mut rng = seeded_rng(method_seed(config.seed, method));
            config.buffon.geometry().and_then(|geometry| {
                buffon::estimate(samples, geometry, &mut rng)
                    .map(|e| (format!("{:.*}", DISPLAY_PLACES, e.value), e.error()))
            })
        }
    };

    let outcome = match outcome {
        Ok((value, error)) => Outcome::Estimated { value, error },
        Err(e @ EstimateError::Inconclusive { .. }) => {
            warn!(method = method.name(), samples, "{}", e);
            Outcome::Inconclusive {
                inconclusive: e.to_string(),
            }
        }
        Err(e) => return Err(e.to_string()),
    };

    Ok(MethodResult {
        method,
        samples,
        outcome,
    })
}

/// Seed for one method's random source.
///
/// Each sampling method gets its own stream so that selecting a subset of
/// methods does not change any individual result.
pub fn method_seed(seed: Option<u64>, method: Method) -> Option<u64> {
    let offset = match method {
        Method::MonteCarlo | Method::Leibniz => 0,
        Method::BuffonNeedle => 1,
    };
    seed.map(|s| s.wrapping_add(offset))
}

fn progress_line(method: Method, samples: u64) -> String {
    let count = with_thousands(samples);
    match method {
        Method::MonteCarlo => format!("Generating {} random points...", count),
        Method::Leibniz => format!("Calculating {} terms...", count),
        Method::BuffonNeedle => format!("Dropping {} needles...", count),
    }
}

fn write_banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn write_summary<W: Write>(out: &mut W, report: &Report, color: bool) -> io::Result<()> {
    write_banner(out, "Results Summary")?;
    writeln!(out, "{:<20} {:<25} {:<15}", "Method", "Value", "Error")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for result in &report.results {
        let label = result.method.short_label();
        match &result.outcome {
            Outcome::Estimated { value, error } => {
                let shown = if color {
                    highlight_divergence(value, report.reference)
                } else {
                    value.clone()
                };
                // Pad by visible width; escape codes take no columns
                let padding = 25usize.saturating_sub(value.chars().count());
                writeln!(
                    out,
                    "{:<20} {}{} {:.10e}",
                    label,
                    shown,
                    " ".repeat(padding),
                    error
                )?;
            }
            Outcome::Inconclusive { .. } => {
                writeln!(out, "{:<20} {:<25} {:<15}", label, "inconclusive", "-")?
            }
        }
    }

    writeln!(out, "{:<20} {:<25}", "Actual π", report.reference)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)
}

/// Wrap everything from the first character where `value` departs from
/// `reference` in red.
pub fn highlight_divergence(value: &str, reference: &str) -> String {
    let split = value
        .char_indices()
        .zip(reference.chars())
        .find(|((_, v), r)| v != r)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| value.len().min(reference.len()));

    if split == value.len() {
        return value.to_string();
    }
    format!("{}{}{}{}", &value[..split], RED, &value[split..], RESET)
}

/// Format an integer with `,` between groups of three digits
pub fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
