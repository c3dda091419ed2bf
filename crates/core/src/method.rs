//! Estimation methods and their results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference value of pi to 20 decimal places, used for display.
pub const REFERENCE_PI: &str = "3.14159265358979323846";

/// One of the three estimation methods.
///
/// The declaration order is the order the driver runs them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    MonteCarlo,
    Leibniz,
    BuffonNeedle,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::MonteCarlo, Method::Leibniz, Method::BuffonNeedle];

    /// Stable name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            Method::MonteCarlo => "monte-carlo",
            Method::Leibniz => "leibniz",
            Method::BuffonNeedle => "buffon-needle",
        }
    }

    /// Section heading in the human report
    pub fn label(&self) -> &'static str {
        match self {
            Method::MonteCarlo => "Monte Carlo Simulation",
            Method::Leibniz => "Leibniz Formula",
            Method::BuffonNeedle => "Buffon's Needle",
        }
    }

    /// Row name in the summary table
    pub fn short_label(&self) -> &'static str {
        match self {
            Method::MonteCarlo => "Monte Carlo",
            Method::Leibniz => "Leibniz",
            Method::BuffonNeedle => "Buffon Needle",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Method::ALL.iter().map(|m| m.name()).collect();
                format!("Unknown method '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// The result of a single estimator run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub method: Method,
    /// Iterations, terms or drops that went into the estimate
    pub samples: u64,
    pub value: f64,
}

impl Estimate {
    /// Absolute distance from pi
    pub fn error(&self) -> f64 {
        (self.value - std::f64::consts::PI).abs()
    }
}
