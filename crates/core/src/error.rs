//! Estimator errors
//!
//! Two kinds of failure exist. Invalid configuration (zero sample count,
//! precision outside the supported range, impossible needle geometry) is
//! detected before any sampling starts. A degenerate outcome (no needle ever
//! crossed a line) is reported as inconclusive instead of dividing by zero.

use crate::method::Method;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("{method}: sample count must be greater than zero")]
    ZeroIterations { method: Method },

    #[error("decimal precision {precision} is outside the supported range {min}..={max}")]
    InvalidPrecision { precision: u32, min: u32, max: u32 },

    #[error(
        "invalid needle geometry: length {needle_length} and spacing {line_spacing} \
         require 0 < length <= spacing"
    )]
    InvalidGeometry {
        needle_length: f64,
        line_spacing: f64,
    },

    #[error("{method}: no hits after {samples} samples, estimate is undefined")]
    Inconclusive { method: Method, samples: u64 },
}

impl EstimateError {
    /// True for a completed run that produced no usable estimate,
    /// false for configuration that was rejected up front.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, EstimateError::Inconclusive { .. })
    }
}
