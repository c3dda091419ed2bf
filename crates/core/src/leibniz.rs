//! Leibniz series for pi
//!
//! π/4 = 1 - 1/3 + 1/5 - 1/7 + 1/9 - ...
//!
//! The series converges as O(1/n), so useful accuracy needs tens of millions
//! of terms. Summing that many terms in `f64` accumulates rounding error, so
//! the primary estimator keeps the running sum in a [`Decimal`] with a fixed
//! number of fractional digits. [`estimate_f64`] is the plain floating point
//! loop, kept for comparison.

use crate::error::EstimateError;
use crate::method::{Estimate, Method};
use crate::progress::Progress;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_TERMS: u64 = 50_000_000;

/// Fewest fractional digits the decimal accumulator may be configured with
pub const MIN_PRECISION: u32 = 20;
/// Most fractional digits a `Decimal` can carry
pub const MAX_PRECISION: u32 = 28;
pub const DEFAULT_PRECISION: u32 = MAX_PRECISION;

/// Decimal result of a Leibniz run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeibnizEstimate {
    pub terms: u64,
    pub precision: u32,
    /// 4 × the partial sum, at `precision` fractional digits
    pub decimal: Decimal,
}

impl LeibnizEstimate {
    /// Lossy view for comparison with the sampling estimators
    pub fn to_estimate(&self) -> Estimate {
        Estimate {
            method: Method::Leibniz,
            samples: self.terms,
            value: self.decimal.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Absolute distance from pi, computed in decimal before narrowing
    pub fn error(&self) -> f64 {
        (self.decimal - Decimal::PI)
            .abs()
            .to_f64()
            .unwrap_or(f64::NAN)
    }

    /// The estimate rounded and zero-padded to `places` fractional digits
    pub fn to_fixed(&self, places: u32) -> String {
        let rounded = self
            .decimal
            .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
        format!("{:.*}", places as usize, rounded)
    }
}

pub fn check_precision(precision: u32) -> Result<(), EstimateError> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(EstimateError::InvalidPrecision {
            precision,
            min: MIN_PRECISION,
            max: MAX_PRECISION,
        })
    }
}

/// Sum of the first `terms` terms of the series, i.e. an approximation of π/4.
///
/// Every term and every partial sum is rounded half-to-even to `precision`
/// fractional digits.
pub fn partial_sum(terms: u64, precision: u32) -> Result<Decimal, EstimateError> {
    let mut progress = Progress::new(Method::Leibniz, terms);
    accumulate(terms, precision, &mut progress)
}

fn accumulate(
    terms: u64,
    precision: u32,
    progress: &mut Progress,
) -> Result<Decimal, EstimateError> {
    if terms == 0 {
        return Err(EstimateError::ZeroIterations {
            method: Method::Leibniz,
        });
    }
    check_precision(precision)?;

    let mut sum = Decimal::ZERO;

    for k in 0..terms {
        let denominator = Decimal::from(2 * k + 1);
        let term = (Decimal::ONE / denominator)
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven);

        // Even k adds, odd k subtracts
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        progress.tick(k + 1);
    }

    Ok(sum)
}

/// Estimate pi as 4 × [`partial_sum`].
pub fn estimate(terms: u64, precision: u32) -> Result<LeibnizEstimate, EstimateError> {
    let mut progress = Progress::new(Method::Leibniz, terms);
    let sum = accumulate(terms, precision, &mut progress)?;
    let decimal = (sum * Decimal::from(4))
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven);

    let result = LeibnizEstimate {
        terms,
        precision,
        decimal,
    };
    progress.finish(result.to_estimate().value);
    Ok(result)
}

/// The same series accumulated in `f64`.
pub fn estimate_f64(terms: u64) -> Result<Estimate, EstimateError> {
    if terms == 0 {
        return Err(EstimateError::ZeroIterations {
            method: Method::Leibniz,
        });
    }

    let mut sum: f64 = 0.0;
    let mut sign: f64 = 1.0;
    for k in 0..terms {
        sum += sign / (2.0 * k as f64 + 1.0);
        sign = -sign;
    }

    Ok(Estimate {
        method: Method::Leibniz,
        samples: terms,
        value: sum * 4.0,
    })
}
