//! Buffon's needle
//!
//! A needle of length `L` dropped on a floor ruled with parallel lines `D`
//! apart (`L <= D`) crosses a line with probability `2L / (πD)`. Counting
//! crossings over `n` drops gives `π ≈ 2Ln / (D · crossings)`.
//!
//! By symmetry only the distance from the needle's centre to the nearest line,
//! in `[0, D/2]`, and the acute angle to the lines, in `[0, π/2)`, need
//! sampling.

use crate::error::EstimateError;
use crate::method::{Estimate, Method};
use crate::progress::Progress;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

pub const DEFAULT_DROPS: u64 = 10_000_000;

/// Needle length and line spacing, validated so that `0 < length <= spacing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleGeometry {
    needle_length: f64,
    line_spacing: f64,
}

impl NeedleGeometry {
    pub fn new(needle_length: f64, line_spacing: f64) -> Result<Self, EstimateError> {
        let valid = needle_length.is_finite()
            && line_spacing.is_finite()
            && needle_length > 0.0
            && needle_length <= line_spacing;
        if !valid {
            return Err(EstimateError::InvalidGeometry {
                needle_length,
                line_spacing,
            });
        }
        Ok(NeedleGeometry {
            needle_length,
            line_spacing,
        })
    }

    pub fn needle_length(&self) -> f64 {
        self.needle_length
    }

    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }
}

impl Default for NeedleGeometry {
    fn default() -> Self {
        NeedleGeometry {
            needle_length: 1.0,
            line_spacing: 1.0,
        }
    }
}

/// Estimate pi from `drops` simulated needle drops.
///
/// Returns [`EstimateError::Inconclusive`] when no drop crossed a line.
pub fn estimate<R: Rng + ?Sized>(
    drops: u64,
    geometry: NeedleGeometry,
    rng: &mut R,
) -> Result<Estimate, EstimateError> {
    if drops == 0 {
        return Err(EstimateError::ZeroIterations {
            method: Method::BuffonNeedle,
        });
    }

    let half_length = geometry.needle_length / 2.0;
    let half_spacing = geometry.line_spacing / 2.0;

    let mut progress = Progress::new(Method::BuffonNeedle, drops);
    let mut crossings: u64 = 0;

    for i in 1..=drops {
        let offset = rng.gen_range(0.0..=half_spacing);
        let angle = rng.gen_range(0.0..FRAC_PI_2);
        if offset <= half_length * angle.sin() {
            crossings += 1;
        }
        progress.tick(i);
    }

    if crossings == 0 {
        warn!(drops, "no needle crossed a line");
        return Err(EstimateError::Inconclusive {
            method: Method::BuffonNeedle,
            samples: drops,
        });
    }

    let value = (2.0 * geometry.needle_length * drops as f64)
        / (geometry.line_spacing * crossings as f64);
    progress.finish(value);

    Ok(Estimate {
        method: Method::BuffonNeedle,
        samples: drops,
        value,
    })
}
