//! Monte Carlo estimation of pi
//!
//! Points drawn uniformly from the unit square land inside the inscribed
//! quarter circle with probability π/4, so `4 * hits / n` estimates pi.

use crate::error::EstimateError;
use crate::method::{Estimate, Method};
use crate::progress::Progress;
use rand::Rng;

pub const DEFAULT_ITERATIONS: u64 = 100_000_000;

/// Estimate pi from `iterations` random points.
///
/// The result always lies in `[0, 4]`.
pub fn estimate<R: Rng + ?Sized>(iterations: u64, rng: &mut R) -> Result<Estimate, EstimateError> {
    if iterations == 0 {
        return Err(EstimateError::ZeroIterations {
            method: Method::MonteCarlo,
        });
    }

    let mut progress = Progress::new(Method::MonteCarlo, iterations);
    let mut hits: u64 = 0;

    for i in 1..=iterations {
        let x = rng.gen_range(0.0_f64..1.0);
        let y = rng.gen_range(0.0_f64..1.0);
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
        progress.tick(i);
    }

    let value = 4.0 * hits as f64 / iterations as f64;
    progress.finish(value);

    Ok(Estimate {
        method: Method::MonteCarlo,
        samples: iterations,
        value,
    })
}
