//! Naive pi estimators
//!
//! Three deliberately simple ways to approximate pi, each a single bounded
//! loop with O(1) state:
//!
//! - [`monte_carlo`]: random points in the unit square vs. the quarter circle
//! - [`leibniz`]: the alternating series 1 - 1/3 + 1/5 - ... in decimal arithmetic
//! - [`buffon`]: needle drops across parallel lines
//!
//! The sampling estimators take any [`rand::Rng`]; use [`seeded_rng`] for
//! reproducible runs.
//!
//! ```
//! use naive_pi_core::{monte_carlo, seeded_rng};
//!
//! let mut rng = seeded_rng(Some(7));
//! let estimate = monte_carlo::estimate(10_000, &mut rng).unwrap();
//! assert!((0.0..=4.0).contains(&estimate.value));
//! ```

pub mod buffon;
pub mod error;
pub mod leibniz;
pub mod method;
pub mod monte_carlo;
pub mod progress;

pub use buffon::NeedleGeometry;
pub use error::EstimateError;
pub use leibniz::LeibnizEstimate;
pub use method::{Estimate, Method, REFERENCE_PI};
pub use rust_decimal::Decimal;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random source for the sampling estimators.
///
/// `Some(seed)` is deterministic; `None` seeds from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
