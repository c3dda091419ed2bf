//! Coarse progress events for long-running estimators
//!
//! Emits an `info!` event at every tenth of the run. Short runs (under
//! [`MIN_REPORTED_SAMPLES`]) stay silent.

use crate::method::Method;
use std::time::Instant;
use tracing::info;

pub const MIN_REPORTED_SAMPLES: u64 = 1_000_000;

pub struct Progress {
    method: Method,
    total: u64,
    /// Samples between events; zero disables reporting
    step: u64,
    next: u64,
    done: u64,
    started: Instant,
}

impl Progress {
    pub fn new(method: Method, total: u64) -> Self {
        let step = if total >= MIN_REPORTED_SAMPLES {
            total / 10
        } else {
            0
        };
        Progress {
            method,
            total,
            step,
            next: step,
            done: 0,
            started: Instant::now(),
        }
    }

    /// Record that `done` samples have completed
    #[inline]
    pub fn tick(&mut self, done: u64) {
        self.done = done;
        if self.step != 0 && done == self.next {
            self.report(done);
            self.next += self.step;
        }
    }

    #[cold]
    fn report(&self, done: u64) {
        info!(
            method = self.method.name(),
            done,
            total = self.total,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "{}% complete",
            done * 100 / self.total
        );
    }

    /// Samples recorded so far
    pub fn done(&self) -> u64 {
        self.done
    }

    /// Log completion of the run
    pub fn finish(&self, value: f64) {
        info!(
            method = self.method.name(),
            samples = self.total,
            value,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "estimate complete"
        );
    }
}
