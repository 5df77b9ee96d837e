//! Score keeping

use serde::{Deserialize, Serialize};

/// Running score. Signed and unbounded: a run of lost balls goes negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(i64);

impl Score {
    pub fn new() -> Self {
        Self(0)
    }

    /// Add `delta` points (may be negative)
    pub fn add(&mut self, delta: i64) {
        self.0 += delta;
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
