//! API options for selection runs.
//!
//! This module provides the `MisOptions` struct, which carries the knobs a
//! caller may want to turn: the extremal convention, the priority seed, a
//! round cap for runaway inputs, and which input validations to perform.

use crate::context::mis_context::Extremal;
use crate::graph::GraphChecks;

/// Selection parameters.
#[derive(Debug, Clone)]
pub struct MisOptions {
    /// Whether the smallest or the largest composite key wins a round.
    pub convention: Extremal,

    /// Seed for the default priority generator.
    pub seed: u64,

    /// Upper bound on rounds before the run fails with a round-limit
    /// error. Expected rounds are logarithmic in vertex count, so the
    /// default leaves ample headroom.
    pub max_rounds: usize,

    /// Input validations to run before round 0.
    pub checks: GraphChecks,
}

impl Default for MisOptions {
    fn default() -> Self {
        Self {
            convention: Extremal::Min,
            seed: 0x5EED,
            max_rounds: 10_000,
            checks: GraphChecks::default(),
        }
    }
}
