//! Configured entry point for selection runs.
//!
//! `MisContext` plays the factory role: pick a convention and seed once,
//! then run the same configuration against any partitioned graph and
//! communicator pair. For one-off calls the free functions in
//! [`crate::mis`] are equivalent.

use crate::config::MisOptions;
use crate::error::MisError;
use crate::graph::GraphView;
use crate::mis::priority::SeededPriorityRng;
use crate::mis::{compute_mis_with, MisOutcome, RngService};
use crate::parallel::Comm;

/// Which end of the priority order wins a round.
///
/// Either convention yields a valid maximal independent set; `Min` is the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extremal {
    /// The strictly smallest composite key among active neighbors wins.
    #[default]
    Min,
    /// The strictly largest composite key among active neighbors wins.
    Max,
}

/// Context and configuration for selection runs.
pub struct MisContext {
    /// Selection parameters used by every `compute` call.
    pub opts: MisOptions,
}

impl MisContext {
    pub fn new(opts: MisOptions) -> Self {
        Self { opts }
    }

    /// Runs selection with the configured options and the default seeded
    /// priority generator. Collective across all ranks of `comm`.
    pub fn compute<G: GraphView, C: Comm>(
        &self,
        graph: &G,
        comm: &C,
    ) -> Result<MisOutcome, MisError> {
        let rng = SeededPriorityRng::new(self.opts.seed);
        compute_mis_with(graph, &rng, comm, &self.opts)
    }

    /// Runs selection with a caller-provided priority source.
    pub fn compute_with_rng<G, R, C>(
        &self,
        graph: &G,
        rng: &R,
        comm: &C,
    ) -> Result<MisOutcome, MisError>
    where
        G: GraphView,
        R: RngService + ?Sized,
        C: Comm,
    {
        compute_mis_with(graph, rng, comm, &self.opts)
    }
}

impl Default for MisContext {
    fn default() -> Self {
        Self::new(MisOptions::default())
    }
}
