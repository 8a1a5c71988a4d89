//! Randomized round-based maximal independent set selection.
//!
//! The entry points here are collective: with a multi-rank communicator,
//! every partition must call [`compute_mis`] (or [`compute_mis_with`])
//! together, each passing its own view of the graph. The returned set is
//! independent (no two members adjacent) and maximal (every excluded
//! vertex has a selected neighbor); its size is not maximized.

pub mod coordinator;
pub mod decision;
pub mod priority;
pub mod state;

pub use coordinator::{RoundCoordinator, RoundState};
pub use priority::{PriorityKey, RngService, SeededPriorityRng};
pub use state::{StatusArena, VertexStatus};

use crate::config::MisOptions;
use crate::error::MisError;
use crate::graph::GraphView;
use crate::parallel::Comm;
use crate::utils::convergence::MisStats;

/// Result of one selection run, per partition.
#[derive(Debug, Clone)]
pub struct MisOutcome {
    /// Global ids of the locally-owned selected vertices, ascending.
    pub selected: Vec<usize>,
    /// Round count and convergence info.
    pub stats: MisStats,
}

/// Computes a maximal independent set with default options.
///
/// Collective across all ranks of `comm`; each rank receives the selected
/// vertices of its own partition.
pub fn compute_mis<G: GraphView, C: Comm>(graph: &G, comm: &C) -> Result<MisOutcome, MisError> {
    let opts = MisOptions::default();
    let rng = SeededPriorityRng::new(opts.seed);
    compute_mis_with(graph, &rng, comm, &opts)
}

/// Computes a maximal independent set with an injected priority source and
/// explicit options.
pub fn compute_mis_with<G, R, C>(
    graph: &G,
    rng: &R,
    comm: &C,
    opts: &MisOptions,
) -> Result<MisOutcome, MisError>
where
    G: GraphView,
    R: RngService + ?Sized,
    C: Comm,
{
    RoundCoordinator::new(graph, rng, comm, opts)?.run()
}
