//! Round-driving state machine for a collective selection run.
//!
//! One coordinator runs per partition. Every round it draws fresh
//! priorities, trades boundary snapshots with peer partitions, lets the
//! decision engine settle the local vertices, and reduces the global
//! active count to test convergence. Rounds are lock-step: the exchange is
//! the single suspension point, and no rank starts deciding round `k`
//! before it holds all peer data for round `k`.

use std::collections::HashMap;

use crate::config::MisOptions;
use crate::error::MisError;
use crate::graph::GraphView;
use crate::mis::decision::decide_round;
use crate::mis::priority::{assign_round, RngService};
use crate::mis::state::StatusArena;
use crate::mis::MisOutcome;
use crate::parallel::{BoundaryState, Comm};
use crate::utils::convergence::Convergence;

/// Phase of the round state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundState {
    Init,
    Exchanging,
    Deciding,
    Converged,
}

/// Which local vertices each peer partition needs every round.
///
/// The graph is immutable for the whole run, so the boundary sets are
/// computed once up front. Terminal vertices keep being sent: peers need
/// to observe the terminal status at least once to exclude themselves.
struct ExchangePlan {
    per_peer: Vec<Vec<usize>>,
}

impl ExchangePlan {
    fn build<G: GraphView>(graph: &G) -> Self {
        let mut per_peer = vec![Vec::new(); graph.partitions()];
        for local in 0..graph.local_count() {
            for &neighbor in graph.neighbors(local) {
                let owner = graph.owner_of(neighbor);
                if owner != graph.rank() {
                    per_peer[owner].push(local);
                }
            }
        }
        for peers in &mut per_peer {
            peers.sort_unstable();
            peers.dedup();
        }
        Self { per_peer }
    }

    fn outbound(
        &self,
        graph: &impl GraphView,
        arena: &StatusArena,
        priorities: &[u64],
    ) -> Vec<Vec<BoundaryState>> {
        self.per_peer
            .iter()
            .map(|locals| {
                locals
                    .iter()
                    .map(|&local| BoundaryState {
                        vertex: graph.to_global(local),
                        priority: priorities[local],
                        status: arena.get(local),
                    })
                    .collect()
            })
            .collect()
    }
}

pub struct RoundCoordinator<'a, G: GraphView, R: RngService + ?Sized, C: Comm> {
    graph: &'a G,
    rng: &'a R,
    comm: &'a C,
    opts: &'a MisOptions,
    arena: StatusArena,
    priorities: Vec<u64>,
    ghosts: HashMap<usize, BoundaryState>,
    plan: ExchangePlan,
    state: RoundState,
    round: usize,
}

impl<'a, G: GraphView, R: RngService + ?Sized, C: Comm> std::fmt::Debug
    for RoundCoordinator<'a, G, R, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundCoordinator")
            .field("round", &self.round)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a, G: GraphView, R: RngService + ?Sized, C: Comm> RoundCoordinator<'a, G, R, C> {
    /// Validates inputs and prepares round 0. Fails fast before any
    /// exchange if the graph or the rank/partition pairing is broken.
    pub fn new(
        graph: &'a G,
        rng: &'a R,
        comm: &'a C,
        opts: &'a MisOptions,
    ) -> Result<Self, MisError> {
        if graph.partitions() != comm.size() || graph.rank() != comm.rank() {
            return Err(MisError::Config(format!(
                "graph partition {}/{} does not match communicator rank {}/{}",
                graph.rank(),
                graph.partitions(),
                comm.rank(),
                comm.size(),
            )));
        }
        graph.validate(opts.checks)?;
        let local = graph.local_count();
        Ok(Self {
            graph,
            rng,
            comm,
            opts,
            arena: StatusArena::new(local),
            priorities: vec![0; local],
            ghosts: HashMap::new(),
            plan: ExchangePlan::build(graph),
            state: RoundState::Init,
            round: 0,
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn round(&self) -> usize {
        self.round
    }

    /// Runs rounds until the global active count reaches zero.
    pub fn run(mut self) -> Result<MisOutcome, MisError> {
        let conv = Convergence {
            max_rounds: self.opts.max_rounds,
        };
        loop {
            assign_round(
                self.rng,
                &self.arena,
                self.graph.owned_range().start,
                self.round,
                &mut self.priorities,
            );

            self.state = RoundState::Exchanging;
            let outbound = self.plan.outbound(self.graph, &self.arena, &self.priorities);
            for received in self.comm.exchange(&outbound)? {
                self.ghosts.insert(received.vertex, received);
            }

            self.state = RoundState::Deciding;
            let decisions = decide_round(
                self.graph,
                &self.arena,
                &self.priorities,
                &self.ghosts,
                self.opts.convention,
            )?;
            for &local in &decisions.excluded {
                self.arena.mark_excluded(local);
            }
            for &local in &decisions.selected {
                self.arena.mark_selected(local);
            }
            // Neighbors of a fresh winner are settled locally in the same
            // round; remote neighbors learn of it in the next exchange.
            for &local in &decisions.selected {
                for &neighbor in self.graph.neighbors(local) {
                    if let Some(l) = self.graph.to_local(neighbor) {
                        self.arena.mark_excluded(l);
                    }
                }
            }

            let active_global = self
                .comm
                .all_reduce_sum(self.arena.active_count() as u64)?;
            self.round += 1;
            log::debug!(
                "rank {} round {}: {} selected, {} locally active, {} globally active",
                self.comm.rank(),
                self.round,
                decisions.selected.len(),
                self.arena.active_count(),
                active_global,
            );

            let (stop, stats) = conv.check(
                active_global,
                self.arena.selected_locals().len(),
                self.round,
            );
            if stats.converged {
                self.state = RoundState::Converged;
                let first = self.graph.owned_range().start;
                let selected = self
                    .arena
                    .selected_locals()
                    .into_iter()
                    .map(|local| first + local)
                    .collect();
                return Ok(MisOutcome { selected, stats });
            }
            if stop {
                return Err(MisError::RoundLimit(self.opts.max_rounds));
            }
        }
    }
}
