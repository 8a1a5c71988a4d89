//! Per-vertex round decisions over a consistent neighbor snapshot.
//!
//! Once the exchange has landed, each active vertex decides on its own:
//! a selected neighbor excludes it, a strictly extremal key selects it,
//! anything else defers to the next round. No communication happens here.

use std::collections::HashMap;

use crate::context::mis_context::Extremal;
use crate::error::MisError;
use crate::graph::GraphView;
use crate::mis::priority::PriorityKey;
use crate::mis::state::{StatusArena, VertexStatus};
use crate::parallel::BoundaryState;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Outcome for one active vertex this round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    Select,
    Exclude,
    Defer,
}

/// Local ids selected and excluded by the current round's snapshot.
#[derive(Debug, Default)]
pub(crate) struct RoundDecisions {
    pub selected: Vec<usize>,
    pub excluded: Vec<usize>,
}

fn beats(a: PriorityKey, b: PriorityKey, convention: Extremal) -> bool {
    match convention {
        Extremal::Min => a < b,
        Extremal::Max => a > b,
    }
}

fn decide_vertex<G: GraphView>(
    graph: &G,
    arena: &StatusArena,
    priorities: &[u64],
    ghosts: &HashMap<usize, BoundaryState>,
    convention: Extremal,
    local: usize,
) -> Result<Decision, MisError> {
    let own = PriorityKey::new(priorities[local], graph.to_global(local));
    let mut extremal = true;
    for &neighbor in graph.neighbors(local) {
        let (status, key) = match graph.to_local(neighbor) {
            Some(l) => (arena.get(l), PriorityKey::new(priorities[l], neighbor)),
            None => {
                let ghost = ghosts
                    .get(&neighbor)
                    .ok_or(MisError::MissingBoundary(neighbor))?;
                (ghost.status, PriorityKey::new(ghost.priority, neighbor))
            }
        };
        match status {
            VertexStatus::Selected => return Ok(Decision::Exclude),
            VertexStatus::Active => {
                if beats(key, own, convention) {
                    extremal = false;
                }
            }
            VertexStatus::Excluded => {}
        }
    }
    // An isolated active vertex is trivially extremal and selects at once.
    Ok(if extremal {
        Decision::Select
    } else {
        Decision::Defer
    })
}

/// Decides every active local vertex against the round snapshot.
///
/// Reads only; the caller applies the transitions afterwards so all
/// decisions in a round observe the same state.
pub(crate) fn decide_round<G: GraphView>(
    graph: &G,
    arena: &StatusArena,
    priorities: &[u64],
    ghosts: &HashMap<usize, BoundaryState>,
    convention: Extremal,
) -> Result<RoundDecisions, MisError> {
    let active = |local: &usize| !arena.get(*local).is_terminal();

    #[cfg(feature = "rayon")]
    let decided: Vec<(usize, Decision)> = (0..graph.local_count())
        .into_par_iter()
        .filter(active)
        .map(|local| {
            decide_vertex(graph, arena, priorities, ghosts, convention, local)
                .map(|d| (local, d))
        })
        .collect::<Result<_, _>>()?;

    #[cfg(not(feature = "rayon"))]
    let decided: Vec<(usize, Decision)> = (0..graph.local_count())
        .filter(active)
        .map(|local| {
            decide_vertex(graph, arena, priorities, ghosts, convention, local)
                .map(|d| (local, d))
        })
        .collect::<Result<_, _>>()?;

    let mut out = RoundDecisions::default();
    for (local, decision) in decided {
        match decision {
            Decision::Select => out.selected.push(local),
            Decision::Exclude => out.excluded.push(local),
            Decision::Defer => {}
        }
    }
    Ok(out)
}
