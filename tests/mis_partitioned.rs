//! Multi-partition selection runs over in-process ranks.
//!
//! Splits one global graph into K contiguous partitions, runs the
//! collective on one thread per rank, and checks that the union of the
//! per-rank selections is a valid maximal independent set of the whole
//! graph regardless of K.

use std::sync::Arc;
use std::thread;

use luby::config::MisOptions;
use luby::graph::{CsrGraphView, PartitionLayout};
use luby::mis::{compute_mis_with, MisOutcome, SeededPriorityRng};
use luby::parallel::ThreadComm;
use luby::utils::verify::verify_mis;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_adjacency(n: usize, edge_probability: f64, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut adjacency = vec![Vec::new(); n];
    for u in 0..n {
        for v in u + 1..n {
            if rng.gen_bool(edge_probability) {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }
    }
    adjacency
}

fn run_partitioned(
    adjacency: &Arc<Vec<Vec<usize>>>,
    partitions: usize,
    opts: &MisOptions,
) -> Vec<MisOutcome> {
    let layout = PartitionLayout::contiguous(adjacency.len(), partitions);
    let handles: Vec<_> = ThreadComm::create(partitions)
        .into_iter()
        .enumerate()
        .map(|(rank, comm)| {
            let adjacency = Arc::clone(adjacency);
            let layout = layout.clone();
            let opts = opts.clone();
            thread::spawn(move || {
                let graph = CsrGraphView::from_global_adjacency(&adjacency, layout, rank);
                let rng = SeededPriorityRng::new(opts.seed);
                compute_mis_with(&graph, &rng, &comm, &opts).unwrap()
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

fn union_selected(outcomes: &[MisOutcome]) -> Vec<usize> {
    let mut selected: Vec<usize> = outcomes.iter().flat_map(|o| o.selected.clone()).collect();
    selected.sort_unstable();
    selected
}

#[test]
fn cycle_graph_is_valid_for_every_partition_count() {
    let n = 12;
    let adjacency: Vec<Vec<usize>> = (0..n).map(|u| vec![(u + n - 1) % n, (u + 1) % n]).collect();
    let adjacency = Arc::new(adjacency);
    for partitions in 1..=4 {
        let outcomes = run_partitioned(&adjacency, partitions, &MisOptions::default());
        let selected = union_selected(&outcomes);
        assert!(
            verify_mis(&adjacency, &selected),
            "invalid set with {partitions} partitions: {selected:?}"
        );
    }
}

#[test]
fn random_graph_is_valid_for_every_partition_count() {
    let adjacency = Arc::new(random_adjacency(48, 0.12, 2024));
    for partitions in [1, 2, 3, 5] {
        let outcomes = run_partitioned(&adjacency, partitions, &MisOptions::default());
        let selected = union_selected(&outcomes);
        assert!(
            verify_mis(&adjacency, &selected),
            "invalid set with {partitions} partitions: {selected:?}"
        );
    }
}

#[test]
fn all_ranks_agree_on_round_count() {
    let adjacency = Arc::new(random_adjacency(40, 0.15, 11));
    let outcomes = run_partitioned(&adjacency, 3, &MisOptions::default());
    let rounds = outcomes[0].stats.rounds;
    assert!(outcomes.iter().all(|o| o.stats.rounds == rounds));
    assert!(outcomes.iter().all(|o| o.stats.converged));
}

#[test]
fn fixed_seed_and_layout_reproduce_the_same_set() {
    let adjacency = Arc::new(random_adjacency(40, 0.15, 5));
    let opts = MisOptions {
        seed: 0xF00D,
        ..MisOptions::default()
    };
    let first = union_selected(&run_partitioned(&adjacency, 3, &opts));
    let second = union_selected(&run_partitioned(&adjacency, 3, &opts));
    assert_eq!(first, second);
}

#[test]
fn cut_heavy_graph_still_converges() {
    // Complete bipartite K(6,6) split right down the cut: every edge
    // crosses the partition boundary.
    let n = 12;
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|u| {
            if u < 6 {
                (6..n).collect()
            } else {
                (0..6).collect()
            }
        })
        .collect();
    let adjacency = Arc::new(adjacency);
    let outcomes = run_partitioned(&adjacency, 2, &MisOptions::default());
    let selected = union_selected(&outcomes);
    assert!(verify_mis(&adjacency, &selected));
    // One side of the bipartition wins whole.
    assert_eq!(selected.len(), 6);
}
