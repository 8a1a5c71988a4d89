use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::thread;

use luby::config::MisOptions;
use luby::graph::{CsrGraphView, PartitionLayout};
use luby::mis::{compute_mis, compute_mis_with, SeededPriorityRng};
use luby::parallel::{default_partitions, SerialComm, ThreadComm};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_adjacency(n: usize, degree: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut adjacency = vec![Vec::new(); n];
    for u in 0..n {
        for _ in 0..degree {
            let v = rng.gen_range(0..n);
            if u != v && !adjacency[u].contains(&v) {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }
    }
    adjacency
}

fn bench_single_partition(c: &mut Criterion) {
    let adjacency = random_adjacency(2000, 8, 42);
    let graph = CsrGraphView::from_adjacency(&adjacency);

    c.bench_function("mis single partition n=2000", |ben| {
        ben.iter(|| compute_mis(black_box(&graph), &SerialComm).unwrap())
    });
}

fn bench_multi_partition(c: &mut Criterion) {
    let partitions = default_partitions().min(4);
    let adjacency = Arc::new(random_adjacency(2000, 8, 42));
    let layout = PartitionLayout::contiguous(adjacency.len(), partitions);

    c.bench_function("mis multi partition n=2000", |ben| {
        ben.iter(|| {
            let handles: Vec<_> = ThreadComm::create(partitions)
                .into_iter()
                .enumerate()
                .map(|(rank, comm)| {
                    let adjacency = Arc::clone(&adjacency);
                    let layout = layout.clone();
                    thread::spawn(move || {
                        let graph =
                            CsrGraphView::from_global_adjacency(&adjacency, layout, rank);
                        let opts = MisOptions::default();
                        let rng = SeededPriorityRng::new(opts.seed);
                        compute_mis_with(&graph, &rng, &comm, &opts).unwrap()
                    })
                })
                .collect();
            for h in handles {
                black_box(h.join().unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_single_partition, bench_multi_partition);
criterion_main!(benches);
