//! MPI-based communicator for distributed-memory selection runs.
//!
//! Implements the `Comm` trait over the MPI backend: barrier, sum
//! reduction of active counts, and a variable-count all-to-all for the
//! boundary exchange. Boundary states travel as flat `u64` triples
//! `(vertex, priority, status)` so no derived datatypes are needed.
//! Only available when the `mpi` feature is enabled.

use mpi::datatype::{Partition, PartitionMut};
use mpi::environment::Universe;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;
use mpi::Count;

use crate::error::MisError;
use crate::mis::state::VertexStatus;
use crate::parallel::{BoundaryState, Comm};

pub struct MpiComm {
    /// Keeps the MPI environment alive for the lifetime of the communicator.
    _universe: Universe,
    /// The MPI world communicator (all processes in the job).
    pub world: SimpleCommunicator,
    /// The rank (ID) of this process within the communicator.
    pub rank: usize,
    /// The total number of processes in the communicator.
    pub size: usize,
}

impl MpiComm {
    /// Initializes MPI and constructs a new `MpiComm` instance.
    ///
    /// # Panics
    /// Panics if MPI initialization fails.
    pub fn new() -> Self {
        let universe = mpi::initialize().unwrap();
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        MpiComm {
            _universe: universe,
            world,
            rank,
            size,
        }
    }
}

impl Comm for MpiComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.world.barrier();
    }

    fn all_reduce_sum(&self, x: u64) -> Result<u64, MisError> {
        use mpi::collective::SystemOperation;
        let mut y = 0u64;
        self.world
            .all_reduce_into(&x, &mut y, &SystemOperation::sum());
        Ok(y)
    }

    fn exchange(&self, outbound: &[Vec<BoundaryState>]) -> Result<Vec<BoundaryState>, MisError> {
        if outbound.len() != self.size {
            return Err(MisError::Exchange {
                peer: self.rank,
                reason: format!(
                    "outbound has {} slots for {} ranks",
                    outbound.len(),
                    self.size
                ),
            });
        }

        // Flatten to u64 triples, one contiguous block per destination rank.
        let mut send = Vec::new();
        let mut send_counts = Vec::with_capacity(self.size);
        for states in outbound {
            for s in states {
                send.push(s.vertex as u64);
                send.push(s.priority);
                send.push(s.status.to_wire());
            }
            send_counts.push((states.len() * 3) as Count);
        }

        let mut recv_counts = vec![0 as Count; self.size];
        self.world
            .all_to_all_into(&send_counts[..], &mut recv_counts[..]);

        let displs = |counts: &[Count]| {
            let mut at = 0 as Count;
            counts
                .iter()
                .map(|&c| {
                    let d = at;
                    at += c;
                    d
                })
                .collect::<Vec<Count>>()
        };
        let send_displs = displs(&send_counts);
        let recv_displs = displs(&recv_counts);
        let total: Count = recv_counts.iter().sum();

        let mut recv = vec![0u64; total as usize];
        {
            let send_part = Partition::new(&send[..], &send_counts[..], &send_displs[..]);
            let mut recv_part =
                PartitionMut::new(&mut recv[..], &recv_counts[..], &recv_displs[..]);
            self.world
                .all_to_all_varcount_into(&send_part, &mut recv_part);
        }

        recv.chunks_exact(3)
            .map(|t| {
                Ok(BoundaryState {
                    vertex: t[0] as usize,
                    priority: t[1],
                    status: VertexStatus::from_wire(t[2])?,
                })
            })
            .collect()
    }
}
