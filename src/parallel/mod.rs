//! Cross-partition communication for collective selection runs.
//!
//! One [`Comm`] rank drives one graph partition. The trait covers exactly
//! the collectives the round loop needs: a barrier, a sum reduction for the
//! global active count, and a boundary-state exchange between neighboring
//! partitions.

use crate::error::MisError;
use crate::mis::state::VertexStatus;

/// Per-round snapshot of one boundary vertex, as sent to peer partitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryState {
    /// Global vertex id.
    pub vertex: usize,
    /// Priority value drawn this round (meaningless once terminal).
    pub priority: u64,
    /// Status at the start of the round.
    pub status: VertexStatus,
}

pub trait Comm {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    fn barrier(&self);
    /// Sum reduction across all ranks. Collective.
    fn all_reduce_sum(&self, x: u64) -> Result<u64, MisError>;
    /// Sends `outbound[p]` to rank `p` and returns everything addressed to
    /// this rank. Collective; `outbound.len()` must equal `size()` and the
    /// slot for this rank must stay empty.
    fn exchange(&self, outbound: &[Vec<BoundaryState>]) -> Result<Vec<BoundaryState>, MisError>;
}

pub mod thread_comm;
pub use thread_comm::ThreadComm;

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

/// Trivial single-partition communicator: no peers, nothing to exchange.
pub struct SerialComm;

impl Comm for SerialComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn barrier(&self) {}
    fn all_reduce_sum(&self, x: u64) -> Result<u64, MisError> {
        Ok(x)
    }
    fn exchange(&self, outbound: &[Vec<BoundaryState>]) -> Result<Vec<BoundaryState>, MisError> {
        debug_assert_eq!(outbound.len(), 1);
        debug_assert!(outbound[0].is_empty());
        Ok(Vec::new())
    }
}

/// Number of partitions to default to on this machine.
#[cfg(feature = "rayon")]
pub fn default_partitions() -> usize {
    num_cpus::get().max(1)
}

pub enum UniverseComm {
    Serial(SerialComm),
    Threads(ThreadComm),
    #[cfg(feature = "mpi")]
    Mpi(MpiComm),
}

impl Comm for UniverseComm {
    fn rank(&self) -> usize {
        match self {
            UniverseComm::Serial(c) => c.rank(),
            UniverseComm::Threads(c) => c.rank(),
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(c) => c.rank(),
        }
    }
    fn size(&self) -> usize {
        match self {
            UniverseComm::Serial(c) => c.size(),
            UniverseComm::Threads(c) => c.size(),
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(c) => c.size(),
        }
    }
    fn barrier(&self) {
        match self {
            UniverseComm::Serial(c) => c.barrier(),
            UniverseComm::Threads(c) => c.barrier(),
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(c) => c.barrier(),
        }
    }
    fn all_reduce_sum(&self, x: u64) -> Result<u64, MisError> {
        match self {
            UniverseComm::Serial(c) => c.all_reduce_sum(x),
            UniverseComm::Threads(c) => c.all_reduce_sum(x),
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(c) => c.all_reduce_sum(x),
        }
    }
    fn exchange(&self, outbound: &[Vec<BoundaryState>]) -> Result<Vec<BoundaryState>, MisError> {
        match self {
            UniverseComm::Serial(c) => c.exchange(outbound),
            UniverseComm::Threads(c) => c.exchange(outbound),
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(c) => c.exchange(outbound),
        }
    }
}
