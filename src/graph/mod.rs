//! Graph module: read-only partitioned graph views.
//!
//! A [`GraphView`] describes one partition of a simple undirected graph:
//! the contiguous global id range this partition owns, and for every owned
//! vertex its neighbor list with global ids (local and remote alike). The
//! view is immutable for the duration of a selection run and safe to share
//! across worker threads.

use std::ops::Range;

use bitflags::bitflags;

use crate::error::MisError;

pub mod csr;
pub use csr::CsrGraphView;
pub mod layout;
pub use layout::PartitionLayout;

bitflags! {
    /// Input validations performed before round 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GraphChecks: u32 {
        /// Reject self-loops.
        const SELF_LOOPS = 0b001;
        /// Reject neighbor ids outside the global vertex range.
        const NEIGHBOR_BOUNDS = 0b010;
        /// Reject inconsistent ownership metadata.
        const LAYOUT = 0b100;
    }
}

impl Default for GraphChecks {
    fn default() -> Self {
        GraphChecks::all()
    }
}

/// Read-only view of one partition of an undirected graph.
///
/// Implementors must guarantee that all methods are thread-safe and do not
/// mutate the graph; the selection loop reads the view concurrently from
/// its decision pass.
pub trait GraphView: Sync {
    /// Number of vertices owned by this partition.
    fn local_count(&self) -> usize;

    /// Number of vertices in the whole (multi-partition) graph.
    fn global_count(&self) -> usize;

    /// Global id range owned by this partition.
    fn owned_range(&self) -> Range<usize>;

    /// Index of this partition.
    fn rank(&self) -> usize;

    /// Total number of partitions in the layout.
    fn partitions(&self) -> usize;

    /// Owning partition of any global vertex id.
    fn owner_of(&self, vertex: usize) -> usize;

    /// Neighbors of a locally-owned vertex, as global ids.
    fn neighbors(&self, local: usize) -> &[usize];

    /// Global id of a locally-owned vertex.
    fn to_global(&self, local: usize) -> usize {
        self.owned_range().start + local
    }

    /// Local id of `vertex` if this partition owns it.
    fn to_local(&self, vertex: usize) -> Option<usize> {
        let range = self.owned_range();
        range.contains(&vertex).then(|| vertex - range.start)
    }

    /// Fail-fast input validation, run before round 0.
    fn validate(&self, checks: GraphChecks) -> Result<(), MisError> {
        if checks.contains(GraphChecks::LAYOUT) {
            let range = self.owned_range();
            if range.end > self.global_count() || range.len() != self.local_count() {
                return Err(MisError::InvalidLayout(format!(
                    "owned range {range:?} inconsistent with {} local / {} global vertices",
                    self.local_count(),
                    self.global_count(),
                )));
            }
            if self.rank() >= self.partitions() {
                return Err(MisError::InvalidLayout(format!(
                    "rank {} out of range for {} partitions",
                    self.rank(),
                    self.partitions(),
                )));
            }
        }
        for local in 0..self.local_count() {
            let vertex = self.to_global(local);
            for &neighbor in self.neighbors(local) {
                if checks.contains(GraphChecks::SELF_LOOPS) && neighbor == vertex {
                    return Err(MisError::SelfLoop(vertex));
                }
                if checks.contains(GraphChecks::NEIGHBOR_BOUNDS) && neighbor >= self.global_count()
                {
                    return Err(MisError::NeighborOutOfBounds {
                        vertex,
                        neighbor,
                        count: self.global_count(),
                    });
                }
            }
        }
        Ok(())
    }
}
