// CSR-backed GraphView over one partition's adjacency rows.

use std::ops::Range;

use crate::error::MisError;
use crate::graph::layout::PartitionLayout;
use crate::graph::GraphView;

/// One partition of an undirected graph in compressed sparse row form.
///
/// `offsets` has one entry per owned vertex plus one; `edges` stores
/// neighbor ids in the global id space, so cut edges need no translation.
pub struct CsrGraphView {
    layout: PartitionLayout,
    rank: usize,
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl CsrGraphView {
    /// Builds a single-partition view over a whole adjacency list.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Self {
        let layout = PartitionLayout::contiguous(adjacency.len(), 1);
        Self::from_global_adjacency(adjacency, layout, 0)
    }

    /// Extracts the rows owned by `rank` from a global adjacency list.
    pub fn from_global_adjacency(
        adjacency: &[Vec<usize>],
        layout: PartitionLayout,
        rank: usize,
    ) -> Self {
        let range = layout.owned_range(rank);
        let mut offsets = Vec::with_capacity(range.len() + 1);
        offsets.push(0);
        let mut edges = Vec::new();
        for v in range {
            edges.extend_from_slice(&adjacency[v]);
            offsets.push(edges.len());
        }
        Self {
            layout,
            rank,
            offsets,
            edges,
        }
    }

    /// Builds a view from raw CSR parts.
    pub fn from_csr_parts(
        layout: PartitionLayout,
        rank: usize,
        offsets: Vec<usize>,
        edges: Vec<usize>,
    ) -> Result<Self, MisError> {
        if offsets.len() != layout.owned_range(rank).len() + 1 || offsets.first() != Some(&0) {
            return Err(MisError::InvalidLayout(
                "offsets must have one entry per owned vertex plus a leading 0".into(),
            ));
        }
        if offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(MisError::InvalidLayout("offsets must be monotone".into()));
        }
        if offsets.last() != Some(&edges.len()) {
            return Err(MisError::InvalidLayout(
                "last offset must equal edge count".into(),
            ));
        }
        Ok(Self {
            layout,
            rank,
            offsets,
            edges,
        })
    }

    pub fn layout(&self) -> &PartitionLayout {
        &self.layout
    }

    pub fn degree(&self, local: usize) -> usize {
        self.offsets[local + 1] - self.offsets[local]
    }
}

impl GraphView for CsrGraphView {
    fn local_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn global_count(&self) -> usize {
        self.layout.global_count()
    }

    fn owned_range(&self) -> Range<usize> {
        self.layout.owned_range(self.rank)
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn partitions(&self) -> usize {
        self.layout.partitions()
    }

    fn owner_of(&self, vertex: usize) -> usize {
        self.layout.owner_of(vertex)
    }

    fn neighbors(&self, local: usize) -> &[usize] {
        &self.edges[self.offsets[local]..self.offsets[local + 1]]
    }
}
