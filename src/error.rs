use thiserror::Error;

// Unified error type for luby

#[derive(Error, Debug)]
pub enum MisError {
    #[error("self-loop at vertex {0}")]
    SelfLoop(usize),
    #[error("neighbor {neighbor} of vertex {vertex} out of bounds for {count} vertices")]
    NeighborOutOfBounds {
        vertex: usize,
        neighbor: usize,
        count: usize,
    },
    #[error("invalid partition layout: {0}")]
    InvalidLayout(String),
    #[error("exchange with peer {peer} failed: {reason}")]
    Exchange { peer: usize, reason: String },
    #[error("no boundary state received for remote vertex {0}")]
    MissingBoundary(usize),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("round limit {0} reached before convergence")]
    RoundLimit(usize),
}
