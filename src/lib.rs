//! luby: randomized distributed maximal independent set selection
//!
//! This crate computes maximal independent sets over simple undirected
//! graphs partitioned across workers, with support for shared and
//! distributed memory parallelism. Selection is round-based: each round
//! draws fresh per-vertex priorities, exchanges boundary snapshots between
//! partitions, and settles every vertex whose neighborhood it can decide.

pub mod parallel;

pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod mis;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use error::*;
pub use graph::*;
pub use mis::*;
pub use utils::*;

// Re-export MisStats at the crate root for convenience
pub use utils::convergence::MisStats;
