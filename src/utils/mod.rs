//! Shared utilities: convergence tracking and result verification.

pub mod convergence;
pub mod verify;

pub use convergence::{Convergence, MisStats};
pub use verify::{is_independent, is_maximal, verify_mis};
