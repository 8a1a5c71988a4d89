//! Convergence tracking & round accounting for the selection loop.

/// Stopping criteria & stats.
pub struct Convergence {
    pub max_rounds: usize,
}

#[derive(Clone, Debug)]
pub struct MisStats {
    pub rounds: usize,
    pub selected: usize,
    pub converged: bool,
}

impl Convergence {
    /// Returns (should_stop, stats) given the reduced global active count
    /// and the completed round number.
    pub fn check(&self, active_global: u64, selected: usize, round: usize) -> (bool, MisStats) {
        let converged = active_global == 0;
        (
            converged || round >= self.max_rounds,
            MisStats {
                rounds: round,
                selected,
                converged,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_on_zero_active_or_round_cap() {
        let conv = Convergence { max_rounds: 5 };
        let (stop, stats) = conv.check(3, 1, 2);
        assert!(!stop);
        assert!(!stats.converged);

        let (stop, stats) = conv.check(0, 4, 3);
        assert!(stop);
        assert!(stats.converged);
        assert_eq!(stats.rounds, 3);
        assert_eq!(stats.selected, 4);

        let (stop, stats) = conv.check(2, 1, 5);
        assert!(stop);
        assert!(!stats.converged);
    }
}
