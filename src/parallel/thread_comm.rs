//! In-process multi-partition communicator over mpsc channels.
//!
//! Each rank lives on its own thread and owns one receiver; sends go
//! directly to the peer's channel. Collectives stay in lock-step because
//! every rank issues the same sequence of calls and `all_reduce_sum` opens
//! with a barrier, so a fast rank cannot push the next collective's packets
//! into a peer still draining the current one.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Barrier};

use crate::error::MisError;
use crate::parallel::{BoundaryState, Comm};

enum Packet {
    Boundary(Vec<BoundaryState>),
    Count(u64),
}

pub struct ThreadComm {
    rank: usize,
    senders: Vec<Sender<(usize, Packet)>>,
    receiver: Receiver<(usize, Packet)>,
    barrier: Arc<Barrier>,
}

impl ThreadComm {
    /// Creates `size` connected ranks; move each to its own worker thread.
    pub fn create(size: usize) -> Vec<ThreadComm> {
        assert!(size > 0, "need at least one rank");
        let barrier = Arc::new(Barrier::new(size));
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..size).map(|_| channel()).unzip();
        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, receiver)| ThreadComm {
                rank,
                senders: senders.clone(),
                receiver,
                barrier: Arc::clone(&barrier),
            })
            .collect()
    }

    fn send(&self, peer: usize, packet: Packet) -> Result<(), MisError> {
        self.senders[peer]
            .send((self.rank, packet))
            .map_err(|_| MisError::Exchange {
                peer,
                reason: "peer rank hung up".into(),
            })
    }

    fn recv(&self) -> Result<(usize, Packet), MisError> {
        self.receiver.recv().map_err(|_| MisError::Exchange {
            peer: usize::MAX,
            reason: "all peer ranks hung up".into(),
        })
    }
}

impl Comm for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.senders.len()
    }

    fn barrier(&self) {
        self.barrier.wait();
    }

    fn all_reduce_sum(&self, x: u64) -> Result<u64, MisError> {
        if self.size() == 1 {
            return Ok(x);
        }
        // Keeps reduce packets out of a peer's still-running exchange.
        self.barrier.wait();
        for peer in 0..self.size() {
            if peer != self.rank {
                self.send(peer, Packet::Count(x))?;
            }
        }
        let mut sum = x;
        for _ in 0..self.size() - 1 {
            match self.recv()? {
                (_, Packet::Count(c)) => sum += c,
                (peer, Packet::Boundary(_)) => {
                    return Err(MisError::Exchange {
                        peer,
                        reason: "boundary payload during reduction".into(),
                    });
                }
            }
        }
        Ok(sum)
    }

    fn exchange(&self, outbound: &[Vec<BoundaryState>]) -> Result<Vec<BoundaryState>, MisError> {
        if outbound.len() != self.size() {
            return Err(MisError::Exchange {
                peer: self.rank,
                reason: format!(
                    "outbound has {} slots for {} ranks",
                    outbound.len(),
                    self.size()
                ),
            });
        }
        for peer in 0..self.size() {
            if peer != self.rank {
                self.send(peer, Packet::Boundary(outbound[peer].clone()))?;
            }
        }
        let mut inbound = Vec::new();
        for _ in 0..self.size() - 1 {
            match self.recv()? {
                (_, Packet::Boundary(states)) => inbound.extend(states),
                (peer, Packet::Count(_)) => {
                    return Err(MisError::Exchange {
                        peer,
                        reason: "reduction payload during exchange".into(),
                    });
                }
            }
        }
        Ok(inbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mis::state::VertexStatus;
    use std::thread;

    #[test]
    fn reduce_sums_across_ranks() {
        let comms = ThreadComm::create(3);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                thread::spawn(move || comm.all_reduce_sum(comm.rank() as u64 + 1).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 6);
        }
    }

    #[test]
    fn exchange_routes_to_addressed_rank() {
        let comms = ThreadComm::create(2);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                thread::spawn(move || {
                    let state = BoundaryState {
                        vertex: comm.rank(),
                        priority: 42,
                        status: VertexStatus::Active,
                    };
                    let mut outbound = vec![Vec::new(), Vec::new()];
                    outbound[1 - comm.rank()].push(state);
                    let inbound = comm.exchange(&outbound).unwrap();
                    assert_eq!(inbound.len(), 1);
                    assert_eq!(inbound[0].vertex, 1 - comm.rank());
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
