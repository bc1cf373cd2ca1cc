//! Waiting queue: players not currently seated on a court, in arrival order.

use crate::models::session::OpenPlayError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// FIFO of player names. New arrivals and players coming off a court join at the back.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaitQueue {
    players: VecDeque<String>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player to the back of the queue.
    pub fn enqueue(&mut self, name: impl Into<String>) {
        self.players.push_back(name.into());
    }

    /// Remove and return the first `n` players.
    ///
    /// Leaves the queue untouched and returns `InsufficientPlayers` if fewer than `n` are waiting.
    pub fn dequeue(&mut self, n: usize) -> Result<Vec<String>, OpenPlayError> {
        if self.players.len() < n {
            return Err(OpenPlayError::InsufficientPlayers {
                needed: n,
                available: self.players.len(),
            });
        }
        Ok(self.players.drain(..n).collect())
    }

    /// 0-based position of a player in the queue.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p == name)
    }

    /// Take a player out of the queue wherever they are. Returns false if not queued.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.players.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> + Clone {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Snapshot of the queue front to back.
    pub fn to_vec(&self) -> Vec<String> {
        self.players.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(names: &[&str]) -> WaitQueue {
        let mut q = WaitQueue::new();
        for n in names {
            q.enqueue(*n);
        }
        q
    }

    #[test]
    fn dequeue_takes_from_front() {
        let mut q = queue_of(&["A", "B", "C", "D"]);
        assert_eq!(q.dequeue(2).unwrap(), vec!["A", "B"]);
        assert_eq!(q.to_vec(), vec!["C", "D"]);
    }

    #[test]
    fn dequeue_short_queue_is_a_no_op() {
        let mut q = queue_of(&["A", "B", "C"]);
        assert_eq!(
            q.dequeue(4),
            Err(OpenPlayError::InsufficientPlayers { needed: 4, available: 3 })
        );
        assert_eq!(q.to_vec(), vec!["A", "B", "C"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut q = queue_of(&["A", "B", "C"]);
        assert!(q.remove("B"));
        assert!(!q.remove("B"));
        assert_eq!(q.to_vec(), vec!["A", "C"]);
        assert_eq!(q.position("C"), Some(1));
    }
}
