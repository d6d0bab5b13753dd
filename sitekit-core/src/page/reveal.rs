//! One-shot scroll reveal bookkeeping.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Add the revealed class and stop observing.
    Reveal,
    /// Not visible yet; keep observing.
    Pending,
    /// Already revealed or never observed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    watching: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            watching: HashSet::new(),
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `key`. Returns false if it is already watched or done.
    pub fn observe(&mut self, key: K) -> bool {
        if self.revealed.contains(&key) {
            return false;
        }
        self.watching.insert(key)
    }

    pub fn on_intersection(&mut self, key: &K, is_intersecting: bool) -> RevealOutcome {
        if !self.watching.contains(key) {
            return RevealOutcome::Ignored;
        }
        if !is_intersecting {
            return RevealOutcome::Pending;
        }
        self.watching.remove(key);
        self.revealed.insert(key.clone());
        RevealOutcome::Reveal
    }

    #[must_use]
    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    #[must_use]
    pub fn watching(&self) -> usize {
        self.watching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.observe(7_u32));
        assert_eq!(tracker.on_intersection(&7, false), RevealOutcome::Pending);
        assert_eq!(tracker.on_intersection(&7, true), RevealOutcome::Reveal);
        assert_eq!(tracker.on_intersection(&7, true), RevealOutcome::Ignored);
        assert!(tracker.is_revealed(&7));
        assert!(!tracker.observe(7));
        assert_eq!(tracker.watching(), 0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut tracker: RevealTracker<u32> = RevealTracker::new();
        assert_eq!(tracker.on_intersection(&1, true), RevealOutcome::Ignored);
    }
}
