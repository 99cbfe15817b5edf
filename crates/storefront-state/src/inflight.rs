//! In-Flight Request Guard
//!
//! Tracks which keys (product ids, order ids) have a request outstanding so a
//! second click on the same control is dropped instead of racing the first.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> Self {
        Self { keys: HashSet::new() }
    }
}

impl<K: Eq + Hash> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` busy. Returns `false` if it already was.
    pub fn try_begin(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    pub fn finish(&mut self, key: &K) {
        self.keys.remove(key);
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn is_idle(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let mut guard = InFlight::new();
        assert!(guard.try_begin(5u64));
        assert!(!guard.try_begin(5));
        assert!(guard.try_begin(6));
        guard.finish(&5);
        assert!(!guard.is_busy(&5));
        assert!(guard.try_begin(5));
    }
}
