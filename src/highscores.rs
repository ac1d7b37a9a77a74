//! Best score tracking
//!
//! A single persisted number; updated only when a finished round beats it.

use crate::persistence::{KeyValueStore, keys, read_lossy, write_lossy};

/// Best score seen across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Record a finished round. Returns true if it set a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Load from storage; absent or non-numeric values read as 0
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let value = read_lossy(store, keys::BEST_SCORE)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);
        log::info!("Best score: {}", value);
        Self { value }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        write_lossy(store, keys::BEST_SCORE, &self.value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_submit_only_on_strictly_greater() {
        let mut best = BestScore::new(40);
        assert!(!best.submit(30));
        assert!(!best.submit(40));
        assert_eq!(best.value(), 40);
        assert!(best.submit(80));
        assert_eq!(best.value(), 80);
    }

    #[test]
    fn test_load_parses_decimal() {
        let store = MemoryStore::with_values([(keys::BEST_SCORE, "70")]);
        assert_eq!(BestScore::load(&store).value(), 70);
    }

    #[test]
    fn test_load_invalid_is_zero() {
        for bad in ["", "abc", "-5", "12.5"] {
            let store = MemoryStore::with_values([(keys::BEST_SCORE, bad)]);
            assert_eq!(BestScore::load(&store).value(), 0, "value {:?}", bad);
        }
        assert_eq!(BestScore::load(&MemoryStore::new()).value(), 0);
    }

    #[test]
    fn test_save_writes_decimal() {
        let mut store = MemoryStore::new();
        BestScore::new(80).save(&mut store);
        assert_eq!(store.get(keys::BEST_SCORE).unwrap().as_deref(), Some("80"));
    }
}
