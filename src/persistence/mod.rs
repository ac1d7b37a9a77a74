//! Best-effort string key/value persistence
//!
//! Backends:
//! - `LocalStore`: browser LocalStorage (wasm only)
//! - `JsonFileStore`: a flat JSON object on disk (native only)
//! - `MemoryStore`: in-process map, used when nothing else is available
//!
//! Callers treat every error as "use the default" - storage problems must
//! never reach the game loop.

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Persisted keys
pub mod keys {
    pub const BEST_SCORE: &str = "coin_dash.best";
    pub const SOUND_ENABLED: &str = "coin_dash.sound";
    pub const DIFFICULTY: &str = "coin_dash.difficulty";
}

/// Why a storage call failed
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed, string-valued store
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, last write wins
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Read a key, logging and swallowing any failure
pub fn read_lossy<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            None
        }
    }
}

/// Write a key, logging and swallowing any failure
pub fn write_lossy<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Failed to write '{}': {}", key, e);
    }
}

/// A store where every call fails, for exercising the fallback paths
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_helpers_swallow_errors() {
        let mut store = UnavailableStore;
        assert_eq!(read_lossy(&store, keys::BEST_SCORE), None);
        write_lossy(&mut store, keys::BEST_SCORE, "10");
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        write_lossy(&mut store, keys::DIFFICULTY, "hard");
        assert_eq!(read_lossy(&store, keys::DIFFICULTY).as_deref(), Some("hard"));
    }
}
