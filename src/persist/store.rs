//! Save storage.
//!
//! The engine treats storage as an opaque key to blob map. Hosts plug in
//! whatever backs it (files, preferences, a database); `MemoryStore` keeps
//! blobs in memory.

use rustc_hash::FxHashMap;

/// Opaque key to blob storage.
pub trait SaveStore {
    /// Store `blob` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, blob: Vec<u8>);

    /// The blob stored under `key`, if any.
    fn load(&self, key: &str) -> Option<Vec<u8>>;

    /// Forget the blob stored under `key`.
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, key: &str, blob: Vec<u8>) {
        self.blobs.insert(key.to_string(), blob);
    }

    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

impl<S: SaveStore + ?Sized> SaveStore for &mut S {
    fn save(&mut self, key: &str, blob: Vec<u8>) {
        (**self).save(key, blob);
    }

    fn load(&self, key: &str) -> Option<Vec<u8>> {
        (**self).load(key)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}
