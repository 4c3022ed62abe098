//! Persisted best score
//!
//! A single integer, stored in LocalStorage on the web. The run controller
//! only ever talks to the `ScoreStore` trait.

/// Storage for the best score across runs
pub trait ScoreStore {
    /// Stored best score, 0 when nothing was saved yet
    fn load(&self) -> u64;
    /// Persist a new best score
    fn save(&mut self, value: u64);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
    /// Number of `save` calls seen
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an existing best
    pub fn with_value(value: u64) -> Self {
        Self { value, writes: 0 }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value
    }

    fn save(&mut self, value: u64) {
        self.value = value;
        self.writes += 1;
    }
}

/// Parse a stored value, treating anything unreadable as no score
pub fn parse_stored(raw: &str) -> u64 {
    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring unreadable best score {:?}: {}", raw, e);
            0
        }
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "pulse_best";

    pub fn new() -> Self {
        Self {
            key: Self::STORAGE_KEY,
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(self.key) {
                let best = parse_stored(&raw);
                log::info!("Loaded best score {}", best);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        0
    }

    fn save(&mut self, value: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score {} not saved", value);
            return;
        };
        match storage.set_item(self.key, &value.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", value),
            Err(e) => log::warn!("Failed to save best score: {:?}", e),
        }
    }
}
