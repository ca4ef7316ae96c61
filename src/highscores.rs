//! Best-score persistence
//!
//! A single integer survives across sessions. LocalStorage on the web, a JSON
//! file on native. Anything unreadable loads as zero.

use serde::{Deserialize, Serialize};

/// Where the best score is kept between sessions
pub trait HighScoreStore {
    /// Read the persisted best score; missing or corrupt data reads as 0
    fn load(&mut self) -> u64;
    /// Persist a new best score
    fn save(&mut self, score: u64);
}

/// Parse a stored value, falling back to zero
pub fn parse_high_score(raw: &str) -> u64 {
    match serde_json::from_str::<StoredHighScore>(raw.trim()) {
        Ok(stored) => stored.0,
        Err(e) => {
            log::warn!("Ignoring corrupt high score {:?}: {}", raw, e);
            0
        }
    }
}

/// Serialized form: a bare JSON number
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
struct StoredHighScore(u64);

fn encode_high_score(score: u64) -> String {
    serde_json::to_string(&StoredHighScore(score)).unwrap_or_else(|_| score.to_string())
}

/// In-process store (tests, native fallback)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of `save` calls seen
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.value = Some(score);
        self.saves += 1;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "block_dodge_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(Self::STORAGE_KEY, &encode_high_score(score))
                .is_ok()
            {
                log::info!("High score saved ({})", score);
                return;
            }
        }
        log::warn!("Could not persist high score {}", score);
    }
}

/// JSON file store (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                log::info!("No high score at {} ({}), starting fresh", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        match std::fs::write(&self.path, encode_high_score(score)) {
            Ok(()) => log::info!("High score saved ({}) to {}", score, self.path.display()),
            Err(e) => log::warn!("Could not write {}: {}", self.path.display(), e),
        }
    }
}
