//! Best score persistence
//!
//! A single integer slot. On the web it lives in LocalStorage as a plain
//! decimal string; everywhere else an in-memory store stands in.

use thiserror::Error;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "snake-best-score";

/// Failures at the persistence boundary. Callers log and carry on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored best score is not a number: {0:?}")]
    Parse(String),
}

/// Where the best score is kept between sessions
pub trait ScoreStore {
    fn load_best(&self) -> Result<u64, StorageError>;
    fn save_best(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Parse a stored value; an empty or missing slot means no best yet
pub fn parse_best(raw: Option<&str>) -> Result<u64, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => text
            .parse::<u64>()
            .map_err(|_| StorageError::Parse(text.to_string())),
    }
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    fail: bool,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(score: u64) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }

    /// Store whose reads and writes always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u64, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable);
        }
        Ok(self.value.unwrap_or(0))
    }

    fn save_best(&mut self, score: u64) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable);
        }
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

/// The page's LocalStorage, if the browser grants access
#[cfg(target_arch = "wasm32")]
pub(crate) fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best(&self) -> Result<u64, StorageError> {
        let raw = local_storage()?
            .get_item(BEST_SCORE_KEY)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))?;
        let best = parse_best(raw.as_deref())?;
        log::info!("Loaded best score: {}", best);
        Ok(best)
    }

    fn save_best(&mut self, score: u64) -> Result<(), StorageError> {
        local_storage()?
            .set_item(BEST_SCORE_KEY, &score.to_string())
            .map_err(|e| StorageError::Write(format!("{:?}", e)))?;
        log::info!("Best score saved: {}", score);
        Ok(())
    }
}
