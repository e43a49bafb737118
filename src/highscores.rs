//! High score persistence
//!
//! A single non-negative integer, stored as bare decimal text. Native builds
//! keep it in a file, the browser build in LocalStorage. A missing or
//! unreadable value counts as 0.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write high score: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

/// Where the high score lives between runs
pub trait HighScoreStore {
    /// Read the stored value; absent or malformed yields 0
    fn load(&mut self) -> u64;
    /// Overwrite the stored value
    fn save(&mut self, score: u64) -> Result<(), PersistError>;
}

/// Parse stored text. Malformed content falls back to 0 with a warning.
pub fn parse_high_score(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<u64>() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Ignoring malformed high score {:?}: {}", trimmed, e);
            0
        }
    }
}

/// In-memory store (tests and headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
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

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// File-backed store at a fixed path
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_PATH: &'static str = "highscore.txt";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileStore {
    fn load(&mut self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let score = parse_high_score(&text);
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file at {}, starting at 0", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        std::fs::write(&self.path, score.to_string())?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "gate_runner_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(text)) => {
                let score = parse_high_score(&text);
                log::info!("Loaded high score {}", score);
                score
            }
            _ => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), PersistError> {
        let storage = Self::storage()
            .ok_or_else(|| PersistError::Storage("LocalStorage unavailable".into()))?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|e| PersistError::Storage(format!("{e:?}")))?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}
