//! Registry of board layouts.
//!
//! Layouts are registered as `(id, info, factory)`. Custom layouts installed
//! from a content pack are treated exactly like the built-in `"standard"`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::layout::Board;
use crate::core::{ConfigError, GameRng};

/// Builds a board from the session RNG and the configured size hint.
pub type BoardFactory = Arc<dyn Fn(&mut GameRng, usize) -> Result<Board, ConfigError> + Send + Sync>;

/// Id of the built-in layout.
pub const STANDARD_BOARD: &str = "standard";

/// Descriptive metadata for a layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl BoardInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone)]
struct BoardEntry {
    info: BoardInfo,
    factory: BoardFactory,
}

/// Layout lookup by id.
#[derive(Clone, Default)]
pub struct BoardRegistry {
    entries: FxHashMap<String, BoardEntry>,
}

impl BoardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard layout.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let info = BoardInfo::new(STANDARD_BOARD, "Classic")
            .with_description("Square track with corners, specials and city properties");
        // Fresh registry: the id cannot collide.
        let _ = registry.register(info, Arc::new(|rng: &mut GameRng, size: usize| Board::standard(size, rng)));
        registry
    }

    /// Register a layout. Duplicate ids are rejected.
    pub fn register(&mut self, info: BoardInfo, factory: BoardFactory) -> Result<(), ConfigError> {
        if self.entries.contains_key(&info.id) {
            return Err(ConfigError::DuplicateContent(info.id));
        }
        log::debug!("Registered board layout '{}'", info.id);
        self.entries.insert(info.id.clone(), BoardEntry { info, factory });
        Ok(())
    }

    /// Build the layout registered under `id`.
    pub fn build(&self, id: &str, rng: &mut GameRng, size: usize) -> Result<Board, ConfigError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ConfigError::UnknownContent(id.to_string()))?;
        (entry.factory)(rng, size)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn info(&self, id: &str) -> Option<&BoardInfo> {
        self.entries.get(id).map(|e| &e.info)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for BoardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardRegistry").field("ids", &self.ids()).finish()
    }
}
