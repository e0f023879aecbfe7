//! Registry of mini-game variants.
//!
//! Built-in variants and those installed from content packs share one table
//! keyed by id. The arbiter instantiates a fresh variant from its factory for
//! every session.
//!
//! ## Example
//!
//! ```
//! use polyboard::minigame::MiniGameRegistry;
//!
//! let registry = MiniGameRegistry::with_builtins();
//! assert_eq!(registry.ids(), vec!["collect", "color", "memory", "platform", "race"]);
//!
//! let race = registry.info("race").unwrap();
//! assert_eq!(race.duration_ticks, 45);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::games::{CollectGame, ColorGame, MemoryGame, PlatformGame, RaceGame};
use super::MiniGame;
use crate::core::ConfigError;

/// Creates a fresh, uninitialized variant instance.
pub type MiniGameFactory = Arc<dyn Fn() -> Box<dyn MiniGame> + Send + Sync>;

/// Descriptive metadata and limits for a variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub min_players: usize,
    pub max_players: usize,
    /// Time budget; the session is forced to end after this many ticks.
    pub duration_ticks: u32,
}

impl MiniGameInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration_ticks: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            min_players: 1,
            max_players: 8,
            duration_ticks,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Whether a session with `count` participants is allowed.
    #[must_use]
    pub fn supports(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

#[derive(Clone)]
pub(crate) struct MiniGameEntry {
    pub(crate) info: MiniGameInfo,
    pub(crate) factory: MiniGameFactory,
}

/// Variant lookup by id.
#[derive(Clone, Default)]
pub struct MiniGameRegistry {
    entries: FxHashMap<String, MiniGameEntry>,
}

impl MiniGameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five built-in variants.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(MiniGameInfo, MiniGameFactory); 5] = [
            (
                MiniGameInfo::new(RaceGame::ID, "Polygon Race", RaceGame::DURATION)
                    .with_description("First to the finish line wins"),
                Arc::new(|| Box::new(RaceGame::new()) as Box<dyn MiniGame>),
            ),
            (
                MiniGameInfo::new(MemoryGame::ID, "Memory Match", MemoryGame::DURATION)
                    .with_description("Find matching pairs; a match keeps your turn"),
                Arc::new(|| Box::new(MemoryGame::new()) as Box<dyn MiniGame>),
            ),
            (
                MiniGameInfo::new(PlatformGame::ID, "Platform Survival", PlatformGame::DURATION)
                    .with_description("Jump when the floor cracks; last one standing wins"),
                Arc::new(|| Box::new(PlatformGame::new()) as Box<dyn MiniGame>),
            ),
            (
                MiniGameInfo::new(ColorGame::ID, "Color Rush", ColorGame::DURATION)
                    .with_description("Stand on the called color before time runs out"),
                Arc::new(|| Box::new(ColorGame::new()) as Box<dyn MiniGame>),
            ),
            (
                MiniGameInfo::new(CollectGame::ID, "Polygon Collector", CollectGame::DURATION)
                    .with_description("Grab shapes; more sides, more points"),
                Arc::new(|| Box::new(CollectGame::new()) as Box<dyn MiniGame>),
            ),
        ];
        for (info, factory) in builtins {
            // Fresh registry with distinct ids: cannot collide.
            let _ = registry.register(info, factory);
        }
        registry
    }

    /// Register a variant. Duplicate ids are rejected.
    pub fn register(&mut self, info: MiniGameInfo, factory: MiniGameFactory) -> Result<(), ConfigError> {
        if self.entries.contains_key(&info.id) {
            return Err(ConfigError::DuplicateContent(info.id));
        }
        if info.duration_ticks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "duration_ticks",
                reason: "must be at least 1",
            });
        }
        log::debug!("Registered mini-game '{}'", info.id);
        self.entries.insert(info.id.clone(), MiniGameEntry { info, factory });
        Ok(())
    }

    pub(crate) fn entry(&self, id: &str) -> Option<&MiniGameEntry> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn info(&self, id: &str) -> Option<&MiniGameInfo> {
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

    /// Registered ids, sorted so random selection is reproducible.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for MiniGameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniGameRegistry").field("ids", &self.ids()).finish()
    }
}
