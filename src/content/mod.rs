//! Custom content.
//!
//! A [`ContentPack`] bundles extra mini-game variants and board layouts under
//! one id. Installing a pack registers its entries next to the built-ins;
//! installed entries are indistinguishable from built-in ones afterwards.
//!
//! ```
//! use std::sync::Arc;
//! use polyboard::board::{Board, BoardInfo, BoardRegistry};
//! use polyboard::content::ContentPack;
//! use polyboard::core::GameRng;
//! use polyboard::minigame::MiniGameRegistry;
//!
//! let pack = ContentPack::new("mega", "Mega Pack", "1.0.0").with_board(
//!     BoardInfo::new("mega", "Mega Board"),
//!     Arc::new(|rng: &mut GameRng, _: usize| Board::standard(80, rng)),
//! );
//!
//! let mut mini_games = MiniGameRegistry::with_builtins();
//! let mut boards = BoardRegistry::with_builtins();
//! pack.install(&mut mini_games, &mut boards).unwrap();
//! assert!(boards.contains("mega"));
//! ```

use rustc_hash::FxHashSet;

use crate::board::{BoardFactory, BoardInfo, BoardRegistry};
use crate::core::ConfigError;
use crate::minigame::{MiniGameFactory, MiniGameInfo, MiniGameRegistry};

/// A named bundle of mini-games and board layouts.
#[derive(Clone)]
pub struct ContentPack {
    pub id: String,
    pub name: String,
    pub version: String,
    mini_games: Vec<(MiniGameInfo, MiniGameFactory)>,
    boards: Vec<(BoardInfo, BoardFactory)>,
}

impl ContentPack {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            mini_games: Vec::new(),
            boards: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mini_game(mut self, info: MiniGameInfo, factory: MiniGameFactory) -> Self {
        self.mini_games.push((info, factory));
        self
    }

    #[must_use]
    pub fn with_board(mut self, info: BoardInfo, factory: BoardFactory) -> Self {
        self.boards.push((info, factory));
        self
    }

    pub fn mini_games(&self) -> impl Iterator<Item = &MiniGameInfo> {
        self.mini_games.iter().map(|(info, _)| info)
    }

    pub fn boards(&self) -> impl Iterator<Item = &BoardInfo> {
        self.boards.iter().map(|(info, _)| info)
    }

    /// Register every entry.
    ///
    /// All ids are checked first, so a pack with any duplicate (inside
    /// itself or against the registries) installs nothing.
    pub fn install(&self, mini_games: &mut MiniGameRegistry, boards: &mut BoardRegistry) -> Result<(), ConfigError> {
        let mut seen = FxHashSet::default();
        for (info, _) in &self.mini_games {
            if mini_games.contains(&info.id) || !seen.insert(info.id.as_str()) {
                return Err(ConfigError::DuplicateContent(info.id.clone()));
            }
            if info.duration_ticks == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "duration_ticks",
                    reason: "must be at least 1",
                });
            }
        }
        seen.clear();
        for (info, _) in &self.boards {
            if boards.contains(&info.id) || !seen.insert(info.id.as_str()) {
                return Err(ConfigError::DuplicateContent(info.id.clone()));
            }
        }

        for (info, factory) in &self.mini_games {
            mini_games.register(info.clone(), factory.clone())?;
        }
        for (info, factory) in &self.boards {
            boards.register(info.clone(), factory.clone())?;
        }
        log::info!(
            "Installed content pack '{}' v{}: {} mini-games, {} boards",
            self.id,
            self.version,
            self.mini_games.len(),
            self.boards.len()
        );
        Ok(())
    }
}

impl std::fmt::Debug for ContentPack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentPack")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("mini_games", &self.mini_games().map(|i| i.id.as_str()).collect::<Vec<_>>())
            .field("boards", &self.boards().map(|i| i.id.as_str()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::GameRng;
    use crate::minigame::games::RaceGame;
    use crate::minigame::MiniGame;
    use std::sync::Arc;

    fn race_factory() -> MiniGameFactory {
        Arc::new(|| Box::new(RaceGame::new()) as Box<dyn MiniGame>)
    }

    fn board_factory() -> BoardFactory {
        Arc::new(|rng: &mut GameRng, _: usize| Board::standard(20, rng))
    }

    #[test]
    fn test_install_registers_everything() {
        let pack = ContentPack::new("sprint", "Sprint Pack", "0.2.0")
            .with_mini_game(MiniGameInfo::new("sprint", "Sprint", 10), race_factory())
            .with_board(BoardInfo::new("short", "Short Track"), board_factory());
        let mut mini_games = MiniGameRegistry::with_builtins();
        let mut boards = BoardRegistry::with_builtins();

        pack.install(&mut mini_games, &mut boards).unwrap();
        assert_eq!(mini_games.len(), 6);
        assert_eq!(mini_games.info("sprint").unwrap().duration_ticks, 10);
        assert_eq!(boards.ids(), vec!["short", "standard"]);
    }

    #[test]
    fn test_duplicate_against_registry_installs_nothing() {
        let pack = ContentPack::new("clash", "Clash", "1.0.0")
            .with_board(BoardInfo::new("fresh", "Fresh"), board_factory())
            .with_mini_game(MiniGameInfo::new("race", "Another Race", 10), race_factory());
        let mut mini_games = MiniGameRegistry::with_builtins();
        let mut boards = BoardRegistry::with_builtins();

        assert_eq!(
            pack.install(&mut mini_games, &mut boards),
            Err(ConfigError::DuplicateContent("race".to_string()))
        );
        assert!(!boards.contains("fresh"));
        assert_eq!(mini_games.len(), 5);
    }

    #[test]
    fn test_duplicate_inside_pack() {
        let pack = ContentPack::new("twice", "Twice", "1.0.0")
            .with_board(BoardInfo::new("loop", "Loop"), board_factory())
            .with_board(BoardInfo::new("loop", "Loop Again"), board_factory());
        let mut mini_games = MiniGameRegistry::new();
        let mut boards = BoardRegistry::new();

        assert_eq!(
            pack.install(&mut mini_games, &mut boards),
            Err(ConfigError::DuplicateContent("loop".to_string()))
        );
        assert!(boards.is_empty());
    }

    #[test]
    fn test_installing_twice_is_rejected() {
        let pack = ContentPack::new("sprint", "Sprint Pack", "0.2.0")
            .with_mini_game(MiniGameInfo::new("sprint", "Sprint", 10), race_factory());
        let mut mini_games = MiniGameRegistry::new();
        let mut boards = BoardRegistry::new();

        pack.install(&mut mini_games, &mut boards).unwrap();
        assert!(pack.install(&mut mini_games, &mut boards).is_err());
    }
}
