//! Engine construction.

use crate::ai::{AiPolicy, CautiousBuyer};
use crate::board::{Board, BoardProvider, BoardRegistry, STANDARD_BOARD};
use crate::content::ContentPack;
use crate::core::{ConfigError, GameConfig, GameRng, Player, PlayerMap, Registry};
use crate::events::{EventBus, EventListener};
use crate::minigame::{MiniGameArbiter, MiniGameRegistry};
use crate::sync::StateBroadcaster;

use super::TurnEngine;

/// Assembles a [`TurnEngine`] from its collaborators.
///
/// Every collaborator is checked in [`EngineBuilder::build`]; a missing or
/// empty one is a [`ConfigError`] and no engine is produced.
///
/// ```
/// use polyboard::core::GameConfig;
/// use polyboard::engine::{EngineBuilder, Phase};
///
/// let engine = EngineBuilder::new(GameConfig::headless(3).with_seed(7))
///     .build()
///     .unwrap();
/// assert_eq!(engine.phase(), Phase::Setup);
/// assert_eq!(engine.registry().player_count(), 3);
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    board: Option<Board>,
    layout: Option<String>,
    boards: BoardRegistry,
    mini_games: MiniGameRegistry,
    content: Vec<ContentPack>,
    policy: Box<dyn AiPolicy>,
    listeners: Vec<Box<dyn EventListener>>,
    broadcasters: Vec<Box<dyn StateBroadcaster>>,
}

impl EngineBuilder {
    /// Built-in mini-games on the standard layout.
    pub fn new(config: GameConfig) -> Self {
        Self {
            layout: Some(STANDARD_BOARD.to_string()),
            boards: BoardRegistry::with_builtins(),
            mini_games: MiniGameRegistry::with_builtins(),
            ..Self::empty(config)
        }
    }

    /// No board and no mini-games; both must be supplied before `build`.
    pub fn empty(config: GameConfig) -> Self {
        Self {
            config,
            board: None,
            layout: None,
            boards: BoardRegistry::new(),
            mini_games: MiniGameRegistry::new(),
            content: Vec::new(),
            policy: Box::new(CautiousBuyer::new()),
            listeners: Vec::new(),
            broadcasters: Vec::new(),
        }
    }

    /// Use a ready-made board instead of a registered layout.
    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Generate the board from the layout registered under `id`.
    #[must_use]
    pub fn with_layout(mut self, id: impl Into<String>) -> Self {
        self.layout = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_board_registry(mut self, boards: BoardRegistry) -> Self {
        self.boards = boards;
        self
    }

    #[must_use]
    pub fn with_mini_games(mut self, registry: MiniGameRegistry) -> Self {
        self.mini_games = registry;
        self
    }

    /// Install a content pack when the engine is built.
    #[must_use]
    pub fn with_content(mut self, pack: ContentPack) -> Self {
        self.content.push(pack);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl AiPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    #[must_use]
    pub fn with_broadcaster(mut self, broadcaster: impl StateBroadcaster + 'static) -> Self {
        self.broadcasters.push(Box::new(broadcaster));
        self
    }

    /// Validate everything and create the engine in [`super::Phase::Setup`].
    pub fn build(mut self) -> Result<TurnEngine, ConfigError> {
        self.config.validate()?;
        for pack in &self.content {
            pack.install(&mut self.mini_games, &mut self.boards)?;
        }
        if self.mini_games.is_empty() {
            return Err(ConfigError::NoMiniGames);
        }

        let rng = GameRng::new(self.config.seed);
        let board = match (self.board, &self.layout) {
            (Some(board), _) => board,
            (None, Some(id)) => {
                let mut board_rng = rng.for_context("board");
                self.boards.build(id, &mut board_rng, self.config.board_size)?
            }
            (None, None) => return Err(ConfigError::MissingBoard),
        };
        if board.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }

        let config = self.config;
        let players = PlayerMap::new(config.player_count, |id| {
            let player = Player::new(id, config.starting_cash).with_name(config.player_name(id));
            if config.is_ai_seat(id) {
                player.as_ai()
            } else {
                player
            }
        });
        log::debug!(
            "Built engine: {} players, {} spaces, {} mini-games",
            config.player_count,
            board.len(),
            self.mini_games.len()
        );

        let mut bus = EventBus::new();
        for listener in self.listeners {
            bus.subscribe(listener);
        }
        Ok(TurnEngine::from_parts(
            config,
            Registry::new(players, board),
            rng,
            MiniGameArbiter::new(self.mini_games),
            self.policy,
            bus,
            self.broadcasters,
        ))
    }
}

impl std::fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("has_board", &self.board.is_some())
            .field("content", &self.content.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSpace, SpaceIndex};

    #[test]
    fn test_missing_board_is_fatal() {
        let result = EngineBuilder::empty(GameConfig::headless(2))
            .with_mini_games(MiniGameRegistry::with_builtins())
            .build();
        assert_eq!(result.err(), Some(ConfigError::MissingBoard));
    }

    #[test]
    fn test_no_mini_games_is_fatal() {
        let result = EngineBuilder::new(GameConfig::headless(2))
            .with_mini_games(MiniGameRegistry::new())
            .build();
        assert_eq!(result.err(), Some(ConfigError::NoMiniGames));
    }

    #[test]
    fn test_unknown_layout_is_fatal() {
        let result = EngineBuilder::new(GameConfig::headless(2)).with_layout("spiral").build();
        assert_eq!(result.err(), Some(ConfigError::UnknownContent("spiral".to_string())));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let result = EngineBuilder::new(GameConfig::headless(1)).build();
        assert_eq!(result.err(), Some(ConfigError::InvalidPlayerCount(1)));
    }

    #[test]
    fn test_seats_follow_config() {
        let config = GameConfig::new(3)
            .with_human_seats(1)
            .with_player_names(vec!["Ada".to_string()]);
        let engine = EngineBuilder::new(config).build().unwrap();
        let registry = engine.registry();

        let first = registry.player(crate::core::PlayerId::new(0)).unwrap();
        assert_eq!(first.name, "Ada");
        assert!(!first.is_ai);
        let third = registry.player(crate::core::PlayerId::new(2)).unwrap();
        assert_eq!(third.name, "Player 3");
        assert!(third.is_ai);
        assert_eq!(third.cash(), 1500);
    }

    #[test]
    fn test_explicit_board_wins_over_layout() {
        let board = Board::new(vec![
            BoardSpace::start(SpaceIndex::START),
            BoardSpace::corner(SpaceIndex::new(1)),
        ])
        .unwrap();
        let engine = EngineBuilder::new(GameConfig::headless(2)).with_board(board).build().unwrap();
        assert_eq!(engine.registry().board().len(), 2);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = EngineBuilder::new(GameConfig::headless(2).with_seed(11)).build().unwrap();
        let b = EngineBuilder::new(GameConfig::headless(2).with_seed(11)).build().unwrap();
        assert_eq!(a.registry().board(), b.registry().board());
    }
}
