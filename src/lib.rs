//! # polyboard
//!
//! Turn-based game-state coordinator for a party board game with mini-game
//! interludes.
//!
//! ## Design Principles
//!
//! 1. **One Writer**: Only the [`TurnEngine`] mutates session state.
//!    Everything else reads through a [`SessionView`] or receives events.
//!
//! 2. **N-Player First**: Every API takes a `PlayerId`; 2 to 8 seats,
//!    human or AI, in any mix.
//!
//! 3. **Deterministic**: All randomness flows from one seeded [`GameRng`],
//!    so a seed and a sequence of actions replay exactly.
//!
//! ## Architecture
//!
//! - **Suspensions, not timers**: Anything that takes time (AI thinking,
//!   token steps, a mini-game) is handed back to the host as a
//!   [`Suspension`] and continues on `resume(token)`. Headless hosts
//!   resume immediately.
//!
//! - **Persistent Data Structures**: The turn history and transaction
//!   ledger use `im-rs` vectors, so session snapshots clone in O(1).
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors, entity registry, session state
//! - `board`: Spaces, the board provider and layout registry
//! - `economy`: Purchases, sales, rent, bonuses, taxes and bankruptcy
//! - `minigame`: Mini-game trait, arbiter, registry and built-in variants
//! - `rules`: Win and termination evaluation
//! - `engine`: Phases, actions, suspensions and the turn engine
//! - `events`: Event vocabulary, bus and bundled listeners
//! - `sync`: Host-side action validation and state snapshots
//! - `ai`: AI decision policies
//! - `content`: Custom content packs

pub mod ai;
pub mod board;
pub mod content;
pub mod core;
pub mod economy;
pub mod engine;
pub mod events;
pub mod minigame;
pub mod rules;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState, GameSession, Money, Player, PlayerId, PlayerMap, Registry,
    Rejection, SessionView,
};

pub use crate::board::{Board, BoardProvider, BoardRegistry, BoardSpace, SpaceIndex, SpaceKind};

pub use crate::economy::{EconomyResolver, Settlement, Transaction, TransactionKind};

pub use crate::minigame::{
    CompletionReason, MiniGame, MiniGameArbiter, MiniGameInput, MiniGameRegistry, MiniGameResult, Participant,
};

pub use crate::rules::{EndReason, GameResult, WinEvaluator};

pub use crate::engine::{
    EngineBuilder, Phase, PlayerAction, Progress, PropertyDecision, SuspendToken, Suspension, SuspensionKind,
    TurnEngine,
};

pub use crate::events::{EventBus, EventListener, EventLog, GameEvent, SessionStats};

pub use crate::sync::{SessionAuthority, StateBroadcaster, StateSnapshot};

pub use crate::ai::{AiPolicy, CautiousBuyer};

pub use crate::content::ContentPack;
