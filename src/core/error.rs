//! Error taxonomy.
//!
//! - [`ConfigError`]: a missing or invalid collaborator at initialization.
//!   Fatal: the engine is never built.
//! - [`Rejection`]: a rejected action. Always recoverable; the engine stays in
//!   its current phase and nothing is mutated. `Display` is the short reason
//!   shown to players.

use thiserror::Error;

use super::player::{Money, PlayerId};
use crate::board::SpaceIndex;
use crate::engine::{ActionKind, Phase};

/// Fatal configuration error raised before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Player count outside the supported range.
    #[error("player count must be between 2 and 8, got {0}")]
    InvalidPlayerCount(usize),

    /// No board provider was supplied.
    #[error("no board provider configured")]
    MissingBoard,

    /// The board provider has no spaces.
    #[error("board has no spaces")]
    EmptyBoard,

    /// The mini-game registry is empty.
    #[error("no mini-game variants registered")]
    NoMiniGames,

    /// An inclusive range whose start exceeds its end.
    #[error("invalid range for {field}: {start}..={end}")]
    InvalidRange {
        field: &'static str,
        start: i64,
        end: i64,
    },

    /// A scalar setting outside its domain.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    /// Two content entries registered under the same id.
    #[error("content id already registered: {0}")]
    DuplicateContent(String),

    /// A layout or variant id with no registration.
    #[error("unknown content id: {0}")]
    UnknownContent(String),
}

/// Reason an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cannot {action} during {phase}")]
    WrongPhase { action: ActionKind, phase: Phase },

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} is bankrupt")]
    PlayerBankrupt(PlayerId),

    #[error("waiting for the current action to finish")]
    Suspended,

    #[error("the game is paused")]
    Paused,

    #[error("the game is not paused")]
    NotPaused,

    #[error("the game is over")]
    GameOver,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game has not started")]
    NotStarted,

    #[error("insufficient funds: need ${needed}, have ${available}")]
    InsufficientFunds { needed: Money, available: Money },

    #[error("space {0} is already owned")]
    AlreadyOwned(SpaceIndex),

    #[error("space {0} cannot be bought")]
    NotPurchasable(SpaceIndex),

    #[error("you don't own space {0}")]
    NotOwner(SpaceIndex),

    #[error("space {0} does not exist")]
    UnknownSpace(SpaceIndex),

    #[error("a mini-game is already running")]
    MiniGameActive,

    #[error("no mini-game is running")]
    NoMiniGame,

    #[error("unknown mini-game: {0}")]
    UnknownMiniGame(String),

    #[error("{0} is not taking part in this mini-game")]
    NotParticipant(PlayerId),

    #[error("no pending operation for token {0}")]
    UnknownToken(u64),

    #[error("nothing is pending")]
    NothingPending,

    #[error("client {0} is not connected to this session")]
    UnknownClient(u32),

    #[error("client {client} does not control {slot}")]
    SlotNotControlled { client: u32, slot: PlayerId },

    #[error("{0} is already controlled by another client")]
    SlotTaken(PlayerId),
}
