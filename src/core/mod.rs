//! Core types: players, registry, session state, RNG, configuration, errors.
//!
//! Everything here is independent of how turns are driven; the turn engine
//! builds on these types rather than reaching into global state.

pub mod config;
pub mod error;
pub mod player;
pub mod registry;
pub mod rng;
pub mod state;

pub use config::GameConfig;
pub use error::{ConfigError, Rejection};
pub use player::{Money, Player, PlayerColor, PlayerId, PlayerMap, PlayerStatus};
pub use registry::Registry;
pub use rng::{GameRng, GameRngState};
pub use state::{GameSession, SessionView, TurnRecord};
