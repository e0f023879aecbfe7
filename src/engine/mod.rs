//! Turn engine.
//!
//! [`TurnEngine`] is the only component that changes session state. It
//! consults the economy resolver, the mini-game arbiter and the win
//! evaluator, and reports back to observers through the event bus.
//!
//! ## Host loop
//!
//! ```
//! use polyboard::core::{GameConfig, PlayerId};
//! use polyboard::engine::{EngineBuilder, Phase, Progress};
//!
//! let mut engine = EngineBuilder::new(GameConfig::headless(2).with_human_seats(1))
//!     .build()
//!     .unwrap();
//! let mut progress = engine.start().unwrap();
//! assert_eq!(
//!     progress,
//!     Progress::AwaitingInput { player: PlayerId::new(0), phase: Phase::PlayerTurn }
//! );
//!
//! progress = engine.roll(PlayerId::new(0)).unwrap();
//! while let Some(suspension) = progress.suspension() {
//!     if engine.phase() != Phase::Moving {
//!         break;
//!     }
//!     progress = engine.resume(suspension.token).unwrap();
//! }
//! assert_ne!(engine.phase(), Phase::Moving);
//! ```

mod action;
mod builder;
mod driver;
mod phase;
mod suspend;
mod turn;

pub use action::{ActionKind, PlayerAction, PropertyDecision};
pub use builder::EngineBuilder;
pub use phase::Phase;
pub use suspend::{Progress, SuspendToken, Suspension, SuspensionKind};
pub use turn::TurnEngine;
