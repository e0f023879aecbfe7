//! Event system: what happened, and who gets told.
//!
//! The turn engine publishes a [`GameEvent`] for every fact and every
//! presentation-relevant change. Subscribers implement [`EventListener`];
//! [`EventLog`] and [`SessionStats`] are ready-made ones; the latter also
//! awards the session [`ACHIEVEMENTS`].

mod achievements;
mod bus;
mod event;
mod stats;

pub use achievements::{Achievement, AchievementId, Unlock, ACHIEVEMENTS};
pub use bus::{EventBus, EventListener, EventLog};
pub use event::{Cue, GameEvent, MessageCategory};
pub use stats::{PlayerStats, SessionStats, StatsSummary};
