//! Session state and the read-only view handed to observers.
//!
//! ## GameSession
//!
//! Phase, pause overlay, turn owner, round counter, final result and the
//! entity registry. Only the turn engine mutates it.
//!
//! ## SessionView
//!
//! Borrowed, read-only window onto a session. Listeners, broadcasters and AI
//! policies receive this and nothing else, so they cannot change core state
//! from inside a notification.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Money, Player, PlayerId};
use super::registry::Registry;
use crate::board::{BoardSpace, SpaceIndex};
use crate::engine::Phase;
use crate::rules::GameResult;

/// One completed turn, for the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub player: PlayerId,
    pub roll: Option<u8>,
    pub landed: Option<SpaceIndex>,
    /// Short human-readable outcome.
    pub summary: String,
}

/// Mutable state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) phase: Phase,
    pub(crate) paused: bool,
    pub(crate) current: PlayerId,
    pub(crate) round: u32,
    pub(crate) outcome: Option<GameResult>,
    pub(crate) registry: Registry,
    pub(crate) history: Vector<TurnRecord>,
}

impl GameSession {
    /// New session in `Setup`, round 1, seat 0 to move first.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            phase: Phase::Setup,
            paused: false,
            current: PlayerId::new(0),
            round: 1,
            outcome: None,
            registry,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        SessionView { session: self }
    }
}

/// Read-only view of a session.
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
    session: &'a GameSession,
}

impl<'a> SessionView<'a> {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.paused
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.session.current
    }

    /// Round counter, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.session.round
    }

    /// Final result once the phase is `GameOver`.
    #[must_use]
    pub fn outcome(&self) -> Option<&'a GameResult> {
        self.session.outcome.as_ref()
    }

    #[must_use]
    pub fn registry(&self) -> &'a Registry {
        &self.session.registry
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&'a Player> {
        self.session.registry.player(id)
    }

    #[must_use]
    pub fn space(&self, index: SpaceIndex) -> Option<&'a BoardSpace> {
        self.session.registry.space(index)
    }

    #[must_use]
    pub fn net_worth(&self, id: PlayerId) -> Money {
        self.session.registry.net_worth(id)
    }

    /// Leaderboard snapshot, recomputed on every call.
    #[must_use]
    pub fn ranking(&self) -> Vec<PlayerId> {
        self.session.registry.ranking()
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &'a Vector<TurnRecord> {
        &self.session.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::{GameRng, PlayerMap};

    #[test]
    fn test_new_session() {
        let board = Board::standard(12, &mut GameRng::new(0)).unwrap();
        let registry = Registry::new(PlayerMap::new(2, |id| Player::new(id, 1500)), board);
        let session = GameSession::new(registry);
        let view = session.view();

        assert_eq!(view.phase(), Phase::Setup);
        assert_eq!(view.round(), 1);
        assert_eq!(view.current_player(), PlayerId::new(0));
        assert!(!view.is_paused());
        assert!(view.outcome().is_none());
        assert!(view.history().is_empty());
        assert_eq!(view.net_worth(PlayerId::new(1)), 1500);
    }
}
