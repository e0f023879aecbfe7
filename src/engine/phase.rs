//! Turn phases.

use serde::{Deserialize, Serialize};

use super::action::ActionKind;

/// Where the session is in the turn cycle.
///
/// ```text
/// Setup ─▶ PlayerTurn ─▶ Rolling ─▶ Moving ─┬─▶ PropertyDecision ─┬─▶ PlayerTurn(next)
///              ▲                            │                    └─▶ MiniGame
///              │                            ├─▶ SpecialEvent ─────┬─▶ PlayerTurn(next)
///              │                            │                     └─▶ MiniGame
///              │                            ├─▶ CornerRest ─────────▶ PlayerTurn(next)
///              └────────────────────────────┴── MiniGame ───────────▶ PlayerTurn(next)
///
/// any phase ─▶ GameOver   (terminal)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    PlayerTurn,
    Rolling,
    Moving,
    PropertyDecision,
    SpecialEvent,
    CornerRest,
    MiniGame,
    GameOver,
}

impl Phase {
    /// Whether the phase currently takes actions of `kind`.
    #[must_use]
    pub fn accepts(self, kind: ActionKind) -> bool {
        matches!(
            (self, kind),
            (Phase::PlayerTurn, ActionKind::Roll)
                | (Phase::PropertyDecision, ActionKind::Decide)
                | (Phase::MiniGame, ActionKind::MiniGameInput)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Phase::Setup => "setup",
            Phase::PlayerTurn => "player turn",
            Phase::Rolling => "rolling",
            Phase::Moving => "moving",
            Phase::PropertyDecision => "property decision",
            Phase::SpecialEvent => "special event",
            Phase::CornerRest => "corner rest",
            Phase::MiniGame => "mini-game",
            Phase::GameOver => "game over",
        };
        f.write_str(text)
    }
}
