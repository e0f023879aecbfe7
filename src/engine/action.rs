//! Player actions.

use serde::{Deserialize, Serialize};

use crate::minigame::MiniGameInput;

/// Choice offered on a property space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyDecision {
    /// Buy the unowned space at its price.
    Buy,
    /// Sell the space back to the bank for half its price.
    Sell,
    /// Skip paying rent and start a mini-game instead.
    Challenge,
    /// Pass. Rent is owed if someone else owns the space.
    Skip,
}

/// Action category, used for phase gating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Roll,
    Decide,
    MiniGameInput,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ActionKind::Roll => "roll",
            ActionKind::Decide => "decide",
            ActionKind::MiniGameInput => "send mini-game input",
        };
        f.write_str(text)
    }
}

/// Anything a seat can ask the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Roll,
    Decide(PropertyDecision),
    MiniGame(MiniGameInput),
}

impl PlayerAction {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Roll => ActionKind::Roll,
            PlayerAction::Decide(_) => ActionKind::Decide,
            PlayerAction::MiniGame(_) => ActionKind::MiniGameInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind() {
        assert_eq!(PlayerAction::Roll.kind(), ActionKind::Roll);
        assert_eq!(PlayerAction::Decide(PropertyDecision::Buy).kind(), ActionKind::Decide);
        assert_eq!(
            PlayerAction::MiniGame(MiniGameInput::Jump).kind(),
            ActionKind::MiniGameInput
        );
        assert_eq!(ActionKind::Roll.to_string(), "roll");
    }
}
