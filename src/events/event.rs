//! Game event types.
//!
//! Two vocabularies share one enum:
//!
//! - **Tracker events** describe game facts (a property was bought, the game
//!   ended). Analytics and achievement hooks consume these.
//! - **Presentation events** drive a UI: phase changes, cash readouts,
//!   messages for the log panel and named audio/visual cues.
//!
//! [`GameEvent::is_tracker_event`] tells them apart.

use serde::{Deserialize, Serialize};

use crate::board::SpaceIndex;
use crate::core::{Money, PlayerId};
use crate::engine::Phase;
use crate::minigame::CompletionReason;
use crate::rules::EndReason;

/// Category of a user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCategory {
    Info,
    Economy,
    MiniGame,
    Warning,
    /// An action was refused; the text is the reason.
    Rejected,
}

/// Named cue for presentation effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    DiceRoll,
    Step,
    PassStart,
    Purchase,
    Sale,
    Rent,
    Bonus,
    Tax,
    MiniGameStart,
    MiniGameEnd,
    Bankrupt,
    Victory,
}

/// Something that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // Tracker vocabulary
    GameStarted {
        players: usize,
    },
    GameEnded {
        winner: Option<PlayerId>,
        reason: EndReason,
    },
    TurnAdvanced {
        player: PlayerId,
        round: u32,
    },
    DiceRolled {
        player: PlayerId,
        value: u8,
    },
    PropertyPurchased {
        player: PlayerId,
        space: SpaceIndex,
        price: Money,
    },
    PropertySold {
        player: PlayerId,
        space: SpaceIndex,
        amount: Money,
    },
    RentPaid {
        payer: PlayerId,
        owner: PlayerId,
        amount: Money,
    },
    MiniGameStarted {
        kind: String,
    },
    MiniGameEnded {
        kind: String,
        winner: Option<PlayerId>,
        reason: CompletionReason,
    },
    PlayerBankrupt {
        player: PlayerId,
    },

    // Presentation vocabulary
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    PauseChanged(bool),
    PlayerMoved {
        player: PlayerId,
        position: SpaceIndex,
    },
    CashChanged {
        player: PlayerId,
        cash: Money,
    },
    Message {
        text: String,
        category: MessageCategory,
    },
    Cue(Cue),
}

impl GameEvent {
    /// Create a message event.
    pub fn message(category: MessageCategory, text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            category,
        }
    }

    /// Whether this belongs to the tracker vocabulary.
    #[must_use]
    pub fn is_tracker_event(&self) -> bool {
        !matches!(
            self,
            GameEvent::PhaseChanged { .. }
                | GameEvent::PauseChanged(_)
                | GameEvent::PlayerMoved { .. }
                | GameEvent::CashChanged { .. }
                | GameEvent::Message { .. }
                | GameEvent::Cue(_)
        )
    }

    /// The player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnAdvanced { player, .. }
            | GameEvent::DiceRolled { player, .. }
            | GameEvent::PropertyPurchased { player, .. }
            | GameEvent::PropertySold { player, .. }
            | GameEvent::PlayerBankrupt { player }
            | GameEvent::PlayerMoved { player, .. }
            | GameEvent::CashChanged { player, .. } => Some(*player),
            GameEvent::RentPaid { payer, .. } => Some(*payer),
            GameEvent::GameEnded { winner, .. } | GameEvent::MiniGameEnded { winner, .. } => *winner,
            _ => None,
        }
    }
}
