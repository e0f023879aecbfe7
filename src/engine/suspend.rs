//! Suspensions: work the engine has paused on.
//!
//! Anything that takes time (an AI thinking, a token stepping across the
//! board, a mini-game) is modelled as a suspension. The engine hands out a
//! [`Suspension`] and does nothing further until the host calls
//! `resume(token)` with the matching token, typically after waiting the
//! reported number of ticks. Headless hosts resume immediately.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Opaque handle for one pending suspension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuspendToken(pub u64);

impl std::fmt::Display for SuspendToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the engine is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuspensionKind {
    /// An AI seat is about to act.
    AiDeliberation,
    /// The current token is about to advance one space.
    MoveStep,
    /// A mini-game session is running.
    MiniGame,
}

/// A pending suspension as reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspension {
    pub token: SuspendToken,
    pub kind: SuspensionKind,
    /// Suggested wait before resuming. Zero means resume right away.
    pub ticks: u32,
}

/// What the engine needs next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Waiting on a suspension; resume it with its token.
    Suspended(Suspension),
    /// Waiting for a human seat to act in the given phase.
    AwaitingInput { player: PlayerId, phase: super::Phase },
    /// The game has ended.
    Finished(crate::rules::GameResult),
}

impl Progress {
    /// The pending suspension, if any.
    #[must_use]
    pub fn suspension(&self) -> Option<Suspension> {
        match self {
            Progress::Suspended(s) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished(_))
    }
}

/// Engine-side record of the pending work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pending {
    AiRoll { player: PlayerId },
    AiDecide { player: PlayerId },
    Move { remaining: u8 },
    MiniGame,
}

impl Pending {
    pub(crate) fn kind(self) -> SuspensionKind {
        match self {
            Pending::AiRoll { .. } | Pending::AiDecide { .. } => SuspensionKind::AiDeliberation,
            Pending::Move { .. } => SuspensionKind::MoveStep,
            Pending::MiniGame => SuspensionKind::MiniGame,
        }
    }
}
