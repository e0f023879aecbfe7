//! Win and termination evaluation.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Money, PlayerId, Registry};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// A player reached the net-worth target.
    Victory,
    /// At most one player is still active.
    Elimination,
    /// The round limit was exceeded.
    TimeLimit,
    /// A supervising authority ended the game.
    Forfeit,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            EndReason::Victory => "victory",
            EndReason::Elimination => "elimination",
            EndReason::TimeLimit => "time limit",
            EndReason::Forfeit => "forfeit",
        };
        f.write_str(text)
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` when nobody is left standing.
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
}

impl GameResult {
    #[must_use]
    pub fn new(winner: Option<PlayerId>, reason: EndReason) -> Self {
        Self { winner, reason }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == Some(player)
    }
}

/// Decides whether a session has ended.
///
/// Conditions are checked in order; the first that holds wins:
///
/// 1. **Victory**: an active player's net worth is at or above the target.
///    With several, the richest wins, ties going to the lower seat.
/// 2. **Elimination**: one active player or fewer remain.
/// 3. **Time limit**: the round counter exceeds the maximum. The richest
///    active player wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinEvaluator {
    net_worth_target: Money,
    max_rounds: u32,
}

impl WinEvaluator {
    #[must_use]
    pub fn new(net_worth_target: Money, max_rounds: u32) -> Self {
        Self {
            net_worth_target,
            max_rounds,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.net_worth_target, config.max_rounds)
    }

    #[must_use]
    pub fn net_worth_target(&self) -> Money {
        self.net_worth_target
    }

    #[must_use]
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    #[must_use]
    pub fn evaluate(&self, registry: &Registry, round: u32) -> Option<GameResult> {
        let target_reached = registry
            .active_players()
            .filter(|id| registry.net_worth(*id) >= self.net_worth_target);
        if let Some(winner) = richest(registry, target_reached) {
            return Some(GameResult::new(Some(winner), EndReason::Victory));
        }

        if registry.active_count() <= 1 {
            let survivor = registry.active_players().next();
            return Some(GameResult::new(survivor, EndReason::Elimination));
        }

        if round > self.max_rounds {
            let winner = richest(registry, registry.active_players());
            return Some(GameResult::new(winner, EndReason::TimeLimit));
        }

        None
    }

    /// Result of an authority-forced end: the richest active player wins.
    #[must_use]
    pub fn forfeit(&self, registry: &Registry) -> GameResult {
        GameResult::new(richest(registry, registry.active_players()), EndReason::Forfeit)
    }
}

/// Highest net worth among `candidates`; the first candidate wins ties.
fn richest(registry: &Registry, candidates: impl Iterator<Item = PlayerId>) -> Option<PlayerId> {
    let mut best: Option<(PlayerId, Money)> = None;
    for id in candidates {
        let worth = registry.net_worth(id);
        if best.map_or(true, |(_, top)| worth > top) {
            best = Some((id, worth));
        }
    }
    best.map(|(id, _)| id)
}
