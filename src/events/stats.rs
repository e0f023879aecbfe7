//! Session statistics and achievements gathered from events.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

use super::achievements::{check_achievements, AchievementId, Unlock};
use super::bus::EventListener;
use super::event::GameEvent;
use crate::core::{Money, PlayerId, SessionView};
use crate::rules::GameResult;

/// Per-player counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Dice rolls made
    pub rolls: u32,
    /// Sum of all rolled values
    pub dice_total: u32,
    pub purchases: u32,
    pub sales: u32,
    /// Money spent on properties
    pub spent_on_property: Money,
    pub rent_paid: Money,
    pub rent_received: Money,
    pub mini_game_wins: u32,
    /// Mini-games started on this player's turn
    pub challenges: u32,
    pub bankrupt: bool,
    pub won: bool,
    /// Highest cash seen
    pub peak_cash: Money,
    /// Most properties held at once
    pub peak_properties: u32,
    pub six_streak: u32,
    pub best_six_streak: u32,
}

impl PlayerStats {
    /// Mean roll, or zero before the first roll.
    #[must_use]
    pub fn average_roll(&self) -> f64 {
        if self.rolls == 0 {
            0.0
        } else {
            f64::from(self.dice_total) / f64::from(self.rolls)
        }
    }
}

/// Session-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub players: FxHashMap<PlayerId, PlayerStats>,
    pub turns: u32,
    pub mini_games_played: u32,
    pub result: Option<GameResult>,
    /// Achievements in the order they were earned.
    pub unlocked: Vec<Unlock>,
}

/// Listener that folds events into a [`StatsSummary`] and awards
/// achievements from it.
///
/// Shares its state between clones, like [`super::EventLog`].
#[derive(Clone, Debug, Default)]
pub struct SessionStats {
    inner: Arc<Mutex<StatsSummary>>,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Counters for one player; zeroes if the player never appeared.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> PlayerStats {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .players
            .get(&player)
            .copied()
            .unwrap_or_default()
    }

    /// Achievements `player` has earned, in order.
    #[must_use]
    pub fn achievements(&self, player: PlayerId) -> Vec<AchievementId> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .unlocked
            .iter()
            .filter(|u| u.player == player)
            .map(|u| u.achievement)
            .collect()
    }

    /// Players whose counters an event can move.
    fn touched(event: &GameEvent, view: &SessionView<'_>) -> Vec<PlayerId> {
        match event {
            GameEvent::RentPaid { payer, owner, .. } => vec![*payer, *owner],
            // The initiator is the player whose turn it is.
            GameEvent::MiniGameStarted { .. } => vec![view.current_player()],
            other => other.player().into_iter().collect(),
        }
    }

    fn record(summary: &mut StatsSummary, event: &GameEvent, view: &SessionView<'_>) {
        match event {
            GameEvent::TurnAdvanced { .. } => summary.turns += 1,
            GameEvent::DiceRolled { player, value } => {
                let stats = summary.players.entry(*player).or_default();
                stats.rolls += 1;
                stats.dice_total += u32::from(*value);
                if *value == 6 {
                    stats.six_streak += 1;
                    stats.best_six_streak = stats.best_six_streak.max(stats.six_streak);
                } else {
                    stats.six_streak = 0;
                }
            }
            GameEvent::PropertyPurchased { player, price, .. } => {
                let stats = summary.players.entry(*player).or_default();
                stats.purchases += 1;
                stats.spent_on_property += price;
            }
            GameEvent::PropertySold { player, .. } => {
                summary.players.entry(*player).or_default().sales += 1;
            }
            GameEvent::RentPaid { payer, owner, amount } => {
                summary.players.entry(*payer).or_default().rent_paid += amount;
                summary.players.entry(*owner).or_default().rent_received += amount;
            }
            GameEvent::MiniGameStarted { .. } => {
                summary.players.entry(view.current_player()).or_default().challenges += 1;
            }
            GameEvent::MiniGameEnded { winner, .. } => {
                summary.mini_games_played += 1;
                if let Some(winner) = winner {
                    summary.players.entry(*winner).or_default().mini_game_wins += 1;
                }
            }
            GameEvent::PlayerBankrupt { player } => {
                summary.players.entry(*player).or_default().bankrupt = true;
            }
            GameEvent::GameEnded { winner, reason } => {
                summary.result = Some(GameResult::new(*winner, *reason));
                if let Some(winner) = winner {
                    summary.players.entry(*winner).or_default().won = true;
                }
            }
            _ => {}
        }
    }
}

impl EventListener for SessionStats {
    fn on_event(&mut self, event: &GameEvent, view: &SessionView<'_>) {
        let mut summary = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if event.is_tracker_event() {
            Self::record(&mut summary, event, view);
        }

        for player in Self::touched(event, view) {
            let Some(seat) = view.player(player) else {
                continue;
            };
            let summary = &mut *summary;
            let stats = summary.players.entry(player).or_default();
            stats.peak_cash = stats.peak_cash.max(seat.cash());
            let owned = u32::try_from(seat.owned_count()).unwrap_or(u32::MAX);
            stats.peak_properties = stats.peak_properties.max(owned);
            let stats = *stats;
            check_achievements(&mut summary.unlocked, player, &stats);
        }
    }
}
