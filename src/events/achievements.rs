//! Achievements earned within a single session.
//!
//! Progress comes only from [`super::PlayerStats`], which is itself folded
//! from events. Nothing here persists between sessions.

use serde::{Deserialize, Serialize};

use super::stats::PlayerStats;
use crate::core::PlayerId;

/// Achievement identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    FirstWin,
    Millionaire,
    PropertyTycoon,
    MiniGameMaster,
    LuckySeven,
    FriendlyChallenger,
}

/// Catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    /// Stable string key, e.g. for a profile store outside the core.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub threshold: u64,
}

/// Every achievement a session can award.
pub const ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: AchievementId::FirstWin,
        key: "first_win",
        name: "First Victory",
        description: "Win a game",
        threshold: 1,
    },
    Achievement {
        id: AchievementId::Millionaire,
        key: "millionaire",
        name: "Millionaire",
        description: "Hold $10,000 at once",
        threshold: 10_000,
    },
    Achievement {
        id: AchievementId::PropertyTycoon,
        key: "property_tycoon",
        name: "Property Tycoon",
        description: "Own 15 properties at once",
        threshold: 15,
    },
    Achievement {
        id: AchievementId::MiniGameMaster,
        key: "mini_game_master",
        name: "Mini-Game Master",
        description: "Win 25 mini-games",
        threshold: 25,
    },
    Achievement {
        id: AchievementId::LuckySeven,
        key: "lucky_seven",
        name: "Lucky Seven",
        description: "Roll seven 6s in a row",
        threshold: 7,
    },
    Achievement {
        id: AchievementId::FriendlyChallenger,
        key: "friendly_challenger",
        name: "Friendly Challenger",
        description: "Start 50 mini-games on your turn",
        threshold: 50,
    },
];

impl AchievementId {
    /// Catalogue entry for this id.
    #[must_use]
    pub fn info(self) -> &'static Achievement {
        match self {
            AchievementId::FirstWin => &ACHIEVEMENTS[0],
            AchievementId::Millionaire => &ACHIEVEMENTS[1],
            AchievementId::PropertyTycoon => &ACHIEVEMENTS[2],
            AchievementId::MiniGameMaster => &ACHIEVEMENTS[3],
            AchievementId::LuckySeven => &ACHIEVEMENTS[4],
            AchievementId::FriendlyChallenger => &ACHIEVEMENTS[5],
        }
    }

    /// Current progress toward the threshold.
    #[must_use]
    pub fn progress(self, stats: &PlayerStats) -> u64 {
        match self {
            AchievementId::FirstWin => u64::from(stats.won),
            AchievementId::Millionaire => u64::try_from(stats.peak_cash).unwrap_or(0),
            AchievementId::PropertyTycoon => u64::from(stats.peak_properties),
            AchievementId::MiniGameMaster => u64::from(stats.mini_game_wins),
            AchievementId::LuckySeven => u64::from(stats.best_six_streak),
            AchievementId::FriendlyChallenger => u64::from(stats.challenges),
        }
    }
}

/// One award, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub player: PlayerId,
    pub achievement: AchievementId,
}

/// Award everything `player` newly qualifies for. Returns what was added.
pub(crate) fn check_achievements(unlocked: &mut Vec<Unlock>, player: PlayerId, stats: &PlayerStats) -> Vec<AchievementId> {
    let mut awarded = Vec::new();
    for achievement in &ACHIEVEMENTS {
        let id = achievement.id;
        let held = unlocked.iter().any(|u| u.player == player && u.achievement == id);
        if !held && id.progress(stats) >= achievement.threshold {
            log::info!("{player} earned achievement '{}'", achievement.name);
            unlocked.push(Unlock { player, achievement: id });
            awarded.push(id);
        }
    }
    awarded
}
