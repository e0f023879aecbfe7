//! Session configuration.
//!
//! `GameConfig` holds every tunable of a session. It deserializes with
//! per-field defaults, so a settings file only needs the values it changes,
//! and offers builder-style `with_*` methods for code.
//!
//! ```
//! use polyboard::core::GameConfig;
//!
//! let config = GameConfig::new(3)
//!     .with_max_rounds(10)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::error::ConfigError;
use super::player::{Money, PlayerId};

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// The first `human_seats` seats are human; the rest are AI-driven.
    pub human_seats: usize,

    /// Optional display names, by seat. Missing entries use "Player N".
    pub player_names: Vec<String>,

    /// Cash every player starts with.
    pub starting_cash: Money,

    /// Credited once per pass over the start space.
    pub pass_start_bonus: Money,

    /// The game ends when the round counter exceeds this.
    pub max_rounds: u32,

    /// Net worth that wins the game outright.
    pub net_worth_target: Money,

    /// Reward credited to a mini-game winner, drawn uniformly.
    pub mini_game_reward: RangeInclusive<Money>,

    /// Credit from the bonus branch of a special space.
    pub special_bonus: Money,

    /// Debit from the tax branch of a special space.
    pub special_tax: Money,

    /// Die faces; a roll is uniform in `1..=die_sides`.
    pub die_sides: u8,

    /// Pacing delay before an AI seat acts. Zero in headless runs.
    pub ai_deliberation_ticks: RangeInclusive<u32>,

    /// Ticks reported for each movement step.
    pub ticks_per_step: u32,

    /// Space count of the generated standard board.
    pub board_size: usize,

    /// Session RNG seed.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            human_seats: 1,
            player_names: Vec::new(),
            starting_cash: 1500,
            pass_start_bonus: 200,
            max_rounds: 20,
            net_worth_target: 5000,
            mini_game_reward: 200..=500,
            special_bonus: 150,
            special_tax: 100,
            die_sides: 6,
            ai_deliberation_ticks: 1..=3,
            ticks_per_step: 1,
            board_size: 40,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Default configuration for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Configuration for unattended runs: every seat AI, no pacing delays.
    #[must_use]
    pub fn headless(player_count: usize) -> Self {
        Self::new(player_count)
            .with_human_seats(0)
            .with_ai_deliberation(0..=0)
            .with_ticks_per_step(0)
    }

    #[must_use]
    pub fn with_human_seats(mut self, seats: usize) -> Self {
        self.human_seats = seats;
        self
    }

    #[must_use]
    pub fn with_player_names(mut self, names: Vec<String>) -> Self {
        self.player_names = names;
        self
    }

    #[must_use]
    pub fn with_starting_cash(mut self, cash: Money) -> Self {
        self.starting_cash = cash;
        self
    }

    #[must_use]
    pub fn with_pass_start_bonus(mut self, bonus: Money) -> Self {
        self.pass_start_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_net_worth_target(mut self, target: Money) -> Self {
        self.net_worth_target = target;
        self
    }

    #[must_use]
    pub fn with_mini_game_reward(mut self, reward: RangeInclusive<Money>) -> Self {
        self.mini_game_reward = reward;
        self
    }

    #[must_use]
    pub fn with_special_amounts(mut self, bonus: Money, tax: Money) -> Self {
        self.special_bonus = bonus;
        self.special_tax = tax;
        self
    }

    #[must_use]
    pub fn with_die_sides(mut self, sides: u8) -> Self {
        self.die_sides = sides;
        self
    }

    #[must_use]
    pub fn with_ai_deliberation(mut self, ticks: RangeInclusive<u32>) -> Self {
        self.ai_deliberation_ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_ticks_per_step(mut self, ticks: u32) -> Self {
        self.ticks_per_step = ticks;
        self
    }

    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether the AI policy drives `player`.
    #[must_use]
    pub fn is_ai_seat(&self, player: PlayerId) -> bool {
        player.index() >= self.human_seats
    }

    /// Display name for a seat.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    /// Check every setting, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=8).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }
        if self.human_seats > self.player_count {
            return Err(ConfigError::InvalidValue {
                field: "human_seats",
                reason: "exceeds player count",
            });
        }
        if self.starting_cash < 0 {
            return Err(ConfigError::InvalidValue {
                field: "starting_cash",
                reason: "must not be negative",
            });
        }
        if self.pass_start_bonus < 0 || self.special_bonus < 0 || self.special_tax < 0 {
            return Err(ConfigError::InvalidValue {
                field: "bonus_or_tax",
                reason: "must not be negative",
            });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_rounds",
                reason: "must be at least 1",
            });
        }
        if self.net_worth_target <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "net_worth_target",
                reason: "must be positive",
            });
        }
        if self.die_sides == 0 {
            return Err(ConfigError::InvalidValue {
                field: "die_sides",
                reason: "must be at least 1",
            });
        }
        if self.mini_game_reward.is_empty() || *self.mini_game_reward.start() < 0 {
            return Err(ConfigError::InvalidRange {
                field: "mini_game_reward",
                start: *self.mini_game_reward.start(),
                end: *self.mini_game_reward.end(),
            });
        }
        if self.ai_deliberation_ticks.is_empty() {
            return Err(ConfigError::InvalidRange {
                field: "ai_deliberation_ticks",
                start: i64::from(*self.ai_deliberation_ticks.start()),
                end: i64::from(*self.ai_deliberation_ticks.end()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_cash, 1500);
        assert_eq!(config.pass_start_bonus, 200);
        assert!(!config.is_ai_seat(PlayerId::new(0)));
        assert!(config.is_ai_seat(PlayerId::new(3)));
    }

    #[test]
    fn test_headless_has_no_delays() {
        let config = GameConfig::headless(3);
        assert_eq!(config.ai_deliberation_ticks, 0..=0);
        assert_eq!(config.ticks_per_step, 0);
        assert!(config.is_ai_seat(PlayerId::new(0)));
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigError::InvalidPlayerCount(1))
        );
        assert_eq!(
            GameConfig::new(9).validate(),
            Err(ConfigError::InvalidPlayerCount(9))
        );
        assert!(GameConfig::new(8).validate().is_ok());
    }

    #[test]
    fn test_reversed_reward_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let config = GameConfig::default().with_mini_game_reward(500..=200);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { field: "mini_game_reward", .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "player_count": 3, "max_rounds": 12 }"#).unwrap();
        assert_eq!(config.player_count, 3);
        assert_eq!(config.max_rounds, 12);
        assert_eq!(config.starting_cash, 1500);
        assert_eq!(config.mini_game_reward, 200..=500);
    }

    #[test]
    fn test_player_names() {
        let config = GameConfig::new(2).with_player_names(vec!["Ada".into()]);
        assert_eq!(config.player_name(PlayerId::new(0)), "Ada");
        assert_eq!(config.player_name(PlayerId::new(1)), "Player 2");
    }
}
