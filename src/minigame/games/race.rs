//! Race: every runner advances by its speed each tick.
//!
//! Humans double their speed on a tick they boost. AI runners get a rare
//! burst instead. The first runner to reach the finish ends the race; if
//! several cross on the same tick the one furthest ahead wins.

use crate::core::GameRng;
use crate::minigame::{MiniGame, MiniGameInput, Participant};

const TRACK_LENGTH: u32 = 200;
const BASE_SPEED: std::ops::RangeInclusive<u32> = 4..=6;
const AI_BURST_CHANCE: f64 = 0.02;

/// Race variant. Score is distance covered.
#[derive(Clone, Debug, Default)]
pub struct RaceGame {
    speeds: Vec<u32>,
    progress: Vec<u32>,
    ai: Vec<bool>,
    finished: Option<usize>,
}

impl RaceGame {
    pub const ID: &'static str = "race";
    pub const DURATION: u32 = 45;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance to the finish line.
    #[must_use]
    pub fn track_length(&self) -> u32 {
        TRACK_LENGTH
    }

    /// Base speed per runner.
    #[must_use]
    pub fn speeds(&self) -> &[u32] {
        &self.speeds
    }
}

impl MiniGame for RaceGame {
    fn init(&mut self, participants: &[Participant], rng: &mut GameRng) {
        self.speeds = participants.iter().map(|_| rng.gen_ticks(BASE_SPEED)).collect();
        self.progress = vec![0; participants.len()];
        self.ai = participants.iter().map(|p| p.is_ai).collect();
        self.finished = None;
    }

    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng) {
        if self.finished.is_some() {
            return;
        }

        for i in 0..self.progress.len() {
            let base = self.speeds[i];
            let speed = if self.ai[i] {
                if rng.gen_bool(AI_BURST_CHANCE) {
                    base * 3 / 2
                } else {
                    base
                }
            } else if inputs.iter().any(|&(who, input)| who == i && input == MiniGameInput::Boost) {
                base * 2
            } else {
                base
            };
            self.progress[i] += speed;
        }

        let mut leader: Option<usize> = None;
        for (i, &distance) in self.progress.iter().enumerate() {
            if distance >= TRACK_LENGTH && leader.map_or(true, |l| distance > self.progress[l]) {
                leader = Some(i);
            }
        }
        self.finished = leader;
    }

    fn scores(&self) -> &[u32] {
        &self.progress
    }

    fn is_complete(&self) -> bool {
        self.finished.is_some()
    }

    fn winner(&self) -> Option<usize> {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn humans(n: u8) -> Vec<Participant> {
        (0..n).map(|i| Participant::new(PlayerId::new(i), false)).collect()
    }

    #[test]
    fn test_speeds_in_range() {
        let mut game = RaceGame::new();
        game.init(&humans(4), &mut GameRng::new(9));
        assert!(game.speeds().iter().all(|s| (4..=6).contains(s)));
        assert_eq!(game.scores(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_boosting_runner_wins() {
        let mut game = RaceGame::new();
        let mut rng = GameRng::new(1);
        game.init(&humans(2), &mut rng);

        let mut ticks = 0;
        while !game.is_complete() {
            game.tick(&[(1, MiniGameInput::Boost)], &mut rng);
            ticks += 1;
            assert!(ticks <= RaceGame::DURATION);
        }

        assert_eq!(game.winner(), Some(1));
        assert!(game.scores()[1] >= game.track_length());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut game = RaceGame::new();
        let mut rng = GameRng::new(4);
        let runners: Vec<_> = (0..3).map(|i| Participant::new(PlayerId::new(i), true)).collect();
        game.init(&runners, &mut rng);

        let mut last = game.scores().to_vec();
        for _ in 0..10 {
            game.tick(&[], &mut rng);
            for (now, before) in game.scores().iter().zip(&last) {
                assert!(now > before);
            }
            last = game.scores().to_vec();
        }
    }
}
