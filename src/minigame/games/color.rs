//! Color rush: a color is called, players race to stand on it.
//!
//! Five rounds of five ticks. At the end of each round everyone on the
//! called zone scores. Humans move with `MoveToZone`; AI players pick a zone
//! at the start of every round and guess right half the time.

use crate::core::GameRng;
use crate::minigame::{MiniGame, MiniGameInput, Participant};

const ZONES: usize = 4;
const ROUNDS: u32 = 5;
const ROUND_TICKS: u32 = 5;
const ZONE_POINTS: u32 = 100;
const AI_ACCURACY: f64 = 0.5;

/// Color variant.
#[derive(Clone, Debug, Default)]
pub struct ColorGame {
    target: usize,
    positions: Vec<Option<usize>>,
    scores: Vec<u32>,
    ai: Vec<bool>,
    round: u32,
    round_tick: u32,
}

impl ColorGame {
    pub const ID: &'static str = "color";
    pub const DURATION: u32 = ROUNDS * ROUND_TICKS;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zone called this round.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Rounds fully scored so far.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn position(&self, participant: usize) -> Option<usize> {
        self.positions.get(participant).copied().flatten()
    }

    fn call_color(&mut self, rng: &mut GameRng) {
        self.target = rng.gen_index(ZONES).unwrap_or(0);
        for i in 0..self.positions.len() {
            if self.ai[i] {
                let zone = if rng.gen_bool(AI_ACCURACY) {
                    self.target
                } else {
                    rng.gen_index(ZONES).unwrap_or(0)
                };
                self.positions[i] = Some(zone);
            }
        }
    }
}

impl MiniGame for ColorGame {
    fn init(&mut self, participants: &[Participant], rng: &mut GameRng) {
        self.positions = vec![None; participants.len()];
        self.scores = vec![0; participants.len()];
        self.ai = participants.iter().map(|p| p.is_ai).collect();
        self.round = 0;
        self.round_tick = 0;
        self.call_color(rng);
    }

    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng) {
        if self.is_complete() {
            return;
        }

        for &(who, input) in inputs {
            match input {
                MiniGameInput::MoveToZone(zone) if zone < ZONES && who < self.positions.len() => {
                    if !self.ai[who] {
                        self.positions[who] = Some(zone);
                    }
                }
                _ => {}
            }
        }

        self.round_tick += 1;
        if self.round_tick < ROUND_TICKS {
            return;
        }

        for (i, position) in self.positions.iter().enumerate() {
            if *position == Some(self.target) {
                self.scores[i] += ZONE_POINTS;
            }
        }
        self.round += 1;
        self.round_tick = 0;
        if self.round < ROUNDS {
            self.call_color(rng);
        }
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn is_complete(&self) -> bool {
        self.round >= ROUNDS
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
    fn test_following_the_call_scores_every_round() {
        let mut game = ColorGame::new();
        let mut rng = GameRng::new(8);
        game.init(&humans(2), &mut rng);

        let mut ticks = 0;
        while !game.is_complete() {
            let target = game.target();
            game.tick(&[(0, MiniGameInput::MoveToZone(target))], &mut rng);
            ticks += 1;
        }

        assert_eq!(ticks, ColorGame::DURATION);
        assert_eq!(game.rounds_played(), 5);
        assert_eq!(game.scores()[0], 500);
        assert_eq!(game.scores()[1], 0);
        assert_eq!(game.winner(), Some(0));
    }

    #[test]
    fn test_scoring_happens_at_round_end() {
        let mut game = ColorGame::new();
        let mut rng = GameRng::new(8);
        game.init(&humans(1), &mut rng);

        let target = game.target();
        game.tick(&[(0, MiniGameInput::MoveToZone(target))], &mut rng);
        assert_eq!(game.scores(), &[0]);

        for _ in 1..ROUND_TICKS {
            game.tick(&[], &mut rng);
        }
        assert_eq!(game.scores(), &[100]);
    }

    #[test]
    fn test_invalid_zone_ignored() {
        let mut game = ColorGame::new();
        let mut rng = GameRng::new(8);
        game.init(&humans(1), &mut rng);

        game.tick(&[(0, MiniGameInput::MoveToZone(ZONES))], &mut rng);
        assert_eq!(game.position(0), None);
    }
}
