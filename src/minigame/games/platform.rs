//! Platform survival: the floor cracks under random players.
//!
//! A cracked tile gives one tick of warning. A player who jumps on the next
//! tick dodges it and earns a bonus; one who doesn't falls out. Survivors
//! earn a point per tick. The game ends when at most one player is left
//! standing, or when a lone player falls.

use crate::core::GameRng;
use crate::minigame::{MiniGame, MiniGameInput, Participant};

const CRACK_CHANCE: f64 = 0.125;
const AI_DODGE_CHANCE: f64 = 0.8;
const SURVIVAL_POINTS: u32 = 1;
const DODGE_POINTS: u32 = 10;

/// Platform variant.
#[derive(Clone, Debug, Default)]
pub struct PlatformGame {
    alive: Vec<bool>,
    cracked: Vec<bool>,
    scores: Vec<u32>,
    ai: Vec<bool>,
}

impl PlatformGame {
    pub const ID: &'static str = "platform";
    pub const DURATION: u32 = 30;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_alive(&self, participant: usize) -> bool {
        self.alive.get(participant).copied().unwrap_or(false)
    }

    /// Whether the tile under `participant` cracked last tick.
    #[must_use]
    pub fn is_cracked(&self, participant: usize) -> bool {
        self.cracked.get(participant).copied().unwrap_or(false)
    }

    fn survivors(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }
}

impl MiniGame for PlatformGame {
    fn init(&mut self, participants: &[Participant], _rng: &mut GameRng) {
        self.alive = vec![true; participants.len()];
        self.cracked = vec![false; participants.len()];
        self.scores = vec![0; participants.len()];
        self.ai = participants.iter().map(|p| p.is_ai).collect();
    }

    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng) {
        if self.is_complete() {
            return;
        }

        for i in 0..self.alive.len() {
            if !self.alive[i] {
                continue;
            }
            if self.cracked[i] {
                let dodged = if self.ai[i] {
                    rng.gen_bool(AI_DODGE_CHANCE)
                } else {
                    inputs
                        .iter()
                        .any(|&(who, input)| who == i && input == MiniGameInput::Jump)
                };
                self.cracked[i] = false;
                if !dodged {
                    self.alive[i] = false;
                    continue;
                }
                self.scores[i] += DODGE_POINTS;
            }
            self.scores[i] += SURVIVAL_POINTS;
            self.cracked[i] = rng.gen_bool(CRACK_CHANCE);
        }
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn is_complete(&self) -> bool {
        match self.alive.len() {
            0 => true,
            1 => !self.alive[0],
            _ => self.survivors() <= 1,
        }
    }

    fn winner(&self) -> Option<usize> {
        if self.alive.len() < 2 {
            return None;
        }
        self.alive.iter().position(|a| *a)
    }
}
