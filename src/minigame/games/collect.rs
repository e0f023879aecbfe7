//! Polygon collector: grab shapes before the others do.
//!
//! Twenty shapes sit in numbered slots. Collecting one scores by its side
//! count and empties the slot for a few ticks. The game only ends on time.

use crate::core::GameRng;
use crate::minigame::{MiniGame, MiniGameInput, Participant};

const SLOTS: usize = 20;
const SIDES: [u8; 5] = [3, 4, 5, 6, 8];
const RESPAWN_TICKS: u32 = 3;
const AI_GRAB_CHANCE: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shape {
    sides: u8,
    respawn_in: u32,
}

impl Shape {
    fn is_present(&self) -> bool {
        self.respawn_in == 0
    }
}

/// Points for a shape with `sides` sides.
#[must_use]
pub fn shape_points(sides: u8) -> u32 {
    match sides {
        3 => 10,
        4 => 20,
        5 => 30,
        6 => 40,
        8 => 50,
        _ => 0,
    }
}

/// Collector variant.
#[derive(Clone, Debug, Default)]
pub struct CollectGame {
    shapes: Vec<Shape>,
    scores: Vec<u32>,
    ai: Vec<bool>,
}

impl CollectGame {
    pub const ID: &'static str = "collect";
    pub const DURATION: u32 = 45;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Side count of the shape in `slot`, if one is present.
    #[must_use]
    pub fn shape_at(&self, slot: usize) -> Option<u8> {
        self.shapes
            .get(slot)
            .filter(|s| s.is_present())
            .map(|s| s.sides)
    }

    fn random_sides(rng: &mut GameRng) -> u8 {
        rng.choose(&SIDES).copied().unwrap_or(3)
    }

    fn collect(&mut self, who: usize, slot: usize) {
        let Some(shape) = self.shapes.get_mut(slot) else {
            return;
        };
        if !shape.is_present() {
            return;
        }
        shape.respawn_in = RESPAWN_TICKS;
        self.scores[who] += shape_points(shape.sides);
    }
}

impl MiniGame for CollectGame {
    fn init(&mut self, participants: &[Participant], rng: &mut GameRng) {
        self.shapes = (0..SLOTS)
            .map(|_| Shape {
                sides: Self::random_sides(rng),
                respawn_in: 0,
            })
            .collect();
        self.scores = vec![0; participants.len()];
        self.ai = participants.iter().map(|p| p.is_ai).collect();
    }

    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng) {
        for shape in &mut self.shapes {
            if shape.respawn_in > 0 {
                shape.respawn_in -= 1;
                if shape.respawn_in == 0 {
                    shape.sides = Self::random_sides(rng);
                }
            }
        }

        for &(who, input) in inputs {
            if let MiniGameInput::Collect(slot) = input {
                if who < self.ai.len() && !self.ai[who] {
                    self.collect(who, slot);
                }
            }
        }

        for who in 0..self.ai.len() {
            if !self.ai[who] || !rng.gen_bool(AI_GRAB_CHANCE) {
                continue;
            }
            let present: Vec<usize> = (0..self.shapes.len())
                .filter(|&slot| self.shapes[slot].is_present())
                .collect();
            if let Some(&slot) = rng.choose(&present) {
                self.collect(who, slot);
            }
        }
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn is_complete(&self) -> bool {
        false
    }
}
