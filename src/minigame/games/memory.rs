//! Memory: take turns turning over pairs of cards on a 4x4 grid.
//!
//! A match scores and keeps the turn; a miss passes it on. AI players
//! remember every card that has been shown.

use crate::core::GameRng;
use crate::minigame::{MiniGame, MiniGameInput, Participant};

const PAIRS: u8 = 8;
const MATCH_POINTS: u32 = 10;

/// Memory variant. Score is ten points per pair found.
#[derive(Clone, Debug, Default)]
pub struct MemoryGame {
    cards: Vec<u8>,
    matched: Vec<bool>,
    seen: Vec<bool>,
    scores: Vec<u32>,
    ai: Vec<bool>,
    turn: usize,
    first_pick: Option<usize>,
}

impl MemoryGame {
    pub const ID: &'static str = "memory";
    pub const DURATION: u32 = 60;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Participant index whose turn it is.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_matched(&self, card: usize) -> bool {
        self.matched.get(card).copied().unwrap_or(false)
    }

    /// Face value of a card. Presentation only shows it once flipped.
    #[must_use]
    pub fn face(&self, card: usize) -> Option<u8> {
        self.cards.get(card).copied()
    }

    fn flip(&mut self, card: usize) -> bool {
        if card >= self.cards.len() || self.matched[card] || self.first_pick == Some(card) {
            return false;
        }
        self.seen[card] = true;
        match self.first_pick.take() {
            None => self.first_pick = Some(card),
            Some(first) => self.resolve(first, card),
        }
        true
    }

    fn resolve(&mut self, a: usize, b: usize) {
        if self.cards[a] == self.cards[b] {
            self.matched[a] = true;
            self.matched[b] = true;
            self.scores[self.turn] += MATCH_POINTS;
        } else if !self.scores.is_empty() {
            self.turn = (self.turn + 1) % self.scores.len();
        }
    }

    fn unmatched(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cards.len()).filter(|&i| !self.matched[i])
    }

    fn known_partner(&self, card: usize) -> Option<usize> {
        self.unmatched()
            .find(|&j| j != card && self.seen[j] && self.cards[j] == self.cards[card])
    }

    fn pick_unseen(&self, exclude: Option<usize>, rng: &mut GameRng) -> Option<usize> {
        let unseen: Vec<usize> = self
            .unmatched()
            .filter(|&i| !self.seen[i] && Some(i) != exclude)
            .collect();
        if let Some(&card) = rng.choose(&unseen) {
            return Some(card);
        }
        let any: Vec<usize> = self.unmatched().filter(|&i| Some(i) != exclude).collect();
        rng.choose(&any).copied()
    }

    fn play_ai(&mut self, rng: &mut GameRng) {
        let known_pair = self
            .unmatched()
            .filter(|&i| self.seen[i])
            .find_map(|i| self.known_partner(i).map(|j| (i, j)));
        if let Some((a, b)) = known_pair {
            self.flip(a);
            self.flip(b);
            return;
        }

        let Some(first) = self.pick_unseen(None, rng) else {
            return;
        };
        self.flip(first);
        let second = self
            .known_partner(first)
            .or_else(|| self.pick_unseen(Some(first), rng));
        if let Some(second) = second {
            self.flip(second);
        }
    }
}

impl MiniGame for MemoryGame {
    fn init(&mut self, participants: &[Participant], rng: &mut GameRng) {
        self.cards = (0..PAIRS).flat_map(|v| [v, v]).collect();
        rng.shuffle(&mut self.cards);
        self.matched = vec![false; self.cards.len()];
        self.seen = vec![false; self.cards.len()];
        self.scores = vec![0; participants.len()];
        self.ai = participants.iter().map(|p| p.is_ai).collect();
        self.turn = 0;
        self.first_pick = None;
    }

    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng) {
        if self.is_complete() || self.scores.is_empty() {
            return;
        }

        if self.ai[self.turn] {
            self.play_ai(rng);
            return;
        }

        for &(who, input) in inputs {
            if self.ai[self.turn] || self.is_complete() {
                break;
            }
            match input {
                MiniGameInput::Flip(card) if who == self.turn => {
                    self.flip(card);
                }
                _ => {}
            }
        }
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn is_complete(&self) -> bool {
        !self.matched.is_empty() && self.matched.iter().all(|m| *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn init(ai: bool) -> (MemoryGame, GameRng) {
        let mut game = MemoryGame::new();
        let mut rng = GameRng::new(21);
        let seats = [
            Participant::new(PlayerId::new(0), ai),
            Participant::new(PlayerId::new(1), ai),
        ];
        game.init(&seats, &mut rng);
        (game, rng)
    }

    fn pair_of(game: &MemoryGame, card: usize) -> usize {
        (0..game.card_count())
            .find(|&j| j != card && game.face(j) == game.face(card))
            .unwrap()
    }

    #[test]
    fn test_grid_has_eight_pairs() {
        let (game, _) = init(false);
        assert_eq!(game.card_count(), 16);
        for face in 0..8 {
            let count = (0..16).filter(|&i| game.face(i) == Some(face)).count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn test_match_scores_and_keeps_turn() {
        let (mut game, mut rng) = init(false);
        let partner = pair_of(&game, 0);

        game.tick(&[(0, MiniGameInput::Flip(0)), (0, MiniGameInput::Flip(partner))], &mut rng);
        assert!(game.is_matched(0));
        assert!(game.is_matched(partner));
        assert_eq!(game.scores(), &[10, 0]);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn test_miss_passes_turn() {
        let (mut game, mut rng) = init(false);
        let partner = pair_of(&game, 0);
        let miss = (1..16).find(|&j| j != partner).unwrap();

        game.tick(&[(0, MiniGameInput::Flip(0)), (0, MiniGameInput::Flip(miss))], &mut rng);
        assert_eq!(game.scores(), &[0, 0]);
        assert_eq!(game.turn(), 1);

        // Out-of-turn input is ignored.
        game.tick(&[(0, MiniGameInput::Flip(0)), (0, MiniGameInput::Flip(partner))], &mut rng);
        assert!(!game.is_matched(0));
    }

    #[test]
    fn test_ai_clears_the_grid() {
        let (mut game, mut rng) = init(true);
        for _ in 0..MemoryGame::DURATION {
            if game.is_complete() {
                break;
            }
            game.tick(&[], &mut rng);
        }

        assert!(game.is_complete());
        let total: u32 = game.scores().iter().sum();
        assert_eq!(total, 80);
        assert!(game.winner().is_some());
    }
}
