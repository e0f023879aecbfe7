//! AI decision policies.

use crate::board::BoardSpace;
use crate::core::{GameRng, Money, PlayerId, SessionView};
use crate::engine::PropertyDecision;

/// Chooses what an AI seat does on a property space.
///
/// Called when an AI seat's deliberation suspension is resumed in
/// `PropertyDecision`. The policy sees the session read-only and must draw
/// any randomness from the provided RNG so seeded games replay exactly.
pub trait AiPolicy: Send {
    fn decide(
        &mut self,
        view: &SessionView<'_>,
        player: PlayerId,
        space: &BoardSpace,
        rng: &mut GameRng,
    ) -> PropertyDecision;
}

/// Buys while it can keep a cash reserve; sometimes challenges instead of
/// paying rent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CautiousBuyer {
    reserve: Money,
    challenge_chance: f64,
}

impl Default for CautiousBuyer {
    fn default() -> Self {
        Self {
            reserve: 200,
            challenge_chance: 0.2,
        }
    }
}

impl CautiousBuyer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cash kept back after a purchase (builder pattern).
    #[must_use]
    pub fn with_reserve(mut self, reserve: Money) -> Self {
        self.reserve = reserve.max(0);
        self
    }

    /// Probability of challenging on someone else's property (builder pattern).
    #[must_use]
    pub fn with_challenge_chance(mut self, chance: f64) -> Self {
        self.challenge_chance = chance.clamp(0.0, 1.0);
        self
    }
}

impl AiPolicy for CautiousBuyer {
    fn decide(
        &mut self,
        view: &SessionView<'_>,
        player: PlayerId,
        space: &BoardSpace,
        rng: &mut GameRng,
    ) -> PropertyDecision {
        let cash = view.player(player).map_or(0, |p| p.cash());
        match space.owner() {
            None if space.can_be_bought() && cash - space.price >= self.reserve => PropertyDecision::Buy,
            None => PropertyDecision::Skip,
            Some(owner) if owner == player => {
                if cash < self.reserve / 2 {
                    PropertyDecision::Sell
                } else {
                    PropertyDecision::Skip
                }
            }
            Some(_) if rng.gen_bool(self.challenge_chance) => PropertyDecision::Challenge,
            Some(_) => PropertyDecision::Skip,
        }
    }
}
