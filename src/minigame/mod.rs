//! Mini-games: short timed contests between the active players.
//!
//! A mini-game variant implements [`MiniGame`]. The
//! [`MiniGameArbiter`] owns at most one live session, feeds it buffered
//! player input once per tick, enforces its time budget and reports a single
//! [`MiniGameResult`] when it ends.
//!
//! ## Lifecycle
//!
//! ```text
//! init ─▶ tick ─▶ tick ─▶ ... ─┬─▶ is_complete()      → NaturalEnd
//!                              ├─▶ time budget spent  → TimeExpired
//!                              └─▶ force_abort()      → ForcedAbort
//!                                        │
//!                                        ▼
//!                                cleanup → result
//! ```
//!
//! Variants are deterministic given the RNG the arbiter hands them, so a
//! seeded session replays identically.

mod arbiter;
pub mod games;
mod registry;

pub use arbiter::{MiniGameArbiter, SessionInfo};
pub use registry::{MiniGameFactory, MiniGameInfo, MiniGameRegistry};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId};

/// Input a participant can send during a mini-game.
///
/// Each variant reacts to the inputs that make sense for it and ignores the
/// rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiniGameInput {
    /// Race: double speed this tick.
    Boost,
    /// Platform: dodge the hazard under you.
    Jump,
    /// Memory: turn over the card at this position.
    Flip(usize),
    /// Color: stand on this zone.
    MoveToZone(usize),
    /// Collect: pick up the shape at this slot.
    Collect(usize),
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReason {
    /// The variant's own win condition was met.
    NaturalEnd,
    /// The time budget ran out; the top scorer wins.
    TimeExpired,
    /// Cancelled from outside; nobody wins.
    ForcedAbort,
}

/// One seat taking part in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub player: PlayerId,
    /// AI participants are driven by the variant itself.
    pub is_ai: bool,
}

impl Participant {
    #[must_use]
    pub fn new(player: PlayerId, is_ai: bool) -> Self {
        Self { player, is_ai }
    }
}

/// Final report of a session, produced exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameResult {
    /// Registry id of the variant.
    pub kind: String,
    pub participants: SmallVec<[PlayerId; 4]>,
    /// Score per participant, same order as `participants`.
    pub scores: SmallVec<[u32; 4]>,
    /// Index into `participants`, or `None` for no winner.
    pub winner: Option<usize>,
    pub reason: CompletionReason,
    /// Ticks the session ran for.
    pub ticks: u32,
}

impl MiniGameResult {
    /// The winning seat, if any.
    #[must_use]
    pub fn winner_player(&self) -> Option<PlayerId> {
        self.winner.and_then(|i| self.participants.get(i).copied())
    }
}

/// A mini-game variant.
///
/// Participants are addressed by their index in the slice passed to
/// [`MiniGame::init`]. Implementations must be `Send` so a session can live
/// inside an engine moved across threads.
pub trait MiniGame: Send {
    /// Prepare a fresh session.
    fn init(&mut self, participants: &[Participant], rng: &mut GameRng);

    /// Advance one tick. `inputs` holds the human input gathered since the
    /// previous tick, in arrival order, keyed by participant index.
    fn tick(&mut self, inputs: &[(usize, MiniGameInput)], rng: &mut GameRng);

    /// Score per participant.
    fn scores(&self) -> &[u32];

    /// Whether the variant's own win condition has been met.
    fn is_complete(&self) -> bool;

    /// Winner on natural completion.
    fn winner(&self) -> Option<usize> {
        top_scorer(self.scores())
    }

    /// Release per-session resources. Called on every exit path.
    fn cleanup(&mut self) {}
}

/// Index of the highest score, lowest index on ties. `None` if nobody scored.
#[must_use]
pub fn top_scorer(scores: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}
