//! Mini-game arbiter: one live session at a time.

use smallvec::SmallVec;

use super::registry::{MiniGameInfo, MiniGameRegistry};
use super::{top_scorer, CompletionReason, MiniGame, MiniGameInput, MiniGameResult, Participant};
use crate::core::{GameRng, PlayerId, Rejection};

/// Summary of a session that has just started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionInfo {
    pub kind: String,
    pub name: String,
    pub duration_ticks: u32,
    pub participants: SmallVec<[Participant; 4]>,
}

struct LiveSession {
    info: MiniGameInfo,
    game: Box<dyn MiniGame>,
    participants: SmallVec<[Participant; 4]>,
    elapsed: u32,
    inputs: Vec<(usize, MiniGameInput)>,
    rng: GameRng,
}

/// Runs mini-game sessions.
///
/// ## Guarantees
///
/// - At most one session is live; `start` while one runs is rejected.
/// - Input is buffered and handed to the variant on the next tick.
/// - A session ends on its own win condition or when its time budget is
///   spent, whichever comes first. Ties at timeout go to the lowest
///   participant index; nobody wins if nobody scored.
/// - Every session yields exactly one result, and the variant's cleanup
///   runs on every exit path, forced aborts included.
pub struct MiniGameArbiter {
    registry: MiniGameRegistry,
    live: Option<LiveSession>,
}

impl MiniGameArbiter {
    #[must_use]
    pub fn new(registry: MiniGameRegistry) -> Self {
        Self { registry, live: None }
    }

    #[must_use]
    pub fn registry(&self) -> &MiniGameRegistry {
        &self.registry
    }

    /// Start a session.
    ///
    /// With `kind == None` a variant is drawn uniformly from those that
    /// support the participant count (or from all, if none do).
    pub fn start(
        &mut self,
        kind: Option<&str>,
        participants: &[Participant],
        rng: &mut GameRng,
    ) -> Result<SessionInfo, Rejection> {
        if self.live.is_some() {
            return Err(Rejection::MiniGameActive);
        }

        let id = match kind {
            Some(id) if self.registry.contains(id) => id.to_string(),
            Some(id) => return Err(Rejection::UnknownMiniGame(id.to_string())),
            None => self.select(participants.len(), rng).ok_or(Rejection::NoMiniGame)?,
        };
        let entry = self
            .registry
            .entry(&id)
            .ok_or_else(|| Rejection::UnknownMiniGame(id.clone()))?;

        let mut session_rng = rng.fork();
        let mut game = (entry.factory)();
        game.init(participants, &mut session_rng);

        let info = entry.info.clone();
        let participants: SmallVec<[Participant; 4]> = participants.iter().copied().collect();
        log::info!(
            "Mini-game '{}' started with {} participants for {} ticks",
            info.id,
            participants.len(),
            info.duration_ticks
        );

        let started = SessionInfo {
            kind: info.id.clone(),
            name: info.name.clone(),
            duration_ticks: info.duration_ticks,
            participants: participants.clone(),
        };
        self.live = Some(LiveSession {
            info,
            game,
            participants,
            elapsed: 0,
            inputs: Vec::new(),
            rng: session_rng,
        });
        Ok(started)
    }

    fn select(&self, count: usize, rng: &mut GameRng) -> Option<String> {
        let ids = self.registry.ids();
        let eligible: Vec<&str> = ids
            .iter()
            .copied()
            .filter(|id| self.registry.info(id).is_some_and(|info| info.supports(count)))
            .collect();
        let pool = if eligible.is_empty() { &ids } else { &eligible };
        rng.choose(pool).map(|id| (*id).to_string())
    }

    /// Buffer input from a participant for the next tick.
    pub fn submit_input(&mut self, player: PlayerId, input: MiniGameInput) -> Result<(), Rejection> {
        let live = self.live.as_mut().ok_or(Rejection::NoMiniGame)?;
        let index = live
            .participants
            .iter()
            .position(|p| p.player == player)
            .ok_or(Rejection::NotParticipant(player))?;
        live.inputs.push((index, input));
        Ok(())
    }

    /// Advance the live session by one tick.
    ///
    /// Returns the result on the tick the session ends, `None` otherwise.
    pub fn tick(&mut self) -> Option<MiniGameResult> {
        let live = self.live.as_mut()?;
        let inputs = std::mem::take(&mut live.inputs);
        live.game.tick(&inputs, &mut live.rng);
        live.elapsed += 1;

        let reason = if live.game.is_complete() {
            CompletionReason::NaturalEnd
        } else if live.elapsed >= live.info.duration_ticks {
            CompletionReason::TimeExpired
        } else {
            return None;
        };
        self.finish(reason)
    }

    /// Tick until the live session ends.
    pub fn run_to_completion(&mut self) -> Option<MiniGameResult> {
        while self.live.is_some() {
            if let Some(result) = self.tick() {
                return Some(result);
            }
        }
        None
    }

    /// End the live session immediately with no winner.
    pub fn force_abort(&mut self) -> Option<MiniGameResult> {
        self.finish(CompletionReason::ForcedAbort)
    }

    fn finish(&mut self, reason: CompletionReason) -> Option<MiniGameResult> {
        let mut live = self.live.take()?;
        let scores: SmallVec<[u32; 4]> = live.game.scores().iter().copied().collect();
        let winner = match reason {
            CompletionReason::NaturalEnd => live.game.winner(),
            CompletionReason::TimeExpired => top_scorer(&scores),
            CompletionReason::ForcedAbort => None,
        };
        let winner = match winner {
            Some(i) if i >= live.participants.len() => {
                log::warn!("Mini-game '{}' reported out-of-range winner {i}", live.info.id);
                None
            }
            other => other,
        };
        live.game.cleanup();

        log::info!(
            "Mini-game '{}' ended after {} ticks ({:?})",
            live.info.id,
            live.elapsed,
            reason
        );
        Some(MiniGameResult {
            kind: live.info.id,
            participants: live.participants.iter().map(|p| p.player).collect(),
            scores,
            winner,
            reason,
            ticks: live.elapsed,
        })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    /// Id of the live variant.
    #[must_use]
    pub fn active_kind(&self) -> Option<&str> {
        self.live.as_ref().map(|l| l.info.id.as_str())
    }

    /// Ticks left before the live session times out.
    #[must_use]
    pub fn remaining_ticks(&self) -> Option<u32> {
        self.live
            .as_ref()
            .map(|l| l.info.duration_ticks.saturating_sub(l.elapsed))
    }

    /// Scores of the live session.
    #[must_use]
    pub fn scores(&self) -> Option<&[u32]> {
        self.live.as_ref().map(|l| l.game.scores())
    }
}

impl std::fmt::Debug for MiniGameArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniGameArbiter")
            .field("registry", &self.registry)
            .field("active", &self.active_kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigame::MiniGameInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scores a point per Boost; completes once `finish_at` ticks have run.
    struct Scripted {
        scores: Vec<u32>,
        ticks: u32,
        finish_at: Option<u32>,
        winner: Option<usize>,
        cleanups: Arc<AtomicUsize>,
    }

    impl MiniGame for Scripted {
        fn init(&mut self, participants: &[Participant], _rng: &mut GameRng) {
            self.scores = vec![0; participants.len()];
        }

        fn tick(&mut self, inputs: &[(usize, MiniGameInput)], _rng: &mut GameRng) {
            self.ticks += 1;
            for (i, input) in inputs {
                if *input == MiniGameInput::Boost {
                    self.scores[*i] += 1;
                }
            }
        }

        fn scores(&self) -> &[u32] {
            &self.scores
        }

        fn is_complete(&self) -> bool {
            self.finish_at.is_some_and(|t| self.ticks >= t)
        }

        fn winner(&self) -> Option<usize> {
            self.winner
        }

        fn cleanup(&mut self) {
            self.cleanups.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn arbiter(finish_at: Option<u32>, winner: Option<usize>) -> (MiniGameArbiter, Arc<AtomicUsize>) {
        let cleanups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cleanups);
        let mut registry = MiniGameRegistry::new();
        registry
            .register(
                MiniGameInfo::new("scripted", "Scripted", 5),
                Arc::new(move || {
                    Box::new(Scripted {
                        scores: Vec::new(),
                        ticks: 0,
                        finish_at,
                        winner,
                        cleanups: Arc::clone(&counter),
                    }) as Box<dyn MiniGame>
                }),
            )
            .unwrap();
        (MiniGameArbiter::new(registry), cleanups)
    }

    fn players() -> Vec<Participant> {
        vec![
            Participant::new(PlayerId::new(0), false),
            Participant::new(PlayerId::new(2), false),
        ]
    }

    #[test]
    fn test_start_rejected_while_active() {
        let (mut arbiter, _) = arbiter(None, None);
        let mut rng = GameRng::new(1);

        let info = arbiter.start(None, &players(), &mut rng).unwrap();
        assert_eq!(info.kind, "scripted");
        assert_eq!(info.duration_ticks, 5);
        assert!(arbiter.is_active());

        assert_eq!(arbiter.start(None, &players(), &mut rng), Err(Rejection::MiniGameActive));
        assert_eq!(arbiter.active_kind(), Some("scripted"));
    }

    #[test]
    fn test_unknown_kind() {
        let (mut arbiter, _) = arbiter(None, None);
        let result = arbiter.start(Some("bowling"), &players(), &mut GameRng::new(1));
        assert_eq!(result, Err(Rejection::UnknownMiniGame("bowling".into())));
        assert!(!arbiter.is_active());
    }

    #[test]
    fn test_empty_registry_has_nothing_to_start() {
        let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::new());
        let result = arbiter.start(None, &players(), &mut GameRng::new(1));
        assert_eq!(result, Err(Rejection::NoMiniGame));
    }

    #[test]
    fn test_timeout_picks_top_scorer_once() {
        let (mut arbiter, cleanups) = arbiter(None, None);
        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();

        arbiter.submit_input(PlayerId::new(2), MiniGameInput::Boost).unwrap();
        for _ in 0..4 {
            assert_eq!(arbiter.tick(), None);
        }
        assert_eq!(arbiter.remaining_ticks(), Some(1));

        let result = arbiter.tick().unwrap();
        assert_eq!(result.reason, CompletionReason::TimeExpired);
        assert_eq!(result.winner_player(), Some(PlayerId::new(2)));
        assert_eq!(result.scores.as_slice(), &[0, 1]);
        assert_eq!(result.ticks, 5);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        assert!(!arbiter.is_active());
        assert_eq!(arbiter.tick(), None);
        assert_eq!(arbiter.force_abort(), None);
    }

    #[test]
    fn test_timeout_without_scores_has_no_winner() {
        let (mut arbiter, _) = arbiter(None, None);
        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();

        let result = arbiter.run_to_completion().unwrap();
        assert_eq!(result.reason, CompletionReason::TimeExpired);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_natural_end_uses_variant_winner() {
        let (mut arbiter, _) = arbiter(Some(2), Some(1));
        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();

        assert_eq!(arbiter.tick(), None);
        let result = arbiter.tick().unwrap();
        assert_eq!(result.reason, CompletionReason::NaturalEnd);
        assert_eq!(result.winner, Some(1));
    }

    #[test]
    fn test_out_of_range_winner_is_dropped() {
        let (mut arbiter, _) = arbiter(Some(1), Some(9));
        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();

        let result = arbiter.tick().unwrap();
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_force_abort_runs_cleanup() {
        let (mut arbiter, cleanups) = arbiter(None, None);
        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();
        arbiter.submit_input(PlayerId::new(0), MiniGameInput::Boost).unwrap();
        arbiter.tick();

        let result = arbiter.force_abort().unwrap();
        assert_eq!(result.reason, CompletionReason::ForcedAbort);
        assert_eq!(result.winner, None);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        // A new session can start afterwards.
        assert!(arbiter.start(None, &players(), &mut GameRng::new(2)).is_ok());
    }

    #[test]
    fn test_input_validation() {
        let (mut arbiter, _) = arbiter(None, None);
        assert_eq!(
            arbiter.submit_input(PlayerId::new(0), MiniGameInput::Jump),
            Err(Rejection::NoMiniGame)
        );

        arbiter.start(None, &players(), &mut GameRng::new(1)).unwrap();
        assert_eq!(
            arbiter.submit_input(PlayerId::new(1), MiniGameInput::Jump),
            Err(Rejection::NotParticipant(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_random_selection_respects_player_limits() {
        let mut registry = MiniGameRegistry::with_builtins();
        registry
            .register(
                MiniGameInfo::new("solo", "Solo", 3).with_players(1, 1),
                Arc::new(|| Box::new(crate::minigame::games::RaceGame::new()) as Box<dyn MiniGame>),
            )
            .unwrap();
        let mut arbiter = MiniGameArbiter::new(registry);
        let mut rng = GameRng::new(3);

        for _ in 0..30 {
            let info = arbiter.start(None, &players(), &mut rng).unwrap();
            assert_ne!(info.kind, "solo");
            arbiter.force_abort();
        }
    }
}
