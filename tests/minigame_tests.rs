//! Mini-game arbiter and built-in variants through the public API.

use std::sync::Arc;

use polyboard::core::{GameRng, PlayerId, Rejection};
use polyboard::minigame::{
    CompletionReason, MiniGame, MiniGameArbiter, MiniGameInfo, MiniGameInput, MiniGameRegistry, Participant,
};

fn ai(n: u8) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(PlayerId::new(i), true)).collect()
}

fn humans(n: u8) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(PlayerId::new(i), false)).collect()
}

/// Never finishes and never scores.
struct Idle {
    scores: Vec<u32>,
}

impl MiniGame for Idle {
    fn init(&mut self, participants: &[Participant], _rng: &mut GameRng) {
        self.scores = vec![0; participants.len()];
    }

    fn tick(&mut self, _inputs: &[(usize, MiniGameInput)], _rng: &mut GameRng) {}

    fn scores(&self) -> &[u32] {
        &self.scores
    }

    fn is_complete(&self) -> bool {
        false
    }
}

fn idle_factory() -> polyboard::minigame::MiniGameFactory {
    Arc::new(|| Box::new(Idle { scores: Vec::new() }) as Box<dyn MiniGame>)
}

#[test]
fn test_every_builtin_finishes_within_budget() {
    let registry = MiniGameRegistry::with_builtins();
    let ids: Vec<String> = registry.ids().into_iter().map(String::from).collect();
    let mut arbiter = MiniGameArbiter::new(registry);
    let mut rng = GameRng::new(42);

    for id in ids {
        let info = arbiter.start(Some(&id), &ai(3), &mut rng).unwrap();
        assert_eq!(info.kind, id);
        assert_eq!(info.participants.len(), 3);

        let result = arbiter.run_to_completion().unwrap();
        assert_eq!(result.kind, id);
        assert!(result.ticks >= 1 && result.ticks <= info.duration_ticks, "{id}: {} ticks", result.ticks);
        assert!(matches!(
            result.reason,
            CompletionReason::NaturalEnd | CompletionReason::TimeExpired
        ));
        assert_eq!(result.scores.len(), 3);
        assert!(result.winner.map_or(true, |w| w < 3));
        assert!(!arbiter.is_active());
    }
}

#[test]
fn test_one_live_session_at_a_time() {
    let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
    let mut rng = GameRng::new(1);

    arbiter.start(Some("race"), &ai(2), &mut rng).unwrap();
    assert_eq!(
        arbiter.start(Some("memory"), &ai(2), &mut rng),
        Err(Rejection::MiniGameActive)
    );
    assert_eq!(arbiter.active_kind(), Some("race"));

    arbiter.force_abort().unwrap();
    assert!(arbiter.start(Some("memory"), &ai(2), &mut rng).is_ok());
}

#[test]
fn test_unknown_kind_and_empty_registry() {
    let mut rng = GameRng::new(1);
    let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
    assert_eq!(
        arbiter.start(Some("tetris"), &ai(2), &mut rng),
        Err(Rejection::UnknownMiniGame("tetris".to_string()))
    );
    assert!(!arbiter.is_active());

    let mut empty = MiniGameArbiter::new(MiniGameRegistry::new());
    assert_eq!(empty.start(None, &ai(2), &mut rng), Err(Rejection::NoMiniGame));
}

#[test]
fn test_inputs_only_from_participants() {
    let mut rng = GameRng::new(1);
    let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
    assert_eq!(
        arbiter.submit_input(PlayerId::new(0), MiniGameInput::Boost),
        Err(Rejection::NoMiniGame)
    );

    arbiter.start(Some("race"), &humans(2), &mut rng).unwrap();
    assert!(arbiter.submit_input(PlayerId::new(1), MiniGameInput::Boost).is_ok());
    assert_eq!(
        arbiter.submit_input(PlayerId::new(3), MiniGameInput::Boost),
        Err(Rejection::NotParticipant(PlayerId::new(3)))
    );
}

#[test]
fn test_timeout_awards_top_scorer() {
    let mut rng = GameRng::new(8);
    let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
    arbiter.start(Some("collect"), &humans(3), &mut rng).unwrap();
    assert_eq!(arbiter.remaining_ticks(), Some(45));

    arbiter.submit_input(PlayerId::new(2), MiniGameInput::Collect(4)).unwrap();
    assert!(arbiter.tick().is_none());
    assert_eq!(arbiter.remaining_ticks(), Some(44));
    assert!(arbiter.scores().unwrap()[2] >= 10);

    let result = arbiter.run_to_completion().unwrap();
    assert_eq!(result.reason, CompletionReason::TimeExpired);
    assert_eq!(result.ticks, 45);
    assert_eq!(result.winner, Some(2));
    assert_eq!(result.winner_player(), Some(PlayerId::new(2)));
}

#[test]
fn test_no_score_no_winner() {
    let mut registry = MiniGameRegistry::new();
    registry.register(MiniGameInfo::new("idle", "Idle", 3), idle_factory()).unwrap();
    let mut arbiter = MiniGameArbiter::new(registry);
    let mut rng = GameRng::new(0);

    arbiter.start(None, &humans(2), &mut rng).unwrap();
    let result = arbiter.run_to_completion().unwrap();
    assert_eq!(result.reason, CompletionReason::TimeExpired);
    assert_eq!(result.winner, None);
    assert_eq!(result.ticks, 3);
}

#[test]
fn test_abort_reports_once_without_winner() {
    let mut rng = GameRng::new(3);
    let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
    arbiter.start(Some("race"), &humans(2), &mut rng).unwrap();
    arbiter.tick();
    arbiter.tick();

    let result = arbiter.force_abort().unwrap();
    assert_eq!(result.reason, CompletionReason::ForcedAbort);
    assert_eq!(result.winner, None);
    assert_eq!(result.ticks, 2);
    assert!(arbiter.force_abort().is_none());
    assert!(arbiter.tick().is_none());
}

#[test]
fn test_random_selection_respects_player_limits() {
    let mut registry = MiniGameRegistry::new();
    registry
        .register(MiniGameInfo::new("solo", "Solo", 5).with_players(1, 1), idle_factory())
        .unwrap();
    registry
        .register(MiniGameInfo::new("party", "Party", 5).with_players(2, 8), idle_factory())
        .unwrap();
    let mut arbiter = MiniGameArbiter::new(registry);

    for seed in 0..20 {
        let mut rng = GameRng::new(seed);
        assert_eq!(arbiter.start(None, &humans(3), &mut rng).unwrap().kind, "party");
        arbiter.force_abort();
        assert_eq!(arbiter.start(None, &humans(1), &mut rng).unwrap().kind, "solo");
        arbiter.force_abort();
    }
}

#[test]
fn test_seeded_sessions_repeat() {
    let run = || {
        let mut arbiter = MiniGameArbiter::new(MiniGameRegistry::with_builtins());
        let mut rng = GameRng::new(77);
        arbiter.start(None, &ai(4), &mut rng).unwrap();
        arbiter.run_to_completion().unwrap()
    };
    assert_eq!(run(), run());
}
