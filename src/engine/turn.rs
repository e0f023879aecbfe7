//! The turn engine: the single owner of a session's phase state machine.
//!
//! Every state change flows through here. Public operations either apply
//! completely and report what the engine needs next ([`Progress`]), or are
//! rejected with a [`Rejection`] and change nothing. After every transition
//! the engine publishes events and hands a fresh snapshot to each
//! registered broadcaster.

use crate::ai::AiPolicy;
use crate::board::{BoardProvider, SpaceIndex, SpaceKind};
use crate::core::{GameConfig, GameRng, GameSession, PlayerId, Registry, Rejection, SessionView, TurnRecord};
use crate::economy::{EconomyResolver, Settlement, Transaction, TransactionKind};
use crate::events::{Cue, EventBus, EventListener, GameEvent, MessageCategory};
use crate::minigame::{MiniGameArbiter, MiniGameInput, MiniGameResult, Participant};
use crate::rules::{EndReason, GameResult, WinEvaluator};
use crate::sync::{StateBroadcaster, StateSnapshot, ValidatedAction};

use super::action::{ActionKind, PlayerAction, PropertyDecision};
use super::phase::Phase;
use super::suspend::{Pending, Progress, SuspendToken, Suspension};

#[derive(Clone, Copy, Debug)]
struct PendingOp {
    token: SuspendToken,
    work: Pending,
    ticks: u32,
}

impl PendingOp {
    fn suspension(&self) -> Suspension {
        Suspension {
            token: self.token,
            kind: self.work.kind(),
            ticks: self.ticks,
        }
    }
}

/// Notes on the turn in progress, folded into a [`TurnRecord`] when it ends.
#[derive(Clone, Debug, Default)]
struct TurnDraft {
    roll: Option<u8>,
    landed: Option<SpaceIndex>,
    notes: Vec<String>,
}

/// Drives one game session.
///
/// Build with [`super::EngineBuilder`], then call [`TurnEngine::start`].
///
/// ## Turn cycle
///
/// `roll` moves the current player's token one step per suspension. When
/// the last step lands, the space decides what follows: a property waits for
/// `decide`, a special space pays a bonus, charges a tax or launches a
/// mini-game, and a corner or the start space ends the turn.
///
/// ## Pause
///
/// While paused only `unpause`, `cancel_pending` and `force_end` are
/// accepted.
pub struct TurnEngine {
    config: GameConfig,
    session: GameSession,
    rng: GameRng,
    economy: EconomyResolver,
    arbiter: MiniGameArbiter,
    evaluator: WinEvaluator,
    policy: Box<dyn AiPolicy>,
    bus: EventBus,
    broadcasters: Vec<Box<dyn StateBroadcaster>>,
    pending: Option<PendingOp>,
    next_token: u64,
    snapshot_sequence: u64,
    draft: Option<TurnDraft>,
}

impl TurnEngine {
    pub(crate) fn from_parts(
        config: GameConfig,
        registry: Registry,
        rng: GameRng,
        arbiter: MiniGameArbiter,
        policy: Box<dyn AiPolicy>,
        bus: EventBus,
        broadcasters: Vec<Box<dyn StateBroadcaster>>,
    ) -> Self {
        let evaluator = WinEvaluator::from_config(&config);
        Self {
            config,
            session: GameSession::new(registry),
            rng,
            economy: EconomyResolver::new(),
            arbiter,
            evaluator,
            policy,
            bus,
            broadcasters,
            pending: None,
            next_token: 0,
            snapshot_sequence: 0,
            draft: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the session.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        self.session.view()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.session.current
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.session.round
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.paused
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        self.session.outcome
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<TurnRecord> {
        &self.session.history
    }

    /// Every money movement so far.
    #[must_use]
    pub fn ledger(&self) -> &im::Vector<Transaction> {
        self.economy.ledger()
    }

    #[must_use]
    pub fn arbiter(&self) -> &MiniGameArbiter {
        &self.arbiter
    }

    /// The suspension the engine is waiting on, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Suspension> {
        self.pending.as_ref().map(PendingOp::suspension)
    }

    /// What the engine needs next.
    #[must_use]
    pub fn progress(&self) -> Progress {
        if let Some(result) = self.session.outcome {
            return Progress::Finished(result);
        }
        if let Some(op) = &self.pending {
            return Progress::Suspended(op.suspension());
        }
        Progress::AwaitingInput {
            player: self.session.current,
            phase: self.session.phase,
        }
    }

    /// Snapshot of the current state, as broadcasters receive it.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.session.view(), self.snapshot_sequence)
    }

    // === Observers ===

    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.bus.subscribe(listener);
    }

    pub fn add_broadcaster(&mut self, broadcaster: Box<dyn StateBroadcaster>) {
        self.broadcasters.push(broadcaster);
    }

    // === Player actions ===

    /// Leave setup and begin the first turn.
    pub fn start(&mut self) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            if engine.session.phase != Phase::Setup {
                return Err(Rejection::AlreadyStarted);
            }
            if engine.session.paused {
                return Err(Rejection::Paused);
            }

            let players = engine.session.registry.player_count();
            log::info!("Starting game with {players} players");
            engine.emit(GameEvent::GameStarted { players });

            let first = engine.session.registry.active_players().next();
            match first {
                Some(first) => {
                    engine.session.current = first;
                    engine.begin_turn();
                }
                None => engine.finish_game(GameResult::new(None, EndReason::Elimination)),
            }
            Ok(engine.progress())
        })
    }

    /// Roll the die for the current player.
    pub fn roll(&mut self, player: PlayerId) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            engine.check_turn_action(player, ActionKind::Roll)?;
            engine.perform_roll(player);
            Ok(engine.progress())
        })
    }

    /// Resolve the property the current player landed on.
    ///
    /// A purchase or sale the economy refuses is reported as a message and
    /// still ends the turn.
    pub fn decide(&mut self, player: PlayerId, decision: PropertyDecision) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            engine.check_turn_action(player, ActionKind::Decide)?;
            engine.apply_decision(player, decision, None);
            Ok(engine.progress())
        })
    }

    /// Challenge with a specific mini-game variant.
    pub fn challenge(&mut self, player: PlayerId, kind: &str) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            engine.check_turn_action(player, ActionKind::Decide)?;
            if !engine.arbiter.registry().contains(kind) {
                return Err(Rejection::UnknownMiniGame(kind.to_string()));
            }
            engine.apply_decision(player, PropertyDecision::Challenge, Some(kind));
            Ok(engine.progress())
        })
    }

    /// Forward mini-game input from a participant.
    pub fn mini_game_input(&mut self, player: PlayerId, input: MiniGameInput) -> Result<(), Rejection> {
        self.guarded(|engine| {
            engine.check_running()?;
            if engine.session.phase != Phase::MiniGame {
                return Err(Rejection::WrongPhase {
                    action: ActionKind::MiniGameInput,
                    phase: engine.session.phase,
                });
            }
            engine.arbiter.submit_input(player, input)
        })
    }

    /// Apply an action that a [`crate::sync::SessionAuthority`] accepted.
    ///
    /// The engine validates it again against the live state.
    pub fn apply_validated(&mut self, validated: ValidatedAction) -> Result<Progress, Rejection> {
        let slot = validated.slot;
        match validated.action {
            PlayerAction::Roll => self.roll(slot),
            PlayerAction::Decide(decision) => self.decide(slot, decision),
            PlayerAction::MiniGame(input) => self.mini_game_input(slot, input).map(|()| self.progress()),
        }
    }

    // === Suspensions ===

    /// Continue the pending suspension identified by `token`.
    ///
    /// Resuming a mini-game suspension runs the session to completion.
    pub fn resume(&mut self, token: SuspendToken) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            engine.check_running()?;
            let op = engine.pending.ok_or(Rejection::NothingPending)?;
            if op.token != token {
                return Err(Rejection::UnknownToken(token.0));
            }
            engine.pending = None;
            engine.run_pending(op.work);
            Ok(engine.progress())
        })
    }

    /// Advance the running mini-game by one tick.
    pub fn tick_mini_game(&mut self) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            engine.check_running()?;
            if engine.session.phase != Phase::MiniGame {
                return Err(Rejection::NoMiniGame);
            }
            match engine.arbiter.tick() {
                Some(result) => {
                    engine.pending = None;
                    engine.finish_mini_game(result);
                }
                None => {
                    let remaining = engine.arbiter.remaining_ticks().unwrap_or(0);
                    if let Some(op) = engine.pending.as_mut() {
                        op.ticks = remaining;
                    }
                }
            }
            Ok(engine.progress())
        })
    }

    // === Supervision ===

    pub fn pause(&mut self) -> Result<(), Rejection> {
        self.guarded(|engine| {
            if engine.session.phase.is_terminal() {
                return Err(Rejection::GameOver);
            }
            if engine.session.paused {
                return Err(Rejection::Paused);
            }
            engine.set_paused(true);
            Ok(())
        })
    }

    pub fn unpause(&mut self) -> Result<(), Rejection> {
        self.guarded(|engine| {
            if !engine.session.paused {
                return Err(Rejection::NotPaused);
            }
            engine.set_paused(false);
            Ok(())
        })
    }

    /// Cut the pending suspension short.
    ///
    /// A running mini-game is aborted with no winner. A movement sequence
    /// applies its remaining steps at once and resolves the landing. An AI
    /// deliberation acts immediately. Allowed while paused.
    pub fn cancel_pending(&mut self) -> Result<Progress, Rejection> {
        self.guarded(|engine| {
            if engine.session.phase.is_terminal() {
                return Err(Rejection::GameOver);
            }
            let op = engine.pending.take().ok_or(Rejection::NothingPending)?;
            log::info!("Cancelling pending {:?}", op.work.kind());

            match op.work {
                Pending::MiniGame => match engine.arbiter.force_abort() {
                    Some(result) => engine.finish_mini_game(result),
                    None => engine.end_turn(),
                },
                Pending::Move { remaining } => {
                    for _ in 0..remaining {
                        engine.advance_token();
                    }
                    engine.land();
                }
                work @ (Pending::AiRoll { .. } | Pending::AiDecide { .. }) => engine.run_pending(work),
            }
            Ok(engine.progress())
        })
    }

    /// End the game now. The richest active player wins by forfeit.
    ///
    /// A game that has not started cannot be forfeited.
    pub fn force_end(&mut self) -> Result<GameResult, Rejection> {
        self.guarded(|engine| {
            if engine.session.phase.is_terminal() {
                return Err(Rejection::GameOver);
            }
            if engine.session.phase == Phase::Setup {
                return Err(Rejection::NotStarted);
            }
            if let Some(result) = engine.arbiter.force_abort() {
                engine.emit(GameEvent::MiniGameEnded {
                    kind: result.kind,
                    winner: None,
                    reason: result.reason,
                });
            }
            engine.pending = None;
            let result = engine.evaluator.forfeit(&engine.session.registry);
            engine.record_turn();
            engine.finish_game(result);
            Ok(result)
        })
    }

    // === Internals ===

    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, Rejection>) -> Result<T, Rejection> {
        let result = op(self);
        result.map_err(|reason| {
            log::warn!("Rejected: {reason}");
            self.emit(GameEvent::message(MessageCategory::Rejected, reason.to_string()));
            reason
        })
    }

    fn check_running(&self) -> Result<(), Rejection> {
        if self.session.phase.is_terminal() {
            return Err(Rejection::GameOver);
        }
        if self.session.paused {
            return Err(Rejection::Paused);
        }
        Ok(())
    }

    fn check_turn_action(&self, player: PlayerId, kind: ActionKind) -> Result<(), Rejection> {
        self.check_running()?;
        if self.pending.is_some() {
            return Err(Rejection::Suspended);
        }
        let seat = self
            .session
            .registry
            .player(player)
            .ok_or(Rejection::UnknownPlayer(player))?;
        if !seat.is_active() {
            return Err(Rejection::PlayerBankrupt(player));
        }
        let phase = self.session.phase;
        if !phase.accepts(kind) {
            return Err(Rejection::WrongPhase { action: kind, phase });
        }
        if player != self.session.current {
            return Err(Rejection::NotYourTurn(player));
        }
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        let view = self.session.view();
        self.bus.publish(&event, &view);
    }

    fn say(&mut self, category: MessageCategory, text: String) {
        self.emit(GameEvent::message(category, text));
    }

    fn broadcast(&mut self) {
        self.snapshot_sequence += 1;
        if self.broadcasters.is_empty() {
            return;
        }
        let snapshot = StateSnapshot::capture(&self.session.view(), self.snapshot_sequence);
        for broadcaster in &mut self.broadcasters {
            broadcaster.broadcast_state(&snapshot);
        }
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.session.phase;
        self.session.phase = to;
        log::debug!("Phase: {from} -> {to}");
        self.emit(GameEvent::PhaseChanged { from, to });
        self.broadcast();
    }

    fn set_paused(&mut self, paused: bool) {
        self.session.paused = paused;
        log::info!("Game {}", if paused { "paused" } else { "resumed" });
        self.emit(GameEvent::PauseChanged(paused));
        self.broadcast();
    }

    fn suspend(&mut self, work: Pending, ticks: u32) {
        self.next_token += 1;
        self.pending = Some(PendingOp {
            token: SuspendToken(self.next_token),
            work,
            ticks,
        });
    }

    fn note(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.notes.push(text.into());
        }
    }

    fn name(&self, player: PlayerId) -> String {
        self.session
            .registry
            .player(player)
            .map_or_else(|| player.to_string(), |p| p.name.clone())
    }

    fn is_ai(&self, player: PlayerId) -> bool {
        self.session.registry.player(player).is_some_and(|p| p.is_ai)
    }

    fn position(&self, player: PlayerId) -> Option<SpaceIndex> {
        self.session.registry.player(player).map(|p| p.position)
    }

    fn deliberation_ticks(&mut self) -> u32 {
        self.rng.gen_ticks(self.config.ai_deliberation_ticks.clone())
    }

    fn begin_turn(&mut self) {
        let player = self.session.current;
        let round = self.session.round;
        self.draft = Some(TurnDraft::default());
        self.set_phase(Phase::PlayerTurn);
        self.emit(GameEvent::TurnAdvanced { player, round });
        let name = self.name(player);
        self.say(MessageCategory::Info, format!("{name}'s turn"));

        if self.is_ai(player) {
            let ticks = self.deliberation_ticks();
            self.suspend(Pending::AiRoll { player }, ticks);
        }
    }

    fn run_pending(&mut self, work: Pending) {
        match work {
            Pending::AiRoll { player } => self.perform_roll(player),
            Pending::AiDecide { player } => {
                let decision = self.ai_decision(player);
                log::debug!("{player} (AI) chose {decision:?}");
                self.apply_decision(player, decision, None);
            }
            Pending::Move { remaining } => {
                self.advance_token();
                let left = remaining.saturating_sub(1);
                if left > 0 {
                    self.suspend(Pending::Move { remaining: left }, self.config.ticks_per_step);
                } else {
                    self.land();
                }
            }
            Pending::MiniGame => match self.arbiter.run_to_completion() {
                Some(result) => self.finish_mini_game(result),
                None => self.end_turn(),
            },
        }
    }

    fn ai_decision(&mut self, player: PlayerId) -> PropertyDecision {
        let space = self
            .position(player)
            .and_then(|index| self.session.registry.space(index))
            .cloned();
        let Some(space) = space else {
            return PropertyDecision::Skip;
        };
        let view = self.session.view();
        self.policy.decide(&view, player, &space, &mut self.rng)
    }

    fn perform_roll(&mut self, player: PlayerId) {
        self.set_phase(Phase::Rolling);
        let value = self.rng.roll_die(self.config.die_sides);
        log::debug!("{player} rolled {value}");
        if let Some(draft) = self.draft.as_mut() {
            draft.roll = Some(value);
        }
        self.emit(GameEvent::DiceRolled { player, value });
        self.emit(GameEvent::Cue(Cue::DiceRoll));
        let name = self.name(player);
        self.say(MessageCategory::Info, format!("{name} rolled a {value}"));

        self.set_phase(Phase::Moving);
        self.suspend(Pending::Move { remaining: value }, self.config.ticks_per_step);
    }

    /// Move the current token one space, paying the pass bonus on reaching start.
    fn advance_token(&mut self) {
        let player = self.session.current;
        let Some(from) = self.position(player) else {
            return;
        };
        let to = self.session.registry.board().next_index(from);
        if let Some(p) = self.session.registry.player_mut(player) {
            p.position = to;
        }
        self.emit(GameEvent::PlayerMoved { player, position: to });
        self.emit(GameEvent::Cue(Cue::Step));

        if to == SpaceIndex::START {
            let bonus = self.config.pass_start_bonus;
            match self.economy.credit_bonus(&mut self.session.registry, player, bonus) {
                Ok(settlement) => {
                    self.emit(GameEvent::Cue(Cue::PassStart));
                    let name = self.name(player);
                    self.say(
                        MessageCategory::Economy,
                        format!("{name} passed START and collected ${}", settlement.amount()),
                    );
                    self.publish_settlement(&settlement);
                }
                Err(reason) => log::warn!("Pass bonus for {player} refused: {reason}"),
            }
        }
        self.broadcast();
    }

    fn land(&mut self) {
        let player = self.session.current;
        let Some(index) = self.position(player) else {
            self.end_turn();
            return;
        };
        if let Some(draft) = self.draft.as_mut() {
            draft.landed = Some(index);
        }
        let Some(space) = self.session.registry.space(index).cloned() else {
            self.end_turn();
            return;
        };
        log::debug!("{player} landed on space {index} ({:?})", space.kind);

        match space.kind {
            SpaceKind::Property => {
                self.set_phase(Phase::PropertyDecision);
                let text = match space.owner() {
                    None => format!("{} is for sale at ${}", space.name, space.price),
                    Some(owner) if owner == player => format!("You own {}", space.name),
                    Some(owner) => format!(
                        "{} is owned by {}; rent is ${}",
                        space.name,
                        self.name(owner),
                        space.rent
                    ),
                };
                self.say(MessageCategory::Info, text);
                if self.is_ai(player) {
                    let ticks = self.deliberation_ticks();
                    self.suspend(Pending::AiDecide { player }, ticks);
                }
            }
            SpaceKind::Special => {
                self.set_phase(Phase::SpecialEvent);
                self.resolve_special(player);
            }
            SpaceKind::Corner => {
                self.set_phase(Phase::CornerRest);
                self.note("rested on a corner");
                self.end_turn();
            }
            SpaceKind::Start => {
                self.note("landed on START");
                self.end_turn();
            }
        }
    }

    /// One of three outcomes, equally likely: bonus, tax or a mini-game.
    fn resolve_special(&mut self, player: PlayerId) {
        let name = self.name(player);
        match self.rng.gen_index(3) {
            Some(0) => {
                let amount = self.config.special_bonus;
                if let Ok(settlement) = self.economy.credit_bonus(&mut self.session.registry, player, amount) {
                    self.emit(GameEvent::Cue(Cue::Bonus));
                    self.say(
                        MessageCategory::Economy,
                        format!("Lucky! {name} found ${}", settlement.amount()),
                    );
                    self.note(format!("special bonus ${}", settlement.amount()));
                    self.publish_settlement(&settlement);
                }
                self.end_turn();
            }
            Some(1) => {
                let amount = self.config.special_tax;
                if let Ok(settlement) = self.economy.debit_tax(&mut self.session.registry, player, amount) {
                    self.emit(GameEvent::Cue(Cue::Tax));
                    self.say(
                        MessageCategory::Economy,
                        format!("Tax! {name} paid ${}", settlement.amount()),
                    );
                    self.note(format!("special tax ${}", settlement.amount()));
                    self.publish_settlement(&settlement);
                }
                self.end_turn();
            }
            _ => self.launch_mini_game(player, None),
        }
    }

    fn apply_decision(&mut self, player: PlayerId, decision: PropertyDecision, kind: Option<&str>) {
        let Some(index) = self.position(player) else {
            self.end_turn();
            return;
        };
        let name = self.name(player);
        let space_name = self
            .session
            .registry
            .space(index)
            .map_or_else(|| index.to_string(), |s| s.name.clone());

        match decision {
            PropertyDecision::Buy => {
                match self.economy.purchase(&mut self.session.registry, player, index) {
                    Ok(settlement) => {
                        self.emit(GameEvent::PropertyPurchased {
                            player,
                            space: index,
                            price: settlement.amount(),
                        });
                        self.emit(GameEvent::Cue(Cue::Purchase));
                        self.say(
                            MessageCategory::Economy,
                            format!("{name} bought {space_name} for ${}", settlement.amount()),
                        );
                        self.note(format!("bought {space_name}"));
                        self.publish_settlement(&settlement);
                    }
                    Err(reason) => self.decline(player, "purchase", reason),
                }
                self.end_turn();
            }
            PropertyDecision::Sell => {
                match self.economy.sell(&mut self.session.registry, player, index) {
                    Ok(settlement) => {
                        self.emit(GameEvent::PropertySold {
                            player,
                            space: index,
                            amount: settlement.amount(),
                        });
                        self.emit(GameEvent::Cue(Cue::Sale));
                        self.say(
                            MessageCategory::Economy,
                            format!("{name} sold {space_name} for ${}", settlement.amount()),
                        );
                        self.note(format!("sold {space_name}"));
                        self.publish_settlement(&settlement);
                    }
                    Err(reason) => self.decline(player, "sale", reason),
                }
                self.end_turn();
            }
            PropertyDecision::Challenge => {
                self.note(format!("challenged on {space_name}"));
                self.launch_mini_game(player, kind);
            }
            PropertyDecision::Skip => {
                let owner = self
                    .session
                    .registry
                    .space(index)
                    .and_then(|s| s.owner())
                    .filter(|owner| *owner != player);
                if owner.is_some() {
                    match self.economy.pay_rent(&mut self.session.registry, player, index) {
                        Ok(settlement) => {
                            self.note(format!("paid ${} rent", settlement.amount()));
                            self.publish_settlement(&settlement);
                        }
                        Err(reason) => log::warn!("Rent from {player} refused: {reason}"),
                    }
                } else {
                    self.note("passed");
                }
                self.end_turn();
            }
        }
    }

    fn decline(&mut self, player: PlayerId, what: &str, reason: Rejection) {
        log::info!("{player}'s {what} declined: {reason}");
        self.say(MessageCategory::Rejected, reason.to_string());
        self.note(format!("{what} declined: {reason}"));
    }

    /// Publish the events for an applied transaction and settle any bankruptcy.
    fn publish_settlement(&mut self, settlement: &Settlement) {
        let tx = &settlement.transaction;
        if tx.kind == TransactionKind::Rent {
            if let (Some(payer), Some(owner)) = (tx.from, tx.to) {
                let (payer_name, owner_name) = (self.name(payer), self.name(owner));
                self.emit(GameEvent::RentPaid {
                    payer,
                    owner,
                    amount: tx.amount,
                });
                self.emit(GameEvent::Cue(Cue::Rent));
                self.say(
                    MessageCategory::Economy,
                    format!("{payer_name} paid ${} rent to {owner_name}", tx.amount),
                );
            }
        }

        for player in [tx.from, tx.to].into_iter().flatten() {
            if let Some(cash) = self.session.registry.player(player).map(|p| p.cash()) {
                self.emit(GameEvent::CashChanged { player, cash });
            }
        }
        self.broadcast();

        if let Some(bankrupt) = settlement.bankrupt {
            self.declare_bankrupt(bankrupt);
        }
    }

    fn declare_bankrupt(&mut self, player: PlayerId) {
        let name = self.name(player);
        self.emit(GameEvent::PlayerBankrupt { player });
        self.emit(GameEvent::Cue(Cue::Bankrupt));
        self.say(MessageCategory::Warning, format!("{name} is bankrupt!"));
        self.note("went bankrupt");
        self.broadcast();

        if let Some(result) = self.evaluator.evaluate(&self.session.registry, self.session.round) {
            self.record_turn();
            self.finish_game(result);
        }
    }

    fn launch_mini_game(&mut self, initiator: PlayerId, kind: Option<&str>) {
        self.set_phase(Phase::MiniGame);
        let participants: Vec<Participant> = self
            .session
            .registry
            .active_players()
            .map(|id| Participant::new(id, self.is_ai(id)))
            .collect();

        match self.arbiter.start(kind, &participants, &mut self.rng) {
            Ok(info) => {
                log::info!("{initiator} launched mini-game '{}'", info.kind);
                self.emit(GameEvent::MiniGameStarted { kind: info.kind.clone() });
                self.emit(GameEvent::Cue(Cue::MiniGameStart));
                self.say(MessageCategory::MiniGame, format!("Mini-game: {}!", info.name));
                self.suspend(Pending::MiniGame, info.duration_ticks);
            }
            Err(reason) => {
                log::warn!("Mini-game could not start: {reason}");
                self.say(MessageCategory::Warning, reason.to_string());
                self.end_turn();
            }
        }
    }

    fn finish_mini_game(&mut self, result: MiniGameResult) {
        let winner = result
            .winner_player()
            .filter(|id| self.session.registry.is_active(*id));
        self.emit(GameEvent::MiniGameEnded {
            kind: result.kind.clone(),
            winner,
            reason: result.reason,
        });
        self.emit(GameEvent::Cue(Cue::MiniGameEnd));

        match winner {
            Some(winner) => {
                let reward = self.rng.gen_inclusive(self.config.mini_game_reward.clone());
                if let Ok(settlement) = self.economy.credit_bonus(&mut self.session.registry, winner, reward) {
                    if let Some(p) = self.session.registry.player_mut(winner) {
                        p.mini_game_wins += 1;
                    }
                    let name = self.name(winner);
                    self.say(
                        MessageCategory::MiniGame,
                        format!("{name} won the {} and earned ${}", result.kind, settlement.amount()),
                    );
                    self.note(format!("{name} won the {}", result.kind));
                    self.publish_settlement(&settlement);
                }
            }
            None => {
                self.say(MessageCategory::MiniGame, format!("The {} ended with no winner", result.kind));
                self.note(format!("{} had no winner", result.kind));
            }
        }
        self.end_turn();
    }

    fn record_turn(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        self.session.history.push_back(TurnRecord {
            round: self.session.round,
            player: self.session.current,
            roll: draft.roll,
            landed: draft.landed,
            summary: draft.notes.join("; "),
        });
    }

    fn end_turn(&mut self) {
        if self.session.phase.is_terminal() {
            return;
        }
        self.record_turn();
        if let Some(result) = self.evaluator.evaluate(&self.session.registry, self.session.round) {
            self.finish_game(result);
            return;
        }

        let count = self.session.registry.player_count();
        let mut seat = self.session.current.index();
        let mut wrapped = false;
        let mut next = None;
        for _ in 0..count {
            seat = (seat + 1) % count;
            if seat == 0 {
                wrapped = true;
            }
            let id = PlayerId::new(seat as u8);
            if self.session.registry.is_active(id) {
                next = Some(id);
                break;
            }
        }
        let Some(next) = next else {
            self.finish_game(GameResult::new(None, EndReason::Elimination));
            return;
        };

        if wrapped {
            self.session.round += 1;
            log::info!("Round {}", self.session.round);
        }
        self.session.current = next;

        if let Some(result) = self.evaluator.evaluate(&self.session.registry, self.session.round) {
            self.finish_game(result);
            return;
        }
        self.begin_turn();
    }

    fn finish_game(&mut self, result: GameResult) {
        if self.session.outcome.is_some() {
            return;
        }
        self.pending = None;
        self.session.outcome = Some(result);
        match result.winner {
            Some(winner) => log::info!("Game over: {winner} wins by {}", result.reason),
            None => log::info!("Game over: no winner ({})", result.reason),
        }

        self.set_phase(Phase::GameOver);
        self.emit(GameEvent::GameEnded {
            winner: result.winner,
            reason: result.reason,
        });
        let text = match result.winner {
            Some(winner) => {
                self.emit(GameEvent::Cue(Cue::Victory));
                format!("{} wins ({})", self.name(winner), result.reason)
            }
            None => format!("Game over ({})", result.reason),
        };
        self.say(MessageCategory::Info, text);
    }
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("phase", &self.session.phase)
            .field("current", &self.session.current)
            .field("round", &self.session.round)
            .field("paused", &self.session.paused)
            .field("pending", &self.pending())
            .field("outcome", &self.session.outcome)
            .finish()
    }
}
