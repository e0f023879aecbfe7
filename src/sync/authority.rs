//! Host-side action validation for networked sessions.
//!
//! Remote clients never mutate the session. They submit actions for the
//! seats they control; the authority checks ownership and phase against the
//! host's view, queues what passes, and the host feeds the queue to
//! `TurnEngine::apply_validated`.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

use crate::core::{PlayerId, Rejection, SessionView};
use crate::engine::PlayerAction;

/// Identifier of a connected client.
pub type ClientId = u32;

/// Verdict on a submitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Rejection),
}

impl Submission {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

/// An action that passed host-side validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedAction {
    pub client: ClientId,
    pub slot: PlayerId,
    pub action: PlayerAction,
}

/// Tracks which client controls which seat and queues their actions.
#[derive(Debug, Default)]
pub struct SessionAuthority {
    clients: FxHashSet<ClientId>,
    controllers: FxHashMap<PlayerId, ClientId>,
    queue: VecDeque<ValidatedAction>,
}

impl SessionAuthority {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client with no seats yet.
    pub fn connect(&mut self, client: ClientId) {
        if self.clients.insert(client) {
            log::info!("Client {client} connected");
        }
    }

    /// Give `client` control of `slot`. Claiming a seat you already hold is a no-op.
    pub fn claim_slot(
        &mut self,
        view: &SessionView<'_>,
        client: ClientId,
        slot: PlayerId,
    ) -> Result<(), Rejection> {
        if !self.clients.contains(&client) {
            return Err(Rejection::UnknownClient(client));
        }
        if view.player(slot).is_none() {
            return Err(Rejection::UnknownPlayer(slot));
        }
        match self.controllers.get(&slot) {
            Some(owner) if *owner != client => Err(Rejection::SlotTaken(slot)),
            _ => {
                self.controllers.insert(slot, client);
                log::debug!("Client {client} controls {slot}");
                Ok(())
            }
        }
    }

    /// Disconnect a client, freeing its seats. Returns the freed seats.
    pub fn release_client(&mut self, client: ClientId) -> Vec<PlayerId> {
        self.clients.remove(&client);
        let mut freed: Vec<PlayerId> = self
            .controllers
            .iter()
            .filter(|(_, owner)| **owner == client)
            .map(|(slot, _)| *slot)
            .collect();
        freed.sort_unstable();
        for slot in &freed {
            self.controllers.remove(slot);
        }
        self.queue.retain(|queued| queued.client != client);
        log::info!("Client {client} released {} seat(s)", freed.len());
        freed
    }

    /// Client controlling `slot`, if any.
    #[must_use]
    pub fn controller(&self, slot: PlayerId) -> Option<ClientId> {
        self.controllers.get(&slot).copied()
    }

    /// Validate and queue an action.
    pub fn submit_action(
        &mut self,
        view: &SessionView<'_>,
        client: ClientId,
        slot: PlayerId,
        action: PlayerAction,
    ) -> Submission {
        match self.validate(view, client, slot, action) {
            Ok(()) => {
                self.queue.push_back(ValidatedAction { client, slot, action });
                Submission::Accepted
            }
            Err(reason) => {
                log::debug!("Rejected {action:?} from client {client}: {reason}");
                Submission::Rejected(reason)
            }
        }
    }

    fn validate(
        &self,
        view: &SessionView<'_>,
        client: ClientId,
        slot: PlayerId,
        action: PlayerAction,
    ) -> Result<(), Rejection> {
        if !self.clients.contains(&client) {
            return Err(Rejection::UnknownClient(client));
        }
        if self.controller(slot) != Some(client) {
            return Err(Rejection::SlotNotControlled { client, slot });
        }
        let phase = view.phase();
        if !phase.accepts(action.kind()) {
            return Err(Rejection::WrongPhase {
                action: action.kind(),
                phase,
            });
        }
        Ok(())
    }

    /// Take every queued action, oldest first.
    pub fn drain(&mut self) -> Vec<ValidatedAction> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::{GameRng, GameSession, Player, PlayerMap, Registry};
    use crate::engine::{Phase, PropertyDecision};

    fn session(phase: Phase) -> GameSession {
        let board = Board::standard(12, &mut GameRng::new(0)).unwrap();
        let mut session = GameSession::new(Registry::new(PlayerMap::new(2, |id| Player::new(id, 700)), board));
        session.phase = phase;
        session
    }

    #[test]
    fn test_accepts_controlled_slot_in_matching_phase() {
        let session = session(Phase::PlayerTurn);
        let view = session.view();
        let mut authority = SessionAuthority::new();
        authority.connect(7);
        authority.claim_slot(&view, 7, PlayerId::new(1)).unwrap();

        let verdict = authority.submit_action(&view, 7, PlayerId::new(1), PlayerAction::Roll);
        assert!(verdict.is_accepted());
        assert_eq!(authority.pending(), 1);

        let drained = authority.drain();
        assert_eq!(
            drained,
            vec![ValidatedAction {
                client: 7,
                slot: PlayerId::new(1),
                action: PlayerAction::Roll
            }]
        );
        assert_eq!(authority.pending(), 0);
    }

    #[test]
    fn test_rejects_uncontrolled_slot() {
        let session = session(Phase::PlayerTurn);
        let view = session.view();
        let mut authority = SessionAuthority::new();
        authority.connect(1);
        authority.connect(2);
        authority.claim_slot(&view, 1, PlayerId::new(0)).unwrap();

        assert_eq!(
            authority.submit_action(&view, 2, PlayerId::new(0), PlayerAction::Roll),
            Submission::Rejected(Rejection::SlotNotControlled {
                client: 2,
                slot: PlayerId::new(0)
            })
        );
        assert_eq!(
            authority.submit_action(&view, 9, PlayerId::new(0), PlayerAction::Roll),
            Submission::Rejected(Rejection::UnknownClient(9))
        );
        assert_eq!(authority.pending(), 0);
    }

    #[test]
    fn test_rejects_action_phase_does_not_accept() {
        let session = session(Phase::Moving);
        let view = session.view();
        let mut authority = SessionAuthority::new();
        authority.connect(1);
        authority.claim_slot(&view, 1, PlayerId::new(0)).unwrap();

        let action = PlayerAction::Decide(PropertyDecision::Buy);
        assert_eq!(
            authority.submit_action(&view, 1, PlayerId::new(0), action),
            Submission::Rejected(Rejection::WrongPhase {
                action: action.kind(),
                phase: Phase::Moving
            })
        );
    }

    #[test]
    fn test_claim_rules() {
        let session = session(Phase::PlayerTurn);
        let view = session.view();
        let mut authority = SessionAuthority::new();

        assert_eq!(
            authority.claim_slot(&view, 1, PlayerId::new(0)),
            Err(Rejection::UnknownClient(1))
        );

        authority.connect(1);
        authority.connect(2);
        authority.claim_slot(&view, 1, PlayerId::new(0)).unwrap();
        authority.claim_slot(&view, 1, PlayerId::new(0)).unwrap();
        assert_eq!(
            authority.claim_slot(&view, 2, PlayerId::new(0)),
            Err(Rejection::SlotTaken(PlayerId::new(0)))
        );
        assert_eq!(
            authority.claim_slot(&view, 1, PlayerId::new(5)),
            Err(Rejection::UnknownPlayer(PlayerId::new(5)))
        );
    }

    #[test]
    fn test_release_frees_seats_and_drops_queue() {
        let session = session(Phase::PlayerTurn);
        let view = session.view();
        let mut authority = SessionAuthority::new();
        authority.connect(1);
        authority.claim_slot(&view, 1, PlayerId::new(1)).unwrap();
        authority.claim_slot(&view, 1, PlayerId::new(0)).unwrap();
        authority.submit_action(&view, 1, PlayerId::new(0), PlayerAction::Roll);

        let freed = authority.release_client(1);
        assert_eq!(freed, vec![PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(authority.controller(PlayerId::new(0)), None);
        assert_eq!(authority.pending(), 0);

        authority.connect(2);
        assert!(authority.claim_slot(&view, 2, PlayerId::new(0)).is_ok());
    }
}
