//! Serializable session snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::SpaceIndex;
use crate::core::{Money, PlayerId, PlayerStatus, SessionView};
use crate::engine::Phase;
use crate::rules::GameResult;

/// Snapshot encoding or decoding failed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Replicated state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub cash: Money,
    pub position: SpaceIndex,
    pub status: PlayerStatus,
    pub owned: Vec<SpaceIndex>,
}

/// Everything a remote client needs to mirror the session.
///
/// Produced by the engine after every transition and handed to each
/// registered [`StateBroadcaster`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Increases by one with every snapshot the engine emits.
    pub sequence: u64,
    pub phase: Phase,
    pub paused: bool,
    pub current_player: PlayerId,
    pub round: u32,
    pub players: Vec<PlayerSnapshot>,
    pub outcome: Option<GameResult>,
}

impl StateSnapshot {
    /// Capture the state visible through `view`.
    #[must_use]
    pub fn capture(view: &SessionView<'_>, sequence: u64) -> Self {
        let players = view
            .registry()
            .players()
            .map(|p| PlayerSnapshot {
                id: p.id,
                cash: p.cash(),
                position: p.position,
                status: p.status(),
                owned: p.owned().collect(),
            })
            .collect();

        Self {
            sequence,
            phase: view.phase(),
            paused: view.is_paused(),
            current_player: view.current_player(),
            round: view.round(),
            players,
            outcome: view.outcome().copied(),
        }
    }

    /// Encode for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, SyncError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`StateSnapshot::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SyncError> {
        Ok(bincode::deserialize(bytes)?)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Receives a snapshot after every engine transition.
pub trait StateBroadcaster: Send {
    fn broadcast_state(&mut self, snapshot: &StateSnapshot);
}
