//! Entity registry: canonical mutable state for players and board spaces.
//!
//! Ownership is bidirectional: a space's `owner` and the owner's set of
//! spaces always agree. Every ownership change goes through
//! [`Registry::assign_owner`] or [`Registry::release_owner`].

use serde::{Deserialize, Serialize};

use super::player::{Money, Player, PlayerId, PlayerMap, PlayerStatus};
use crate::board::{Board, BoardProvider, BoardSpace, SpaceIndex};

/// Players and board for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    players: PlayerMap<Player>,
    board: Board,
}

impl Registry {
    /// Create a registry. Any ownership already recorded on the players is dropped.
    #[must_use]
    pub fn new(mut players: PlayerMap<Player>, board: Board) -> Self {
        for (_, player) in players.iter_mut() {
            player.owned.clear();
        }
        Self { players, board }
    }

    /// Number of seats, bankrupt ones included.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// All players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn space(&self, index: SpaceIndex) -> Option<&BoardSpace> {
        self.board.space_at(index)
    }

    /// Seats still in the game, in seat order.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    #[must_use]
    pub fn is_active(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(Player::is_active)
    }

    /// Cash plus the face value of every owned space.
    #[must_use]
    pub fn net_worth(&self, id: PlayerId) -> Money {
        let Some(player) = self.player(id) else {
            return 0;
        };
        let holdings: Money = player
            .owned()
            .filter_map(|index| self.board.space_at(index))
            .map(|space| space.price)
            .sum();
        player.cash() + holdings
    }

    /// Players ordered by net worth, highest first; ties keep seat order.
    #[must_use]
    pub fn ranking(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.players.player_ids().collect();
        ids.sort_by(|a, b| self.net_worth(*b).cmp(&self.net_worth(*a)).then(a.cmp(b)));
        ids
    }

    /// Record `player` as owner of `space` on both sides.
    ///
    /// Returns false without changes if the space is missing or already owned.
    pub(crate) fn assign_owner(&mut self, index: SpaceIndex, player: PlayerId) -> bool {
        if !self.players.contains(player) {
            return false;
        }
        let Some(space) = self.board.space_at_mut(index) else {
            return false;
        };
        if space.owner.is_some() {
            return false;
        }
        space.owner = Some(player);
        self.players[player].owned.insert(index);
        true
    }

    /// Clear ownership of `space` on both sides, returning the previous owner.
    pub(crate) fn release_owner(&mut self, index: SpaceIndex) -> Option<PlayerId> {
        let space = self.board.space_at_mut(index)?;
        let owner = space.owner.take()?;
        if let Some(player) = self.players.get_mut(owner) {
            player.owned.remove(&index);
        }
        Some(owner)
    }

    /// Move `player` to Bankrupt, returning any spaces taken back by the bank.
    pub(crate) fn mark_bankrupt(&mut self, player: PlayerId) -> Vec<SpaceIndex> {
        let owned: Vec<_> = match self.player(player) {
            Some(p) => p.owned().collect(),
            None => return Vec::new(),
        };
        for index in &owned {
            self.release_owner(*index);
        }
        if let Some(p) = self.player_mut(player) {
            p.status = PlayerStatus::Bankrupt;
        }
        owned
    }

    /// Check the bidirectional ownership invariant across the whole board.
    #[must_use]
    pub fn ownership_consistent(&self) -> bool {
        let spaces_agree = self.board.iter().all(|space| match space.owner {
            Some(owner) => self.player(owner).is_some_and(|p| p.owns(space.index)),
            None => self.players().all(|p| !p.owns(space.index)),
        });
        let players_agree = self.players.iter().all(|(id, player)| {
            player
                .owned()
                .all(|index| self.space(index).is_some_and(|s| s.owner == Some(id)))
        });
        spaces_agree && players_agree
    }
}
