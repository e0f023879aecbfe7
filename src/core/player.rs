//! Player identification, per-player storage and the player record.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier supporting 1-255 players. Seats are stable for
//! the whole session: bankrupt players keep their seat and are skipped.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! Canonical mutable state for one participant: cash, position, owned spaces
//! and lifecycle status. Only the economy resolver and the turn engine mutate it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

use crate::board::SpaceIndex;

/// Amount of in-game currency. Balances never go below zero.
pub type Money = i64;

/// Player seat identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use polyboard::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use polyboard::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<i64> = PlayerMap::with_value(4, 1500);
/// cash[PlayerId::new(1)] -= 200;
/// assert_eq!(cash[PlayerId::new(1)], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's entry, or `None` for an out-of-range seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable entry, or `None` for an out-of-range seat.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Check whether a seat exists.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Lifecycle state of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still taking turns.
    #[default]
    Active,
    /// Out of the game. Never reverts.
    Bankrupt,
}

/// Token color shown by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    /// Seat colors cycle through the palette.
    #[must_use]
    pub fn for_seat(player: PlayerId) -> Self {
        match player.index() % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Green,
            _ => PlayerColor::Yellow,
        }
    }
}

/// One participant in the board game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable seat.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Token color.
    pub color: PlayerColor,

    /// Whether the AI policy drives this seat.
    pub is_ai: bool,

    /// Board position.
    pub position: SpaceIndex,

    pub(crate) cash: Money,
    pub(crate) owned: BTreeSet<SpaceIndex>,
    pub(crate) status: PlayerStatus,

    /// Successful purchases this session.
    pub purchases: u32,

    /// Successful sales this session.
    pub sales: u32,

    /// Mini-games won this session.
    pub mini_game_wins: u32,
}

impl Player {
    /// Create a player at the start space with the given cash.
    #[must_use]
    pub fn new(id: PlayerId, starting_cash: Money) -> Self {
        Self {
            id,
            name: format!("{id}"),
            color: PlayerColor::for_seat(id),
            is_ai: false,
            position: SpaceIndex::START,
            cash: starting_cash.max(0),
            owned: BTreeSet::new(),
            status: PlayerStatus::Active,
            purchases: 0,
            sales: 0,
            mini_game_wins: 0,
        }
    }

    /// Set the display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark the seat as AI-controlled (builder pattern).
    #[must_use]
    pub fn as_ai(mut self) -> Self {
        self.is_ai = true;
        self
    }

    /// Current cash balance.
    #[must_use]
    pub fn cash(&self) -> Money {
        self.cash
    }

    /// Spaces owned by this player, in board order.
    pub fn owned(&self) -> impl Iterator<Item = SpaceIndex> + '_ {
        self.owned.iter().copied()
    }

    /// Number of owned spaces.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Check ownership of a space.
    #[must_use]
    pub fn owns(&self, space: SpaceIndex) -> bool {
        self.owned.contains(&space)
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Shorthand for `status() == Active`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Check whether the player can pay `amount` in full.
    #[must_use]
    pub fn can_afford(&self, amount: Money) -> bool {
        self.cash >= amount
    }

    pub(crate) fn add_cash(&mut self, amount: Money) {
        self.cash += amount.max(0);
    }

    /// Remove up to `amount`, flooring at zero. Returns what was actually taken.
    pub(crate) fn take_cash(&mut self, amount: Money) -> Money {
        let taken = amount.clamp(0, self.cash);
        self.cash -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", p0), "Player 1");
    }

    #[test]
    fn test_player_map_get_out_of_range() {
        let map: PlayerMap<i32> = PlayerMap::with_value(2, 7);
        assert_eq!(map.get(PlayerId::new(1)), Some(&7));
        assert_eq!(map.get(PlayerId::new(2)), None);
        assert!(!map.contains(PlayerId::new(5)));
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[2], (PlayerId::new(2), &2));
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }

    #[test]
    fn test_new_player_defaults() {
        let p = Player::new(PlayerId::new(2), 1500);
        assert_eq!(p.name, "Player 3");
        assert_eq!(p.color, PlayerColor::Green);
        assert_eq!(p.cash(), 1500);
        assert_eq!(p.position, SpaceIndex::START);
        assert!(p.is_active());
        assert_eq!(p.owned_count(), 0);
    }

    #[test]
    fn test_take_cash_floors_at_zero() {
        let mut p = Player::new(PlayerId::new(0), 100);
        assert_eq!(p.take_cash(30), 30);
        assert_eq!(p.take_cash(500), 70);
        assert_eq!(p.cash(), 0);
        assert_eq!(p.take_cash(-5), 0);
    }

    #[test]
    fn test_player_serialization() {
        let p = Player::new(PlayerId::new(1), 900).as_ai().with_name("Bot");
        let json = serde_json::to_string(&p).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
