//! Board spaces.

use serde::{Deserialize, Serialize};

use crate::core::{Money, PlayerId};

/// Position on the circular track. Index 0 is the start space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpaceIndex(pub u16);

impl SpaceIndex {
    /// The start space.
    pub const START: SpaceIndex = SpaceIndex(0);

    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SpaceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happens when a token lands on a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceKind {
    /// Start space. Passing it pays the pass bonus.
    Start,
    /// Purchasable property.
    Property,
    /// Rest corner; nothing happens.
    Corner,
    /// Random bonus, tax or challenge.
    Special,
}

/// One space on the board.
///
/// The owner is a weak reference by seat: the space never owns the player.
/// Only the entity registry changes it, keeping the owner's set in step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpace {
    /// Stable position on the track.
    pub index: SpaceIndex,

    pub kind: SpaceKind,

    /// Display name.
    pub name: String,

    /// Face value; purchase price for properties, zero otherwise.
    pub price: Money,

    /// Rent owed by other players who stop here.
    pub rent: Money,

    pub(crate) owner: Option<PlayerId>,
}

impl BoardSpace {
    fn plain(index: SpaceIndex, kind: SpaceKind, name: &str) -> Self {
        Self {
            index,
            kind,
            name: name.to_string(),
            price: 0,
            rent: 0,
            owner: None,
        }
    }

    #[must_use]
    pub fn start(index: SpaceIndex) -> Self {
        Self::plain(index, SpaceKind::Start, "START")
    }

    #[must_use]
    pub fn corner(index: SpaceIndex) -> Self {
        Self::plain(index, SpaceKind::Corner, "CORNER")
    }

    #[must_use]
    pub fn special(index: SpaceIndex) -> Self {
        Self::plain(index, SpaceKind::Special, "SPECIAL")
    }

    /// A property. Rent defaults to a tenth of the price.
    #[must_use]
    pub fn property(index: SpaceIndex, name: impl Into<String>, price: Money) -> Self {
        let price = price.max(0);
        Self {
            index,
            kind: SpaceKind::Property,
            name: name.into(),
            price,
            rent: price / 10,
            owner: None,
        }
    }

    /// Override the derived rent (builder pattern).
    #[must_use]
    pub fn with_rent(mut self, rent: Money) -> Self {
        self.rent = rent.max(0);
        self
    }

    /// Current owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Unowned property.
    #[must_use]
    pub fn can_be_bought(&self) -> bool {
        self.kind == SpaceKind::Property && self.owner.is_none()
    }

    /// Property owned by `player`.
    #[must_use]
    pub fn can_be_sold_by(&self, player: PlayerId) -> bool {
        self.kind == SpaceKind::Property && self.owner == Some(player)
    }
}
