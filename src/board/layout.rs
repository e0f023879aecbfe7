//! Board provider contract and the standard layout.

use serde::{Deserialize, Serialize};

use super::space::{BoardSpace, SpaceIndex, SpaceKind};
use crate::core::{ConfigError, GameRng};

/// Read access to the circular track.
///
/// Must be fully queryable before a session leaves setup.
pub trait BoardProvider {
    /// Number of spaces on the track.
    fn len(&self) -> usize;

    /// True for a board with no spaces.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The space at `index`, or `None` past the end.
    fn space_at(&self, index: SpaceIndex) -> Option<&BoardSpace>;

    /// The space after `current`, wrapping to the start.
    fn next_index(&self, current: SpaceIndex) -> SpaceIndex {
        let len = self.len().max(1);
        SpaceIndex::new(((current.index() + 1) % len) as u16)
    }
}

const CITY_NAMES: [&str; 15] = [
    "New Tokyo",
    "Polygon City",
    "Crystal Bay",
    "Neon Heights",
    "Vertex Village",
    "Prism Point",
    "Geometric Gardens",
    "Angular Avenue",
    "Faceted Falls",
    "Triangular Town",
    "Cubic Coast",
    "Hexagonal Hills",
    "Octagonal Oasis",
    "Rectangular Ridge",
    "Spherical Springs",
];

/// Concrete board owned by the entity registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vec<BoardSpace>,
}

impl Board {
    /// Build a board from spaces in track order.
    ///
    /// Indices are rewritten to match positions. Owners are cleared.
    pub fn new(spaces: Vec<BoardSpace>) -> Result<Self, ConfigError> {
        if spaces.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        if spaces.len() > usize::from(u16::MAX) {
            return Err(ConfigError::InvalidValue {
                field: "board",
                reason: "too many spaces",
            });
        }

        let spaces = spaces
            .into_iter()
            .enumerate()
            .map(|(i, mut space)| {
                space.index = SpaceIndex::new(i as u16);
                space.owner = None;
                space
            })
            .collect();

        Ok(Self { spaces })
    }

    /// Classic square track: start at 0, corners every 10th space, specials on
    /// multiples of 7, properties priced 100..500 everywhere else.
    pub fn standard(size: usize, rng: &mut GameRng) -> Result<Self, ConfigError> {
        if size < 4 {
            return Err(ConfigError::InvalidValue {
                field: "board_size",
                reason: "must be at least 4",
            });
        }

        let spaces = (0..size)
            .map(|i| {
                let index = SpaceIndex::new(i as u16);
                if i == 0 {
                    BoardSpace::start(index)
                } else if i % 10 == 0 {
                    BoardSpace::corner(index)
                } else if i % 7 == 0 {
                    BoardSpace::special(index)
                } else {
                    let name = rng.choose(&CITY_NAMES).copied().unwrap_or("Property");
                    BoardSpace::property(index, name, rng.gen_inclusive(100..=499))
                }
            })
            .collect();

        Self::new(spaces)
    }

    /// Iterate over spaces in track order.
    pub fn iter(&self) -> impl Iterator<Item = &BoardSpace> {
        self.spaces.iter()
    }

    /// Count spaces of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: SpaceKind) -> usize {
        self.spaces.iter().filter(|s| s.kind == kind).count()
    }

    pub(crate) fn space_at_mut(&mut self, index: SpaceIndex) -> Option<&mut BoardSpace> {
        self.spaces.get_mut(index.index())
    }
}

impl BoardProvider for Board {
    fn len(&self) -> usize {
        self.spaces.len()
    }

    fn space_at(&self, index: SpaceIndex) -> Option<&BoardSpace> {
        self.spaces.get(index.index())
    }
}
