//! Board model: spaces, the board provider contract and layout registration.
//!
//! The board is a circular track of N spaces. Spaces are created once, at
//! board-generation time, and never destroyed; only their owner changes.

mod layout;
mod registry;
mod space;

pub use layout::{Board, BoardProvider};
pub use registry::{BoardFactory, BoardInfo, BoardRegistry, STANDARD_BOARD};
pub use space::{BoardSpace, SpaceIndex, SpaceKind};
