//! Built-in mini-game variants.
//!
//! | Id | Ticks | Win condition |
//! |----|-------|---------------|
//! | `race` | 45 | first across the finish line |
//! | `memory` | 60 | most pairs once the grid is cleared |
//! | `platform` | 30 | last player standing |
//! | `color` | 25 | most points after five rounds |
//! | `collect` | 45 | most points when time runs out |

mod collect;
mod color;
mod memory;
mod platform;
mod race;

pub use collect::CollectGame;
pub use color::ColorGame;
pub use memory::MemoryGame;
pub use platform::PlatformGame;
pub use race::RaceGame;
