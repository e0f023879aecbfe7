//! AI seats.
//!
//! AI seats roll as soon as their deliberation delay is resumed; only the
//! property decision is left to an [`AiPolicy`]. Mini-game play for AI
//! participants lives inside each variant.

mod policy;

pub use policy::{AiPolicy, CautiousBuyer};
