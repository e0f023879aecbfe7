//! Logical network synchronization.
//!
//! Transport is out of scope. This module defines what crosses the wire
//! ([`StateSnapshot`], bincode-encoded) and how the host decides which
//! client actions to accept ([`SessionAuthority`]).

mod authority;
mod snapshot;

pub use authority::{ClientId, SessionAuthority, Submission, ValidatedAction};
pub use snapshot::{PlayerSnapshot, StateBroadcaster, StateSnapshot, SyncError};
