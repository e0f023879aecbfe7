//! Economy: every money and ownership change in a session.
//!
//! The turn engine never touches cash or ownership directly. It asks the
//! [`EconomyResolver`], which validates the request against the registry,
//! applies it atomically, records a [`Transaction`] and reports whether the
//! payer went bankrupt.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | purchase  | price moves to the bank, space to the buyer |
//! | sell      | half the price back, space to the bank |
//! | pay rent  | rent moves payer to owner, floored at the payer's cash |
//! | bonus     | bank pays the player |
//! | tax       | player pays the bank, floored at zero |

mod resolver;

pub use resolver::{EconomyResolver, Settlement, Transaction, TransactionKind};
