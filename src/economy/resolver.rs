//! Economy resolver and transaction ledger.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{SpaceIndex, SpaceKind};
use crate::core::{Money, PlayerId, Registry, Rejection};

/// Kind of money movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Purchase,
    Sale,
    Rent,
    Bonus,
    Tax,
}

/// One applied money movement. `None` on either side is the bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub from: Option<PlayerId>,
    pub to: Option<PlayerId>,
    /// Amount actually moved, after any flooring.
    pub amount: Money,
    pub space: Option<SpaceIndex>,
}

/// Result of a successful economy operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub transaction: Transaction,
    /// Set when the operation left the paying player bankrupt.
    pub bankrupt: Option<PlayerId>,
}

impl Settlement {
    #[must_use]
    pub fn amount(&self) -> Money {
        self.transaction.amount
    }
}

/// Applies purchases, sales, rent, bonuses and taxes to a registry.
///
/// Each operation either fully applies or returns a [`Rejection`] with the
/// registry untouched. After every applied operation the paying player is
/// checked for bankruptcy (cash at or below zero with no properties left).
#[derive(Clone, Debug, Default)]
pub struct EconomyResolver {
    ledger: Vector<Transaction>,
}

impl EconomyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every applied transaction, oldest first.
    #[must_use]
    pub fn ledger(&self) -> &Vector<Transaction> {
        &self.ledger
    }

    /// Buy an unowned property at its listed price.
    pub fn purchase(
        &mut self,
        registry: &mut Registry,
        player: PlayerId,
        index: SpaceIndex,
    ) -> Result<Settlement, Rejection> {
        let cash = require_active(registry, player)?;
        let space = registry.space(index).ok_or(Rejection::UnknownSpace(index))?;
        if space.kind != SpaceKind::Property {
            return Err(Rejection::NotPurchasable(index));
        }
        if space.owner().is_some() {
            return Err(Rejection::AlreadyOwned(index));
        }
        let price = space.price;
        if cash < price {
            return Err(Rejection::InsufficientFunds {
                needed: price,
                available: cash,
            });
        }

        if !registry.assign_owner(index, player) {
            return Err(Rejection::AlreadyOwned(index));
        }
        if let Some(p) = registry.player_mut(player) {
            p.take_cash(price);
            p.purchases += 1;
        }
        log::debug!("{player} bought space {index} for ${price}");

        Ok(self.settle(
            registry,
            Transaction {
                kind: TransactionKind::Purchase,
                from: Some(player),
                to: None,
                amount: price,
                space: Some(index),
            },
            Some(player),
        ))
    }

    /// Sell an owned property back to the bank for half its price.
    pub fn sell(
        &mut self,
        registry: &mut Registry,
        player: PlayerId,
        index: SpaceIndex,
    ) -> Result<Settlement, Rejection> {
        require_active(registry, player)?;
        let space = registry.space(index).ok_or(Rejection::UnknownSpace(index))?;
        if !space.can_be_sold_by(player) {
            return Err(Rejection::NotOwner(index));
        }
        let amount = space.price / 2;

        registry.release_owner(index);
        if let Some(p) = registry.player_mut(player) {
            p.add_cash(amount);
            p.sales += 1;
        }
        log::debug!("{player} sold space {index} for ${amount}");

        Ok(self.settle(
            registry,
            Transaction {
                kind: TransactionKind::Sale,
                from: None,
                to: Some(player),
                amount,
                space: Some(index),
            },
            Some(player),
        ))
    }

    /// Charge `payer` the rent of the space, paid to its owner.
    ///
    /// The charge is floored at the payer's cash, and the owner receives
    /// exactly what was taken. Unowned or self-owned spaces are a no-op: the
    /// returned settlement moves nothing and is not recorded.
    pub fn pay_rent(
        &mut self,
        registry: &mut Registry,
        payer: PlayerId,
        index: SpaceIndex,
    ) -> Result<Settlement, Rejection> {
        require_active(registry, payer)?;
        let space = registry.space(index).ok_or(Rejection::UnknownSpace(index))?;
        let rent = space.rent;
        let Some(owner) = space.owner().filter(|owner| *owner != payer) else {
            return Ok(Settlement {
                transaction: Transaction {
                    kind: TransactionKind::Rent,
                    from: Some(payer),
                    to: None,
                    amount: 0,
                    space: Some(index),
                },
                bankrupt: None,
            });
        };

        let amount = registry.player_mut(payer).map_or(0, |p| p.take_cash(rent));
        if let Some(p) = registry.player_mut(owner) {
            p.add_cash(amount);
        }
        log::debug!("{payer} paid ${amount} rent to {owner} for space {index}");

        Ok(self.settle(
            registry,
            Transaction {
                kind: TransactionKind::Rent,
                from: Some(payer),
                to: Some(owner),
                amount,
                space: Some(index),
            },
            Some(payer),
        ))
    }

    /// Credit `amount` from the bank. Negative amounts credit nothing.
    ///
    /// A credit never makes anyone bankrupt.
    pub fn credit_bonus(
        &mut self,
        registry: &mut Registry,
        player: PlayerId,
        amount: Money,
    ) -> Result<Settlement, Rejection> {
        require_active(registry, player)?;
        let amount = amount.max(0);
        if let Some(p) = registry.player_mut(player) {
            p.add_cash(amount);
        }
        log::debug!("{player} received ${amount}");

        Ok(self.settle(
            registry,
            Transaction {
                kind: TransactionKind::Bonus,
                from: None,
                to: Some(player),
                amount,
                space: None,
            },
            None,
        ))
    }

    /// Debit `amount` to the bank, flooring the balance at zero.
    pub fn debit_tax(
        &mut self,
        registry: &mut Registry,
        player: PlayerId,
        amount: Money,
    ) -> Result<Settlement, Rejection> {
        require_active(registry, player)?;
        let taken = registry
            .player_mut(player)
            .map_or(0, |p| p.take_cash(amount));
        log::debug!("{player} paid ${taken} tax");

        Ok(self.settle(
            registry,
            Transaction {
                kind: TransactionKind::Tax,
                from: Some(player),
                to: None,
                amount: taken,
                space: None,
            },
            Some(player),
        ))
    }

    /// Record `transaction` and, for operations that take or give up
    /// something, check the affected player for bankruptcy.
    fn settle(&mut self, registry: &mut Registry, transaction: Transaction, check: Option<PlayerId>) -> Settlement {
        self.ledger.push_back(transaction.clone());
        let bankrupt = check.filter(|&player| settle_bankruptcy(registry, player));
        Settlement {
            transaction,
            bankrupt,
        }
    }
}

/// Move `player` to Bankrupt if they have no cash and no properties.
///
/// Returns true only on the transition.
pub(crate) fn settle_bankruptcy(registry: &mut Registry, player: PlayerId) -> bool {
    let broke = registry
        .player(player)
        .is_some_and(|p| p.is_active() && p.cash() <= 0 && p.owned_count() == 0);
    if broke {
        registry.mark_bankrupt(player);
        log::info!("{player} is bankrupt");
    }
    broke
}

fn require_active(registry: &Registry, player: PlayerId) -> Result<Money, Rejection> {
    let p = registry.player(player).ok_or(Rejection::UnknownPlayer(player))?;
    if !p.is_active() {
        return Err(Rejection::PlayerBankrupt(player));
    }
    Ok(p.cash())
}
