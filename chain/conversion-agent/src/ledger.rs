//! Ledger: native and fungible-asset balances
//!
//! Balance store of the execution environment:
//! - Native currency balances (stored under `AssetId::NATIVE`)
//! - Token balances by (asset, account)
//! - Safe transfer with underflow and overflow protection
//!
//! The fungible-asset interface (`balanceOf`, `transfer`) is exposed as
//! [`Ledger::balance_of`] and [`Ledger::transfer`].

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::{Address, AssetId};

use crate::errors::LedgerError;

/// Balance store for every asset on the chain.
///
/// Stored as `HashMap<AssetId, HashMap<Address, Decimal>>`. Zero balances are
/// pruned so two ledgers with the same holdings compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    /// Balances: asset -> (account -> amount)
    balances: HashMap<AssetId, HashMap<Address, Decimal>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Balance of `account` in `asset`.
    pub fn balance_of(&self, asset: AssetId, account: &Address) -> Decimal {
        self.balances
            .get(&asset)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Native currency balance of `account`.
    pub fn native_balance_of(&self, account: &Address) -> Decimal {
        self.balance_of(AssetId::NATIVE, account)
    }

    /// Sum of all balances of `asset`.
    pub fn total_supply(&self, asset: AssetId) -> Decimal {
        self.balances
            .get(&asset)
            .map(|accounts| accounts.values().copied().sum())
            .unwrap_or(Decimal::ZERO)
    }

    // ───────────────────────── Issuance ─────────────────────────

    /// Create `amount` of `asset` out of thin air for `account`.
    ///
    /// Genesis allocations and token deployments only.
    pub fn mint(&mut self, asset: AssetId, account: Address, amount: Decimal) -> Result<(), LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let credited = self
            .balance_of(asset, &account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(asset, account, credited);
        Ok(())
    }

    // ───────────────────────── Safe Transfer ─────────────────────────

    /// Move `amount` of `asset` from `from` to `to`.
    ///
    /// Fails without side effects on negative amounts, insufficient balance
    /// or overflow of the receiving balance.
    pub fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let available = self.balance_of(asset, &from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                account: from,
                required: amount,
                available,
            });
        }

        if amount.is_zero() || from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(asset, &to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(asset, from, available - amount);
        self.set_balance(asset, to, credited);
        Ok(())
    }

    /// Move native currency.
    pub fn transfer_native(&mut self, from: Address, to: Address, amount: Decimal) -> Result<(), LedgerError> {
        self.transfer(AssetId::NATIVE, from, to, amount)
    }

    /// Move the entire `asset` balance of `from` to `to`, returning the amount moved.
    pub fn sweep(&mut self, asset: AssetId, from: Address, to: Address) -> Result<Decimal, LedgerError> {
        let amount = self.balance_of(asset, &from);
        self.transfer(asset, from, to, amount)?;
        Ok(amount)
    }

    fn set_balance(&mut self, asset: AssetId, account: Address, amount: Decimal) {
        let accounts = self.balances.entry(asset).or_default();
        if amount.is_zero() {
            accounts.remove(&account);
        } else {
            accounts.insert(account, amount);
        }
    }
}
