//! Execution environment: ledger, deployed contracts, event log
//!
//! Plays the role of the host chain for the agent:
//! - Ledger of native and token balances
//! - Directory of deployed exchange backends and registries, keyed by address
//! - Append-only event log
//! - Snapshot / restore, giving every agent operation all-or-nothing semantics
//!
//! Contract code (backends, registries) is not part of a snapshot. Only
//! balances and events are rolled back.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use types::ids::{Address, AssetId};

use crate::errors::LedgerError;
use crate::events::ContractEvent;
use crate::exchange::ExchangeBackend;
use crate::ledger::Ledger;
use crate::registry::RegistryLookup;

/// Rolled-back state captured before an operation.
#[derive(Debug, Clone)]
pub struct ChainSnapshot {
    ledger: Ledger,
    events_len: usize,
}

/// Deterministic in-memory chain.
#[derive(Debug)]
pub struct Chain {
    ledger: Ledger,
    exchanges: HashMap<Address, Arc<dyn ExchangeBackend>>,
    registries: HashMap<Address, Arc<dyn RegistryLookup>>,
    events: Vec<ContractEvent>,
    /// Creator address used to derive deployment addresses
    deployer: Address,
    nonce: u64,
}

impl Chain {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::new(),
            exchanges: HashMap::new(),
            registries: HashMap::new(),
            events: Vec::new(),
            deployer: Address::from_label("genesis"),
            nonce: 0,
        }
    }

    // ───────────────────────── Accounts ─────────────────────────

    /// Fresh, never-used address.
    pub fn allocate_address(&mut self) -> Address {
        let address = Address::derive(&self.deployer, self.nonce);
        self.nonce += 1;
        address
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Genesis allocation of native currency.
    pub fn fund(&mut self, account: Address, amount: Decimal) -> Result<(), LedgerError> {
        self.ledger.mint(AssetId::NATIVE, account, amount)
    }

    /// Deploy a fungible token with its whole `supply` held by `holder`.
    pub fn deploy_asset(&mut self, holder: Address, supply: Decimal) -> Result<AssetId, LedgerError> {
        let asset = AssetId::from(self.allocate_address());
        self.ledger.mint(asset, holder, supply)?;
        debug!(%asset, %holder, %supply, "Deployed asset");
        Ok(asset)
    }

    /// Destroy `contract` and push its entire native balance to `beneficiary`.
    ///
    /// The transfer is forced: it never runs any code at `beneficiary`, so a
    /// payment handler there is bypassed.
    pub fn self_destruct(&mut self, contract: Address, beneficiary: Address) -> Result<Decimal, LedgerError> {
        self.exchanges.remove(&contract);
        self.registries.remove(&contract);
        let amount = self.ledger.sweep(AssetId::NATIVE, contract, beneficiary)?;
        debug!(%contract, %beneficiary, %amount, "Self-destructed contract");
        Ok(amount)
    }

    // ───────────────────────── Contracts ─────────────────────────

    pub fn deploy_exchange(&mut self, backend: Arc<dyn ExchangeBackend>) -> Address {
        let address = self.allocate_address();
        self.exchanges.insert(address, backend);
        debug!(%address, "Deployed exchange backend");
        address
    }

    pub fn deploy_registry(&mut self, registry: Arc<dyn RegistryLookup>) -> Address {
        let address = self.allocate_address();
        self.registries.insert(address, registry);
        debug!(%address, "Deployed registry");
        address
    }

    pub fn exchange_at(&self, address: &Address) -> Option<Arc<dyn ExchangeBackend>> {
        self.exchanges.get(address).cloned()
    }

    pub fn registry_at(&self, address: &Address) -> Option<Arc<dyn RegistryLookup>> {
        self.registries.get(address).cloned()
    }

    // ───────────────────────── Events ─────────────────────────

    pub fn emit(&mut self, event: ContractEvent) {
        self.events.push(event);
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Atomicity ─────────────────────────

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            ledger: self.ledger.clone(),
            events_len: self.events.len(),
        }
    }

    /// Undo every balance change and event since `snapshot` was taken.
    pub fn restore(&mut self, snapshot: ChainSnapshot) {
        self.ledger = snapshot.ledger;
        self.events.truncate(snapshot.events_len);
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
