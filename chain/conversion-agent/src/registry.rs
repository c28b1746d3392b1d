//! Registry lookup: resolve the exchange backend by service name
//!
//! The agent never stores the exchange address. It stores the address of a
//! registry contract and asks it for the current backend on every payment,
//! so the backend can be replaced without touching the agent.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use types::ids::{Address, ServiceId};

/// Registry key under which the exchange network is published.
pub const EXCHANGE_NETWORK: ServiceId = ServiceId::from_name("BancorNetwork");

/// Resolve a service identifier to its current address.
pub trait RegistryLookup: Send + Sync + fmt::Debug {
    /// `None` when nothing (or the zero address) is registered.
    fn resolve(&self, service: &ServiceId) -> Option<Address>;
}

/// In-memory registry contract.
///
/// Entries can be updated through a shared reference so the registry can
/// stay deployed on the chain while its owner re-points services.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    entries: RwLock<HashMap<ServiceId, Address>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `address` under `service`, replacing any previous entry.
    pub fn set_address(&self, service: ServiceId, address: Address) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(service, address);
    }

    /// Remove the entry for `service`.
    pub fn unset(&self, service: &ServiceId) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(service);
    }
}

impl RegistryLookup for ContractRegistry {
    fn resolve(&self, service: &ServiceId) -> Option<Address> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(service)
            .copied()
            .filter(|address| !address.is_zero())
    }
}
