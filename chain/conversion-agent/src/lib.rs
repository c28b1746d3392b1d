//! Custodial Conversion Agent
//!
//! A contract-style agent that converts every native payment it receives into
//! a configured target asset, using an exchange backend resolved through a
//! registry, and forwards the proceeds to a destination wallet.
//!
//! # Modules
//! - `agent`: Deposit handler, conversion flow, owner-gated configuration
//! - `recovery`: Owner sweeps of stranded native and token balances
//! - `chain`: Deterministic execution environment with snapshot / restore
//! - `ledger`: Native and token balances
//! - `exchange`: Backend trait and the call context handed to it
//! - `registry`: Service-name lookup of the exchange backend
//! - `config`: Agent configuration, JSON loading and validation
//! - `events`: Records emitted by agent operations
//! - `errors`: Agent, exchange, ledger and configuration errors
//! - `security`: Reentrancy guard and owner capability
//! - `mock` (feature `mock-exchange`): Scripted backends
//!
//! # Version
//! v0.1.0

pub mod agent;
pub mod chain;
pub mod config;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod ledger;
pub mod recovery;
pub mod registry;
pub mod security;

#[cfg(feature = "mock-exchange")]
pub mod mock;

pub use agent::{ConversionAgent, ConversionStage};
pub use chain::Chain;
pub use config::AgentConfig;
pub use errors::{AgentError, ConfigError, ExchangeError, LedgerError};
pub use exchange::{CallContext, ConversionRequest, ExchangeBackend};
pub use registry::{ContractRegistry, RegistryLookup, EXCHANGE_NETWORK};

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
