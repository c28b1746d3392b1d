//! Contract-specific error types
//!
//! Error taxonomy for the ledger, the exchange interface, configuration and
//! the conversion agent itself. Every agent error aborts the enclosing
//! operation; nothing is retried inside the core.

use rust_decimal::Decimal;
use thiserror::Error;
use types::errors::{PathError, RateError};
use types::ids::{Address, AssetId};

/// Ledger errors (balance movements)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient {asset} balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        asset: AssetId,
        account: Address,
        required: Decimal,
        available: Decimal,
    },

    #[error("Transfer amount must not be negative")]
    InvalidAmount,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Errors surfaced by an exchange backend during `convert`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Exchange reverted: {reason}")]
    Reverted { reason: String },

    #[error("Out of gas: limit {limit}, required {required}")]
    OutOfGas { limit: u64, required: u64 },

    #[error("Exchange reported {reported} but destination received {delivered}")]
    UndeliveredReturn { reported: Decimal, delivered: Decimal },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Destination wallet must not be the zero address")]
    ZeroDestination,

    #[error("Registry must not be the zero address")]
    ZeroRegistry,

    #[error("Conversion gas limit must be positive")]
    ZeroGasLimit,

    #[error("Invalid conversion path: {0}")]
    Path(#[from] PathError),

    #[error("Invalid conversion rate: {0}")]
    Rate(#[from] RateError),

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },

    #[error("Failed to read configuration: {message}")]
    Io { message: String },
}

/// Conversion agent errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("No exchange backend resolvable through registry {registry}")]
    BackendUnavailable { registry: Address },

    #[error("Conversion failed: {0}")]
    ConversionFailed(ExchangeError),

    #[error("Slippage exceeded: minimum return {min_return}, returned {returned}")]
    SlippageExceeded { min_return: Decimal, returned: Decimal },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Payment amount must be positive")]
    InvalidAmount,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<PathError> for AgentError {
    fn from(err: PathError) -> Self {
        AgentError::InvalidConfiguration(err.into())
    }
}

impl From<RateError> for AgentError {
    fn from(err: RateError) -> Self {
        AgentError::InvalidConfiguration(err.into())
    }
}
