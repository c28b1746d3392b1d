//! Exchange backend interface and the call context handed to it
//!
//! The backend is untrusted code. While `convert` runs it holds a
//! [`CallContext`] that mutably borrows both the agent and the chain. It can
//! read any balance but move only its own, and the only way back into the
//! agent is [`CallContext::reenter`], which goes through the deposit handler
//! and therefore through the reentrancy guard.

use rust_decimal::Decimal;
use std::fmt;
use types::ids::{Address, AssetId};
use types::path::ConversionPath;

use crate::agent::ConversionAgent;
use crate::chain::Chain;
use crate::errors::{AgentError, ExchangeError};
use crate::events::ConversionSucceeded;
use crate::ledger::Ledger;

/// Resource units available to a backend call.
pub type Gas = u64;

/// Budget handed to the backend when the agent config does not override it.
pub const DEFAULT_CONVERSION_GAS_LIMIT: Gas = 300_000;

/// Parameters of a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub path: ConversionPath,
    /// Native amount forwarded with the call
    pub amount: Decimal,
    /// Floor for the reported return
    pub min_return: Decimal,
    /// Receiver of the target asset
    pub beneficiary: Address,
}

/// Exchange network capable of converting native currency along a path.
///
/// On success the backend must already have delivered the returned amount of
/// `request.path.target()` to `request.beneficiary`.
pub trait ExchangeBackend: Send + Sync + fmt::Debug {
    fn convert(
        &self,
        ctx: &mut CallContext<'_>,
        request: &ConversionRequest,
    ) -> Result<Decimal, ExchangeError>;
}

/// Execution context of one backend call.
pub struct CallContext<'a> {
    agent: &'a mut ConversionAgent,
    chain: &'a mut Chain,
    exchange: Address,
    value: Decimal,
    gas_limit: Gas,
    gas_used: Gas,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        agent: &'a mut ConversionAgent,
        chain: &'a mut Chain,
        exchange: Address,
        value: Decimal,
        gas_limit: Gas,
    ) -> Self {
        Self {
            agent,
            chain,
            exchange,
            value,
            gas_limit,
            gas_used: 0,
        }
    }

    /// Address of the backend being executed.
    pub fn exchange_address(&self) -> Address {
        self.exchange
    }

    /// Address of the calling agent.
    pub fn caller(&self) -> Address {
        self.agent.address()
    }

    /// Native value forwarded with the call.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn gas_limit(&self) -> Gas {
        self.gas_limit
    }

    pub fn gas_used(&self) -> Gas {
        self.gas_used
    }

    pub fn gas_remaining(&self) -> Gas {
        self.gas_limit.saturating_sub(self.gas_used)
    }

    /// Charge `units` against the budget.
    ///
    /// Exhausting the budget fails the call; nothing is charged on failure.
    pub fn consume_gas(&mut self, units: Gas) -> Result<(), ExchangeError> {
        let required = self.gas_used.saturating_add(units);
        if required > self.gas_limit {
            return Err(ExchangeError::OutOfGas {
                limit: self.gas_limit,
                required,
            });
        }
        self.gas_used = required;
        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        self.chain.ledger()
    }

    /// Pay `amount` of `asset` from the backend's own balance to `to`.
    ///
    /// The backend can only spend what it holds; every other account is
    /// read-only through [`CallContext::ledger`].
    pub fn transfer(&mut self, asset: AssetId, to: Address, amount: Decimal) -> Result<(), ExchangeError> {
        self.chain.ledger_mut().transfer(asset, self.exchange, to, amount)?;
        Ok(())
    }

    /// Pay `amount` from the backend's own balance back into the agent's
    /// deposit handler, as a nested payment.
    pub fn reenter(&mut self, amount: Decimal) -> Result<ConversionSucceeded, AgentError> {
        self.agent.receive_payment(self.chain, self.exchange, amount)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("agent", &self.agent.address())
            .field("exchange", &self.exchange)
            .field("value", &self.value)
            .field("gas_limit", &self.gas_limit)
            .field("gas_used", &self.gas_used)
            .finish()
    }
}
