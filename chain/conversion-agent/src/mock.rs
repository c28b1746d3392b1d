//! Scripted exchange backends for tests and simulations
//!
//! - [`FixedRateExchange`]: converts at a constant rate out of its own inventory
//! - [`FailingExchange`]: always reverts
//! - [`ReentrantExchange`]: calls back into the agent, then claims success
//!   without delivering anything

use rust_decimal::Decimal;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::errors::{AgentError, ExchangeError};
use crate::events::ConversionSucceeded;
use crate::exchange::{CallContext, ConversionRequest, ExchangeBackend, Gas};

/// Gas charged per conversion unless overridden.
pub const DEFAULT_CONVERSION_COST: Gas = 120_000;

/// Converts at a fixed `rate`, paying the target asset out of the
/// exchange's own balance.
#[derive(Debug, Clone)]
pub struct FixedRateExchange {
    rate: Decimal,
    gas_cost: Gas,
}

impl FixedRateExchange {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate,
            gas_cost: DEFAULT_CONVERSION_COST,
        }
    }

    pub fn with_gas_cost(mut self, gas_cost: Gas) -> Self {
        self.gas_cost = gas_cost;
        self
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl ExchangeBackend for FixedRateExchange {
    fn convert(&self, ctx: &mut CallContext<'_>, request: &ConversionRequest) -> Result<Decimal, ExchangeError> {
        ctx.consume_gas(self.gas_cost)?;

        if ctx.value() != request.amount {
            return Err(ExchangeError::Reverted {
                reason: format!("value {} does not match amount {}", ctx.value(), request.amount),
            });
        }

        let returned = request
            .amount
            .checked_mul(self.rate)
            .ok_or_else(|| ExchangeError::Reverted {
                reason: "return overflow".to_string(),
            })?;

        let exchange = ctx.exchange_address();
        ctx.transfer(request.path.target(), request.beneficiary, returned)?;

        debug!(%exchange, amount = %request.amount, %returned, gas_used = ctx.gas_used(), "Fixed-rate conversion");
        Ok(returned)
    }
}

/// Always reverts with `reason`.
#[derive(Debug, Clone)]
pub struct FailingExchange {
    reason: String,
}

impl FailingExchange {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl ExchangeBackend for FailingExchange {
    fn convert(&self, _ctx: &mut CallContext<'_>, _request: &ConversionRequest) -> Result<Decimal, ExchangeError> {
        Err(ExchangeError::Reverted {
            reason: self.reason.clone(),
        })
    }
}

/// Re-enters the agent's deposit handler, then reports `min_return` without
/// delivering it.
///
/// The nested payment carries the forwarded value unless an amount is fixed
/// with [`ReentrantExchange::with_amount`]. Outcomes of the nested calls are
/// kept for inspection.
#[derive(Debug, Default)]
pub struct ReentrantExchange {
    amount: Option<Decimal>,
    nested: Mutex<Vec<Result<ConversionSucceeded, AgentError>>>,
}

impl ReentrantExchange {
    /// Gas charged before calling back.
    pub const CALLBACK_COST: Gas = 40_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Re-enter with `amount` instead of the forwarded value.
    pub fn with_amount(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn nested_outcomes(&self) -> Vec<Result<ConversionSucceeded, AgentError>> {
        self.nested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExchangeBackend for ReentrantExchange {
    fn convert(&self, ctx: &mut CallContext<'_>, request: &ConversionRequest) -> Result<Decimal, ExchangeError> {
        ctx.consume_gas(Self::CALLBACK_COST)?;

        let amount = self.amount.unwrap_or_else(|| ctx.value());
        let outcome = ctx.reenter(amount);
        debug!(caller = %ctx.caller(), ok = outcome.is_ok(), "Nested payment returned");
        self.nested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome);

        Ok(request.min_return)
    }
}
