//! Conversion Agent: deposit-triggered conversion and owner configuration
//!
//! Every native payment to the agent is converted into the target asset and
//! delivered to the destination wallet in one atomic operation:
//!
//! `Idle → LockAcquiring → BackendResolving → Converting → Verifying → {Committed | Aborted}`
//!
//! Any failure restores the chain to its state before the payment, so the
//! payer keeps their funds and no record is emitted.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};
use types::ids::{Address, AssetId};
use types::numeric::ConversionRate;
use types::path::ConversionPath;
use uuid::Uuid;

use crate::chain::Chain;
use crate::config::AgentConfig;
use crate::errors::{AgentError, ConfigError, ExchangeError};
use crate::events::{
    ContractEvent, ConversionPathUpdated, ConversionSucceeded, DestinationWalletUpdated,
    MinConversionRateUpdated, RegistryUpdated, ReentryDetected,
};
use crate::exchange::{CallContext, ConversionRequest, ExchangeBackend, Gas};
use crate::registry::EXCHANGE_NETWORK;
use crate::security::{OwnerCapability, ReentrancyGuard};

/// Stage of a single conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Idle,
    LockAcquiring,
    BackendResolving,
    Converting,
    Verifying,
    /// Terminal: effects kept, record emitted
    Committed,
    /// Terminal: effects rolled back
    Aborted,
}

/// Bookkeeping for one payment, used for tracing.
#[derive(Debug)]
struct ConversionAttempt {
    id: Uuid,
    stage: ConversionStage,
}

impl ConversionAttempt {
    fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            stage: ConversionStage::Idle,
        }
    }

    fn advance(&mut self, next: ConversionStage) {
        debug!(conversion_id = %self.id, from = ?self.stage, to = ?next, "Conversion stage");
        self.stage = next;
    }
}

/// Custodial agent converting native payments into the target asset.
///
/// Configuration changes only through the owner-gated setters; a conversion
/// never mutates it.
#[derive(Debug)]
pub struct ConversionAgent {
    /// The agent's own account
    address: Address,
    owner: OwnerCapability,
    conversion_path: ConversionPath,
    destination_wallet: Address,
    registry: Address,
    min_conversion_rate: ConversionRate,
    conversion_gas_limit: Gas,
    reentrancy_guard: ReentrancyGuard,
    /// Security audit trail. Not rolled back with the chain.
    reentry_log: Vec<ReentryDetected>,
}

impl ConversionAgent {
    /// Create an agent living at `address`.
    pub fn new(address: Address, owner: Address, config: AgentConfig) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            address,
            owner: OwnerCapability::new(owner),
            conversion_path: config.conversion_path,
            destination_wallet: config.destination_wallet,
            registry: config.registry,
            min_conversion_rate: config.min_conversion_rate,
            conversion_gas_limit: config.conversion_gas_limit,
            reentrancy_guard: ReentrancyGuard::new(),
            reentry_log: Vec::new(),
        })
    }

    /// Create an agent at a fresh chain address.
    pub fn deploy(chain: &mut Chain, owner: Address, config: AgentConfig) -> Result<Self, AgentError> {
        let address = chain.allocate_address();
        let agent = Self::new(address, owner, config)?;
        info!(%address, %owner, path = %agent.conversion_path, "Deployed conversion agent");
        Ok(agent)
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner.owner()
    }

    pub fn conversion_path(&self) -> &ConversionPath {
        &self.conversion_path
    }

    pub fn destination_wallet(&self) -> Address {
        self.destination_wallet
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    pub fn min_conversion_rate(&self) -> ConversionRate {
        self.min_conversion_rate
    }

    pub fn conversion_gas_limit(&self) -> Gas {
        self.conversion_gas_limit
    }

    /// True only while a conversion is in flight.
    pub fn is_locked(&self) -> bool {
        self.reentrancy_guard.is_locked()
    }

    /// Rejected reentry attempts, oldest first.
    pub fn reentry_records(&self) -> &[ReentryDetected] {
        &self.reentry_log
    }

    /// Current configuration.
    pub fn config(&self) -> AgentConfig {
        AgentConfig::new(
            self.conversion_path.clone(),
            self.destination_wallet,
            self.registry,
            self.min_conversion_rate,
        )
        .with_gas_limit(self.conversion_gas_limit)
    }

    // ───────────────────────── Conversion ─────────────────────────

    /// Deposit handler: a bare native payment of `amount` from `sender`.
    ///
    /// Accepts the payment, converts all of it and delivers the proceeds to
    /// the destination wallet. On any failure the chain is restored as if the
    /// payment never happened. The lock is checked before anything else, so a
    /// nested payment always fails with `Reentrancy`.
    pub fn receive_payment(
        &mut self,
        chain: &mut Chain,
        sender: Address,
        amount: Decimal,
    ) -> Result<ConversionSucceeded, AgentError> {
        let mut attempt = ConversionAttempt::new();
        attempt.advance(ConversionStage::LockAcquiring);
        self.with_lock(sender, |agent| agent.settle_payment(chain, &mut attempt, sender, amount))
    }

    /// Runs under the lock: commit the conversion or restore the chain.
    fn settle_payment(
        &mut self,
        chain: &mut Chain,
        attempt: &mut ConversionAttempt,
        sender: Address,
        amount: Decimal,
    ) -> Result<ConversionSucceeded, AgentError> {
        if amount <= Decimal::ZERO {
            return Err(AgentError::InvalidAmount);
        }

        let snapshot = chain.snapshot();

        match self.convert_locked(chain, attempt, sender, amount) {
            Ok(record) => {
                attempt.advance(ConversionStage::Committed);
                chain.emit(ContractEvent::ConversionSucceeded(record.clone()));
                info!(
                    conversion_id = %record.conversion_id,
                    from = %sender,
                    amount = %amount,
                    min_return = %record.min_return,
                    returned = %record.dest_amount,
                    "Conversion committed"
                );
                Ok(record)
            }
            Err(err) => {
                let failed_at = attempt.stage;
                attempt.advance(ConversionStage::Aborted);
                chain.restore(snapshot);
                warn!(
                    conversion_id = %attempt.id,
                    from = %sender,
                    amount = %amount,
                    stage = ?failed_at,
                    error = %err,
                    "Conversion aborted"
                );
                Err(err)
            }
        }
    }

    /// Scoped lock acquisition: the guard is released on every exit path of
    /// `body`. Nested attempts rejected meanwhile are written to the audit trail.
    fn with_lock<T>(
        &mut self,
        sender: Address,
        body: impl FnOnce(&mut Self) -> Result<T, AgentError>,
    ) -> Result<T, AgentError> {
        if !self.reentrancy_guard.acquire() {
            warn!(agent = %self.address, %sender, "Nested conversion rejected");
            return Err(AgentError::Reentrancy);
        }

        let result = body(self);
        self.reentrancy_guard.release();

        let rejected_attempts = self.reentrancy_guard.take_rejected();
        if rejected_attempts > 0 {
            let record = ReentryDetected {
                from: sender,
                r1_status: result.is_ok(),
                r2_status: false,
                rejected_attempts,
            };
            warn!(
                agent = %self.address,
                r1_status = record.r1_status,
                r2_status = record.r2_status,
                rejected_attempts,
                "Reentry detected"
            );
            self.reentry_log.push(record);
        }

        result
    }

    fn convert_locked(
        &mut self,
        chain: &mut Chain,
        attempt: &mut ConversionAttempt,
        sender: Address,
        amount: Decimal,
    ) -> Result<ConversionSucceeded, AgentError> {
        chain.ledger_mut().transfer_native(sender, self.address, amount)?;

        attempt.advance(ConversionStage::BackendResolving);
        let (exchange, backend) = self.resolve_backend(chain)?;

        let min_return = self
            .min_conversion_rate
            .min_return(amount)
            .ok_or(AgentError::InvalidAmount)?;
        let target = self.conversion_path.target();
        let destination = self.destination_wallet;
        let request = ConversionRequest {
            path: self.conversion_path.clone(),
            amount,
            min_return,
            beneficiary: destination,
        };

        attempt.advance(ConversionStage::Converting);
        let old_balance = chain.ledger().balance_of(target, &destination);
        chain.ledger_mut().transfer_native(self.address, exchange, amount)?;

        let gas_limit = self.conversion_gas_limit;
        let returned = {
            let mut ctx = CallContext::new(self, chain, exchange, amount, gas_limit);
            backend.convert(&mut ctx, &request)
        }
        .map_err(AgentError::ConversionFailed)?;

        attempt.advance(ConversionStage::Verifying);
        if returned < min_return {
            return Err(AgentError::SlippageExceeded { min_return, returned });
        }

        let new_balance = chain.ledger().balance_of(target, &destination);
        let delivered = new_balance - old_balance;
        if delivered < returned {
            return Err(AgentError::ConversionFailed(ExchangeError::UndeliveredReturn {
                reported: returned,
                delivered,
            }));
        }

        Ok(ConversionSucceeded {
            conversion_id: attempt.id,
            from: sender,
            from_amount: amount,
            destination,
            target_asset: target,
            min_return,
            dest_amount: returned,
            old_balance,
            new_balance,
        })
    }

    /// Registry → exchange address → deployed backend.
    fn resolve_backend(&self, chain: &Chain) -> Result<(Address, Arc<dyn ExchangeBackend>), AgentError> {
        let unavailable = || AgentError::BackendUnavailable {
            registry: self.registry,
        };
        let registry = chain.registry_at(&self.registry).ok_or_else(unavailable)?;
        let exchange = registry.resolve(&EXCHANGE_NETWORK).ok_or_else(unavailable)?;
        let backend = chain.exchange_at(&exchange).ok_or_else(unavailable)?;
        debug!(registry = %self.registry, %exchange, "Resolved exchange backend");
        Ok((exchange, backend))
    }

    // ───────────────────────── Configuration ─────────────────────────

    pub(crate) fn ensure_owner(&self, caller: &Address) -> Result<(), AgentError> {
        self.owner.ensure(caller)
    }

    /// Replace the conversion path. Owner-only.
    pub fn set_conversion_path(
        &mut self,
        chain: &mut Chain,
        caller: Address,
        hops: Vec<AssetId>,
    ) -> Result<(), AgentError> {
        self.ensure_owner(&caller)?;
        let path = ConversionPath::new(hops)?;

        debug!(old = %self.conversion_path, new = %path, "Conversion path updated");
        self.conversion_path = path.clone();
        chain.emit(ContractEvent::ConversionPathUpdated(ConversionPathUpdated { path }));
        Ok(())
    }

    /// Point the agent at another registry. Owner-only.
    pub fn set_registry(&mut self, chain: &mut Chain, caller: Address, registry: Address) -> Result<(), AgentError> {
        self.ensure_owner(&caller)?;
        if registry.is_zero() {
            return Err(ConfigError::ZeroRegistry.into());
        }

        debug!(old = %self.registry, new = %registry, "Registry updated");
        self.registry = registry;
        chain.emit(ContractEvent::RegistryUpdated(RegistryUpdated { registry }));
        Ok(())
    }

    /// Replace the minimum conversion rate. Owner-only.
    pub fn set_min_conversion_rate(
        &mut self,
        chain: &mut Chain,
        caller: Address,
        rate: Decimal,
    ) -> Result<(), AgentError> {
        self.ensure_owner(&caller)?;
        let rate = ConversionRate::new(rate)?;

        debug!(old = %self.min_conversion_rate, new = %rate, "Minimum conversion rate updated");
        self.min_conversion_rate = rate;
        chain.emit(ContractEvent::MinConversionRateUpdated(MinConversionRateUpdated { rate }));
        Ok(())
    }

    /// Replace the destination wallet. Owner-only.
    pub fn set_destination_wallet(
        &mut self,
        chain: &mut Chain,
        caller: Address,
        destination: Address,
    ) -> Result<(), AgentError> {
        self.ensure_owner(&caller)?;
        if destination.is_zero() {
            return Err(ConfigError::ZeroDestination.into());
        }

        debug!(old = %self.destination_wallet, new = %destination, "Destination wallet updated");
        self.destination_wallet = destination;
        chain.emit(ContractEvent::DestinationWalletUpdated(DestinationWalletUpdated {
            destination,
        }));
        Ok(())
    }
}

#[cfg(all(test, feature = "mock-exchange"))]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use crate::mock::{FailingExchange, FixedRateExchange, ReentrantExchange};
    use crate::registry::ContractRegistry;

    struct Fixture {
        chain: Chain,
        agent: ConversionAgent,
        registry: Arc<ContractRegistry>,
        token: AssetId,
        owner: Address,
        payer: Address,
        wallet: Address,
    }

    fn setup(backend: Arc<dyn ExchangeBackend>, rate: u32) -> Fixture {
        let mut chain = Chain::new();
        let registry = Arc::new(ContractRegistry::new());
        let registry_address = chain.deploy_registry(registry.clone());
        let exchange = chain.deploy_exchange(backend);
        registry.set_address(EXCHANGE_NETWORK, exchange);
        let token = chain.deploy_asset(exchange, Decimal::from(1_000_000)).unwrap();

        let owner = Address::from_label("owner");
        let payer = Address::from_label("payer");
        let wallet = Address::from_label("wallet");
        chain.fund(payer, Decimal::from(1_000)).unwrap();

        let config = AgentConfig::new(
            ConversionPath::direct(token).unwrap(),
            wallet,
            registry_address,
            ConversionRate::try_from(rate).unwrap(),
        );
        let agent = ConversionAgent::deploy(&mut chain, owner, config).unwrap();

        Fixture {
            chain,
            agent,
            registry,
            token,
            owner,
            payer,
            wallet,
        }
    }

    fn fixed_rate(rate: i64, scale: u32) -> Arc<dyn ExchangeBackend> {
        Arc::new(FixedRateExchange::new(Decimal::new(rate, scale)))
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AgentConfig::new(
            ConversionPath::direct(AssetId::from(Address::from_label("IND"))).unwrap(),
            Address::ZERO,
            Address::from_label("registry"),
            ConversionRate::ONE,
        );
        let result = ConversionAgent::new(Address::from_label("agent"), Address::from_label("owner"), config);
        assert_eq!(
            result.unwrap_err(),
            AgentError::InvalidConfiguration(ConfigError::ZeroDestination)
        );
    }

    #[test]
    fn test_conversion_commits_and_records() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let record = f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .unwrap();

        assert_eq!(record.from, f.payer);
        assert_eq!(record.from_amount, Decimal::from(10));
        assert_eq!(record.destination, f.wallet);
        assert_eq!(record.min_return, Decimal::from(10));
        assert_eq!(record.dest_amount, Decimal::from(15));
        assert_eq!(record.old_balance, Decimal::ZERO);
        assert_eq!(record.new_balance, Decimal::from(15));
        assert_eq!(record.target_asset, f.token);

        assert_eq!(f.chain.ledger().balance_of(f.token, &f.wallet), Decimal::from(15));
        assert_eq!(f.chain.ledger().native_balance_of(&f.payer), Decimal::from(990));
        assert_eq!(f.chain.ledger().native_balance_of(&f.agent.address()), Decimal::ZERO);
        assert_eq!(
            f.chain.events(),
            &[ContractEvent::ConversionSucceeded(record)]
        );
        assert!(!f.agent.is_locked());
    }

    #[test]
    fn test_zero_payment_rejected() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let before = f.chain.ledger().clone();
        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::ZERO);
        assert_eq!(result, Err(AgentError::InvalidAmount));
        assert_eq!(f.chain.ledger(), &before);
    }

    #[test]
    fn test_payer_without_funds_rejected() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let broke = Address::from_label("broke");
        let result = f.agent.receive_payment(&mut f.chain, broke, Decimal::from(10));
        assert!(matches!(
            result,
            Err(AgentError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));
        assert!(!f.agent.is_locked());
    }

    #[test]
    fn test_slippage_rolls_back() {
        let mut f = setup(fixed_rate(15, 1), 500);
        let before = f.chain.ledger().clone();

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert_eq!(
            result,
            Err(AgentError::SlippageExceeded {
                min_return: Decimal::from(5000),
                returned: Decimal::from(15),
            })
        );
        assert_eq!(f.chain.ledger(), &before);
        assert!(f.chain.events().is_empty());
        assert!(!f.agent.is_locked());
    }

    #[test]
    fn test_failing_backend_rolls_back() {
        let mut f = setup(Arc::new(FailingExchange::new("insufficient liquidity")), 1);
        let before = f.chain.ledger().clone();

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert!(matches!(
            result,
            Err(AgentError::ConversionFailed(ExchangeError::Reverted { .. }))
        ));
        assert_eq!(f.chain.ledger(), &before);
        assert!(!f.agent.is_locked());
    }

    #[test]
    fn test_missing_backend_in_registry() {
        let mut f = setup(fixed_rate(15, 1), 1);
        f.registry.unset(&EXCHANGE_NETWORK);

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert_eq!(
            result,
            Err(AgentError::BackendUnavailable {
                registry: f.agent.registry()
            })
        );
        assert_eq!(f.chain.ledger().native_balance_of(&f.payer), Decimal::from(1_000));
    }

    #[test]
    fn test_registry_points_at_address_without_backend() {
        let mut f = setup(fixed_rate(15, 1), 1);
        f.registry
            .set_address(EXCHANGE_NETWORK, Address::from_label("empty account"));

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert!(matches!(result, Err(AgentError::BackendUnavailable { .. })));
    }

    #[test]
    fn test_out_of_gas_fails_conversion() {
        let backend = Arc::new(FixedRateExchange::new(Decimal::new(15, 1)).with_gas_cost(500_000));
        let mut f = setup(backend, 1);

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert_eq!(
            result,
            Err(AgentError::ConversionFailed(ExchangeError::OutOfGas {
                limit: 300_000,
                required: 500_000,
            }))
        );
        assert_eq!(f.chain.ledger().balance_of(f.token, &f.wallet), Decimal::ZERO);
    }

    #[test]
    fn test_reentrant_backend_rejected() {
        let backend = Arc::new(ReentrantExchange::new());
        let mut f = setup(backend.clone(), 1);
        let before = f.chain.ledger().clone();

        let result = f.agent.receive_payment(&mut f.chain, f.payer, Decimal::from(10));
        assert!(matches!(
            result,
            Err(AgentError::ConversionFailed(ExchangeError::UndeliveredReturn { .. }))
        ));
        assert_eq!(backend.nested_outcomes(), vec![Err(AgentError::Reentrancy)]);

        let records = f.agent.reentry_records();
        assert_eq!(records.len(), 1);
        assert!(!records[0].r1_status);
        assert!(!records[0].r2_status);
        assert_eq!(records[0].rejected_attempts, 1);

        assert_eq!(f.chain.ledger(), &before);
        assert!(!f.agent.is_locked());
    }

    #[test]
    fn test_second_payment_after_failure_succeeds() {
        let mut f = setup(fixed_rate(15, 1), 500);
        assert!(f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .is_err());

        f.agent
            .set_min_conversion_rate(&mut f.chain, f.owner, Decimal::ONE)
            .unwrap();
        let record = f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .unwrap();
        assert_eq!(record.dest_amount, Decimal::from(15));
    }

    #[test]
    fn test_old_and_new_balance_track_previous_deliveries() {
        let mut f = setup(fixed_rate(2, 0), 1);
        f.agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .unwrap();
        let second = f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(5))
            .unwrap();
        assert_eq!(second.old_balance, Decimal::from(20));
        assert_eq!(second.new_balance, Decimal::from(30));
    }

    // ─── Configuration ───

    #[test]
    fn test_owner_updates_configuration() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let new_wallet = Address::from_label("new wallet");
        let new_registry = Address::from_label("new registry");
        let relay = AssetId::from(Address::from_label("relay"));

        f.agent
            .set_destination_wallet(&mut f.chain, f.owner, new_wallet)
            .unwrap();
        f.agent
            .set_registry(&mut f.chain, f.owner, new_registry)
            .unwrap();
        f.agent
            .set_min_conversion_rate(&mut f.chain, f.owner, Decimal::from(3))
            .unwrap();
        f.agent
            .set_conversion_path(&mut f.chain, f.owner, vec![AssetId::NATIVE, relay, f.token])
            .unwrap();

        assert_eq!(f.agent.destination_wallet(), new_wallet);
        assert_eq!(f.agent.registry(), new_registry);
        assert_eq!(f.agent.min_conversion_rate(), ConversionRate::try_from(3u32).unwrap());
        assert_eq!(f.agent.conversion_path().hops(), &[AssetId::NATIVE, relay, f.token]);
        assert_eq!(f.chain.events().len(), 4);
    }

    #[test]
    fn test_invalid_settings_leave_config_untouched() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let before = f.agent.config();

        assert!(matches!(
            f.agent.set_conversion_path(&mut f.chain, f.owner, vec![f.token]),
            Err(AgentError::InvalidConfiguration(ConfigError::Path(_)))
        ));
        assert!(matches!(
            f.agent
                .set_min_conversion_rate(&mut f.chain, f.owner, Decimal::new(5, 1)),
            Err(AgentError::InvalidConfiguration(ConfigError::Rate(_)))
        ));
        assert_eq!(
            f.agent.set_destination_wallet(&mut f.chain, f.owner, Address::ZERO),
            Err(AgentError::InvalidConfiguration(ConfigError::ZeroDestination))
        );
        assert_eq!(
            f.agent.set_registry(&mut f.chain, f.owner, Address::ZERO),
            Err(AgentError::InvalidConfiguration(ConfigError::ZeroRegistry))
        );

        assert_eq!(f.agent.config(), before);
        assert!(f.chain.events().is_empty());
    }

    #[test]
    fn test_non_owner_cannot_configure() {
        let mut f = setup(fixed_rate(15, 1), 1);
        let eve = Address::from_label("eve");
        let before = f.agent.config();

        let unauthorized = Err(AgentError::Unauthorized { caller: eve });
        assert_eq!(
            f.agent.set_destination_wallet(&mut f.chain, eve, eve),
            unauthorized
        );
        assert_eq!(f.agent.set_registry(&mut f.chain, eve, eve), unauthorized);
        assert_eq!(
            f.agent.set_min_conversion_rate(&mut f.chain, eve, Decimal::from(10)),
            unauthorized
        );
        assert_eq!(
            f.agent
                .set_conversion_path(&mut f.chain, eve, vec![AssetId::NATIVE, f.token]),
            unauthorized
        );
        assert_eq!(f.agent.config(), before);
    }

    #[test]
    fn test_registry_switch_changes_backend() {
        let mut f = setup(Arc::new(FailingExchange::new("paused")), 1);

        // Second registry pointing at a working exchange.
        let working = f.chain.deploy_exchange(fixed_rate(2, 0));
        f.chain
            .ledger_mut()
            .mint(f.token, working, Decimal::from(1_000))
            .unwrap();
        let registry = Arc::new(ContractRegistry::new());
        registry.set_address(EXCHANGE_NETWORK, working);
        let registry_address = f.chain.deploy_registry(registry);

        assert!(f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .is_err());
        f.agent
            .set_registry(&mut f.chain, f.owner, registry_address)
            .unwrap();
        let record = f
            .agent
            .receive_payment(&mut f.chain, f.payer, Decimal::from(10))
            .unwrap();
        assert_eq!(record.dest_amount, Decimal::from(20));
    }
}
