//! Contract events emitted by the conversion agent
//!
//! Events are immutable records appended to the chain's event log when an
//! operation commits. A rolled-back operation leaves no events behind.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{Address, AssetId};
use types::numeric::ConversionRate;
use types::path::ConversionPath;
use uuid::Uuid;

/// A payment was converted and delivered to the destination wallet.
///
/// `old_balance` / `new_balance` are the destination's holdings of the target
/// asset immediately before and after the exchange call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSucceeded {
    pub conversion_id: Uuid,
    pub from: Address,
    pub from_amount: Decimal,
    pub destination: Address,
    pub target_asset: AssetId,
    pub min_return: Decimal,
    pub dest_amount: Decimal,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
}

/// Nested conversion attempts were rejected while a conversion held the lock.
///
/// `r1_status` is the outcome of the outer (lock-holding) attempt,
/// `r2_status` the outcome of the nested attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReentryDetected {
    pub from: Address,
    pub r1_status: bool,
    pub r2_status: bool,
    pub rejected_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPathUpdated {
    pub path: ConversionPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryUpdated {
    pub registry: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinConversionRateUpdated {
    pub rate: ConversionRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationWalletUpdated {
    pub destination: Address,
}

/// Stranded native currency swept to the destination wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeWithdrawn {
    pub destination: Address,
    pub amount: Decimal,
}

/// Stranded token balance swept to the destination wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWithdrawn {
    pub asset: AssetId,
    pub destination: Address,
    pub amount: Decimal,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    ConversionSucceeded(ConversionSucceeded),
    ConversionPathUpdated(ConversionPathUpdated),
    RegistryUpdated(RegistryUpdated),
    MinConversionRateUpdated(MinConversionRateUpdated),
    DestinationWalletUpdated(DestinationWalletUpdated),
    NativeWithdrawn(NativeWithdrawn),
    AssetWithdrawn(AssetWithdrawn),
}
