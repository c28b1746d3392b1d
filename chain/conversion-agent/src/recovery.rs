//! Recovery: sweep stranded balances to the destination wallet
//!
//! Funds can reach the agent without passing through the deposit handler
//! (forced native transfers, tokens sent straight to its address). The owner
//! moves them out here. Destination is always the configured wallet.

use tracing::info;
use types::ids::{Address, AssetId};

use crate::agent::ConversionAgent;
use crate::chain::Chain;
use crate::errors::AgentError;
use crate::events::{AssetWithdrawn, ContractEvent, NativeWithdrawn};

impl ConversionAgent {
    /// Move the agent's entire native balance to the destination wallet. Owner-only.
    pub fn withdraw_native(&self, chain: &mut Chain, caller: Address) -> Result<NativeWithdrawn, AgentError> {
        self.ensure_owner(&caller)?;

        let destination = self.destination_wallet();
        let amount = chain
            .ledger_mut()
            .sweep(AssetId::NATIVE, self.address(), destination)?;

        let event = NativeWithdrawn { destination, amount };
        chain.emit(ContractEvent::NativeWithdrawn(event.clone()));
        info!(agent = %self.address(), %destination, %amount, "Native balance withdrawn");
        Ok(event)
    }

    /// Move the agent's entire balance of `asset` to the destination wallet. Owner-only.
    ///
    /// A zero balance still succeeds, with an amount of zero.
    pub fn withdraw_asset(
        &self,
        chain: &mut Chain,
        caller: Address,
        asset: AssetId,
    ) -> Result<AssetWithdrawn, AgentError> {
        self.ensure_owner(&caller)?;

        let destination = self.destination_wallet();
        let amount = chain.ledger_mut().sweep(asset, self.address(), destination)?;

        let event = AssetWithdrawn {
            asset,
            destination,
            amount,
        };
        chain.emit(ContractEvent::AssetWithdrawn(event.clone()));
        info!(agent = %self.address(), %asset, %destination, %amount, "Asset balance withdrawn");
        Ok(event)
    }
}
