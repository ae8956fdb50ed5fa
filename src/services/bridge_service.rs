use log::warn;

use crate::{
    errors::CustomError,
    models::{
        balance::BalanceState,
        bridge::{BridgeAssetBalance, BridgeBalance, BridgeBalances},
        token::NATIVE_DECIMALS,
    },
    units::format_units,
};

use super::blockchain_service::BlockchainClient;

/// A connected L1/L2 pair. Balances are read from both sides so the
/// front end can render either box of the bridge.
pub struct BridgeClient {
    l1: BlockchainClient,
    l2: BlockchainClient,
}

impl BridgeClient {
    /// Connect both sides of the bridge anchored at an L1 chain ID,
    /// resolving the L2 side from the network registry.
    pub async fn for_bridge(l1_chain_id: u64) -> Result<Self, CustomError> {
        let l1 = BlockchainClient::new(l1_chain_id).await?;
        let partner = l1
            .config()
            .bridge_partner
            .ok_or(CustomError::UnsupportedChainError(l1_chain_id))?;
        let l2 = BlockchainClient::new(partner).await?;
        Ok(Self { l1, l2 })
    }

    /// Fetch every tracked asset's balance on both sides. A failed
    /// read on one side leaves that side unavailable rather than
    /// failing the whole call.
    pub async fn balances(
        &self,
        wallet_address: &str,
        token_addresses: &[String],
    ) -> Result<BridgeBalances, CustomError> {
        let l1_native = self.native_side(&self.l1, wallet_address).await;
        let l2_native = self.native_side(&self.l2, wallet_address).await;

        let native = Self::entry(
            None,
            self.l1.config().symbol.clone(),
            NATIVE_DECIMALS as u8,
            l1_native,
            l2_native,
        )?;

        let mut tokens = Vec::with_capacity(token_addresses.len());
        for token_address in token_addresses {
            let descriptor = self.l1.get_token_descriptor(token_address).await?;
            let l1_balance = self
                .token_side(&self.l1, token_address, wallet_address)
                .await;
            let l2_balance = self
                .token_side(&self.l2, token_address, wallet_address)
                .await;
            tokens.push(Self::entry(
                Some(descriptor.address),
                descriptor.symbol,
                descriptor.decimals.unwrap_or(18),
                l1_balance,
                l2_balance,
            )?);
        }

        Ok(BridgeBalances { native, tokens })
    }

    async fn native_side(&self, client: &BlockchainClient, wallet: &str) -> BalanceState {
        match client.get_native_balance(wallet).await {
            Ok(balance) => BalanceState::Available(balance.balance),
            Err(e) => {
                warn!(
                    "native balance unavailable on chain {}: {}",
                    client.config().chain_id,
                    e
                );
                BalanceState::Unavailable
            }
        }
    }

    async fn token_side(
        &self,
        client: &BlockchainClient,
        token_address: &str,
        wallet: &str,
    ) -> BalanceState {
        match client.get_token_balance(token_address, wallet).await {
            Ok(balance) => BalanceState::Available(balance.balance),
            Err(e) => {
                warn!(
                    "token {} balance unavailable on chain {}: {}",
                    token_address,
                    client.config().chain_id,
                    e
                );
                BalanceState::Unavailable
            }
        }
    }

    fn entry(
        token_address: Option<String>,
        symbol: String,
        decimals: u8,
        l1: BalanceState,
        l2: BalanceState,
    ) -> Result<BridgeAssetBalance, CustomError> {
        let format = |state: BalanceState| -> Result<Option<String>, CustomError> {
            state
                .available()
                .map(|value| format_units(value, u32::from(decimals)))
                .transpose()
        };

        Ok(BridgeAssetBalance {
            l1_formatted: format(l1)?,
            l2_formatted: format(l2)?,
            token_address,
            symbol,
            decimals,
            balance: BridgeBalance { l1, l2 },
        })
    }
}
