use async_trait::async_trait;
use chrono::Utc;
use ethers::{
    abi::AbiParser,
    contract::Contract,
    core::types::{Address, U256},
    providers::{Http, Middleware, Provider},
};
use log::warn;
use std::{str::FromStr, sync::Arc};

use crate::{
    errors::CustomError,
    models::{
        network_config::NetworkConfig,
        network_status::NetworkStatus,
        token::{TokenBalance, TokenDescriptor, NATIVE_DECIMALS},
    },
    services::max_amount_service::GasPriceSource,
    units::format_units,
};

use super::network_config::get_network_config;

// ERC20 ABI for balance and decimals functions
const ERC20_ABI: &str = r#"[
    {
        "constant": true,
        "inputs": [{"name": "_owner", "type": "address"}],
        "name": "balanceOf",
        "outputs": [{"name": "balance", "type": "uint256"}],
        "type": "function"
    },
    {
        "constant": true,
        "inputs": [],
        "name": "decimals",
        "outputs": [{"name": "", "type": "uint8"}],
        "type": "function"
    },
    {
        "constant": true,
        "inputs": [],
        "name": "symbol",
        "outputs": [{"name": "", "type": "string"}],
        "type": "function"
    }
]"#;

#[derive(Clone, Debug)]
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    config: NetworkConfig,
}

impl BlockchainClient {
    /// Create a new blockchain client by chain ID
    pub async fn new(chain_id: u64) -> Result<Self, CustomError> {
        let config = get_network_config(chain_id)?;
        let provider = Provider::<Http>::try_from(&config.rpc_url)
            .map_err(|e| CustomError::NetworkError(e.to_string()))?;

        // Verify connection and chain ID
        let connected_chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| CustomError::StringifiedProviderError(e.to_string()))?;

        if connected_chain_id.as_u64() != chain_id {
            return Err(CustomError::NetworkError(
                "Connected chain ID doesn't match requested chain ID".to_string(),
            ));
        }

        Ok(Self {
            provider: Arc::new(provider),
            config,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Get native currency balance for an address
    pub async fn get_native_balance(
        &self,
        wallet_address: &str,
    ) -> Result<TokenBalance, CustomError> {
        let address = Address::from_str(wallet_address)
            .map_err(|_| CustomError::InvalidAddressError(wallet_address.to_string()))?;

        let balance = self
            .provider
            .get_balance(address, None)
            .await
            .map_err(|e| CustomError::StringifiedProviderError(e.to_string()))?;

        let formatted_balance = format_units(balance, NATIVE_DECIMALS)?;

        Ok(TokenBalance {
            token_address: None,
            symbol: self.config.symbol.clone(),
            balance,
            decimals: NATIVE_DECIMALS as u8,
            formatted_balance,
        })
    }

    /// Get a token's symbol and decimals from its contract
    pub async fn get_token_descriptor(
        &self,
        token_address: &str,
    ) -> Result<TokenDescriptor, CustomError> {
        let address = Address::from_str(token_address)
            .map_err(|_| CustomError::InvalidAddressError(token_address.to_string()))?;
        let contract = self.erc20_contract(address);

        let decimals: u8 = contract
            .method::<_, u8>("decimals", ())
            .map_err(|e| CustomError::ContractError(e.to_string()))?
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        let symbol: String = contract
            .method::<_, String>("symbol", ())
            .map_err(|e| CustomError::ContractError(e.to_string()))?
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        Ok(TokenDescriptor {
            address: format!("{:?}", address),
            symbol,
            decimals: Some(decimals),
        })
    }

    /// Get ERC20 token balance
    pub async fn get_token_balance(
        &self,
        token_address: &str,
        wallet_address: &str,
    ) -> Result<TokenBalance, CustomError> {
        let descriptor = self.get_token_descriptor(token_address).await?;

        let wallet_address = Address::from_str(wallet_address)
            .map_err(|_| CustomError::InvalidAddressError(wallet_address.to_string()))?;
        let token = Address::from_str(&descriptor.address)
            .map_err(|_| CustomError::InvalidAddressError(descriptor.address.clone()))?;
        let contract = self.erc20_contract(token);

        let balance: U256 = contract
            .method::<_, U256>("balanceOf", wallet_address)
            .map_err(|e| CustomError::ContractError(e.to_string()))?
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        let formatted_balance = format_units(balance, descriptor.display_decimals())?;

        Ok(TokenBalance {
            token_address: Some(descriptor.address),
            symbol: descriptor.symbol,
            balance,
            decimals: descriptor.decimals.unwrap_or(18),
            formatted_balance,
        })
    }

    /// Get multiple token balances at once
    pub async fn get_multiple_token_balances(
        &self,
        token_addresses: &[String],
        wallet_address: &str,
    ) -> Result<Vec<TokenBalance>, CustomError> {
        let mut balances = Vec::new();

        // Get native balance first
        let native_balance = self.get_native_balance(wallet_address).await?;
        balances.push(native_balance);

        // Get ERC20 token balances
        for token_address in token_addresses {
            match self.get_token_balance(token_address, wallet_address).await {
                Ok(balance) => balances.push(balance),
                Err(e) => {
                    warn!("error fetching balance for token {}: {}", token_address, e);
                    continue;
                }
            }
        }

        Ok(balances)
    }

    /// Get network status
    pub async fn get_network_status(&self) -> Result<NetworkStatus, CustomError> {
        let latest_block = self
            .provider
            .get_block_number()
            .await
            .map_err(CustomError::ProviderError)?;
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(CustomError::ProviderError)?;

        Ok(NetworkStatus {
            chain_id: self.config.chain_id,
            name: self.config.name.clone(),
            latest_block: latest_block.as_u64(),
            gas_price,
            fetched_at: Utc::now(),
            symbol: self.config.symbol.clone(),
            block_explorer: self.config.block_explorer.clone(),
        })
    }

    fn erc20_contract(&self, address: Address) -> Contract<Provider<Http>> {
        Contract::new(
            address,
            AbiParser::default().parse_str(ERC20_ABI).unwrap(),
            self.provider.clone(),
        )
    }
}

#[async_trait]
impl GasPriceSource for BlockchainClient {
    async fn gas_price(&self) -> Result<U256, CustomError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(CustomError::ProviderError)
    }
}
