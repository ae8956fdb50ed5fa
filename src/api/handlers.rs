use actix_web::{get, post, web, HttpResponse};
use ethers::types::U256;
use serde::{Deserialize, Serialize};

use crate::errors::CustomError;
use crate::models::api_response::success_response;
use crate::models::balance::BalanceState;
use crate::models::token::{AssetSelection, TokenDescriptor};
use crate::services::blockchain_service::BlockchainClient;
use crate::services::bridge_service::BridgeClient;
use crate::services::max_amount_service::{
    compute_max_amount, validate_transfer_amount, MaxAmountOutcome,
};

#[derive(Debug, Deserialize)]
pub struct TokensQuery {
    /// Comma-separated token contract addresses.
    tokens: Option<String>,
}

impl TokensQuery {
    fn addresses(&self) -> Vec<String> {
        self.tokens
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct MaxAmountRequest {
    chain_id: u64,
    wallet_address: String,
    /// Absent when the native currency is being moved.
    token_address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MaxAmountResponse {
    /// Maximum enterable amount as a decimal string. `null` when the
    /// gas price could not be fetched; the client keeps its current
    /// field value and may retry.
    pub amount: Option<String>,
    pub insufficient_for_gas: bool,
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Debug, Deserialize)]
pub struct ValidateAmountRequest {
    chain_id: u64,
    wallet_address: String,
    token_address: Option<String>,
    amount: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateAmountResponse {
    pub valid: bool,
    /// Set when the amount itself is well-formed but exceeds the
    /// available balance on the entry side.
    pub insufficient_funds: bool,
    pub symbol: String,
}

#[get("/networks/{chain_id}/status")]
pub async fn get_network_status(chain_id: web::Path<u64>) -> Result<HttpResponse, CustomError> {
    let client = BlockchainClient::new(chain_id.into_inner()).await?;
    let status = client.get_network_status().await?;
    Ok(success_response(status))
}

#[get("/wallets/{chain_id}/{address}/balances")]
pub async fn get_wallet_balances(
    path: web::Path<(u64, String)>,
    query: web::Query<TokensQuery>,
) -> Result<HttpResponse, CustomError> {
    let (chain_id, address) = path.into_inner();
    let client = BlockchainClient::new(chain_id).await?;
    let balances = client
        .get_multiple_token_balances(&query.addresses(), &address)
        .await?;
    Ok(success_response(balances))
}

#[get("/bridge/{l1_chain_id}/wallets/{address}/balances")]
pub async fn get_bridge_balances(
    path: web::Path<(u64, String)>,
    query: web::Query<TokensQuery>,
) -> Result<HttpResponse, CustomError> {
    let (l1_chain_id, address) = path.into_inner();
    let bridge = BridgeClient::for_bridge(l1_chain_id).await?;
    let balances = bridge.balances(&address, &query.addresses()).await?;
    Ok(success_response(balances))
}

/// Fetch the selected asset's balance and build its selection from
/// chain metadata.
async fn resolve_selected_asset(
    client: &BlockchainClient,
    wallet_address: &str,
    token_address: Option<&str>,
) -> Result<(U256, AssetSelection, String), CustomError> {
    match token_address {
        Some(token_address) => {
            let token = client
                .get_token_balance(token_address, wallet_address)
                .await?;
            let descriptor = TokenDescriptor {
                address: token.token_address.clone().unwrap_or_default(),
                symbol: token.symbol.clone(),
                decimals: Some(token.decimals),
            };
            Ok((token.balance, AssetSelection::Token(descriptor), token.symbol))
        }
        None => {
            let native = client.get_native_balance(wallet_address).await?;
            Ok((native.balance, AssetSelection::Native, native.symbol))
        }
    }
}

#[post("/transfer/max-amount")]
pub async fn max_amount(
    request: web::Json<MaxAmountRequest>,
) -> Result<HttpResponse, CustomError> {
    let request = request.into_inner();
    let client = BlockchainClient::new(request.chain_id).await?;

    let (balance, asset, symbol) = resolve_selected_asset(
        &client,
        &request.wallet_address,
        request.token_address.as_deref(),
    )
    .await?;
    let balance = BalanceState::Available(balance);

    let decimals = asset.decimals();
    let response = match compute_max_amount(balance, &asset, &client).await? {
        Some(MaxAmountOutcome::Amount(amount)) => MaxAmountResponse {
            amount: Some(amount),
            insufficient_for_gas: false,
            symbol,
            decimals,
        },
        Some(MaxAmountOutcome::InsufficientForGas) => MaxAmountResponse {
            // clamped: nothing is spendable once gas is reserved
            amount: Some("0.0".to_string()),
            insufficient_for_gas: true,
            symbol,
            decimals,
        },
        None => MaxAmountResponse {
            amount: None,
            insufficient_for_gas: false,
            symbol,
            decimals,
        },
    };

    Ok(success_response(response))
}

#[post("/transfer/validate-amount")]
pub async fn validate_amount(
    request: web::Json<ValidateAmountRequest>,
) -> Result<HttpResponse, CustomError> {
    let request = request.into_inner();
    let client = BlockchainClient::new(request.chain_id).await?;

    let (balance, asset, symbol) = resolve_selected_asset(
        &client,
        &request.wallet_address,
        request.token_address.as_deref(),
    )
    .await?;

    let response = match validate_transfer_amount(&request.amount, balance, &asset) {
        Ok(_) => ValidateAmountResponse {
            valid: true,
            insufficient_funds: false,
            symbol,
        },
        Err(CustomError::InsufficientFundsError) => ValidateAmountResponse {
            valid: false,
            insufficient_funds: true,
            symbol,
        },
        Err(CustomError::InvalidAmountError(_)) => ValidateAmountResponse {
            valid: false,
            insufficient_funds: false,
            symbol,
        },
        Err(e) => return Err(e),
    };

    Ok(success_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_query_splits_and_trims() {
        let query = TokensQuery {
            tokens: Some("0xaaa, 0xbbb,,0xccc ".to_string()),
        };
        assert_eq!(query.addresses(), vec!["0xaaa", "0xbbb", "0xccc"]);

        let empty = TokensQuery { tokens: None };
        assert!(empty.addresses().is_empty());
    }
}
