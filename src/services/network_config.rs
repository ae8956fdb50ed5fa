use crate::{errors::CustomError, models::network_config::NetworkConfig};

/// Get network configuration based on chain ID
pub fn get_network_config(chain_id: u64) -> Result<NetworkConfig, CustomError> {
    match chain_id {
        1 => Ok(NetworkConfig {
            chain_id: 1,
            name: "Ethereum Mainnet".to_string(),
            rpc_url: "https://eth-mainnet.g.alchemy.com/v2/YOUR-API-KEY".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://etherscan.io".to_string(),
            bridge_partner: Some(42161),
        }),
        42161 => Ok(NetworkConfig {
            chain_id: 42161,
            name: "Arbitrum One".to_string(),
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://arbiscan.io".to_string(),
            bridge_partner: Some(1),
        }),
        5 => Ok(NetworkConfig {
            chain_id: 5,
            name: "Goerli Testnet".to_string(),
            rpc_url: "https://eth-goerli.g.alchemy.com/v2/YOUR-API-KEY".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://goerli.etherscan.io".to_string(),
            bridge_partner: Some(421613),
        }),
        421613 => Ok(NetworkConfig {
            chain_id: 421613,
            name: "Arbitrum Goerli".to_string(),
            rpc_url: "https://goerli-rollup.arbitrum.io/rpc".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://goerli.arbiscan.io".to_string(),
            bridge_partner: Some(5),
        }),
        137 => Ok(NetworkConfig {
            chain_id: 137,
            name: "Polygon Mainnet".to_string(),
            rpc_url: "https://polygon-rpc.com".to_string(),
            symbol: "MATIC".to_string(),
            block_explorer: "https://polygonscan.com".to_string(),
            bridge_partner: None,
        }),
        // Add more networks as needed
        _ => Err(CustomError::UnsupportedChainError(chain_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chains_resolve() {
        let config = get_network_config(1).unwrap();
        assert_eq!(config.name, "Ethereum Mainnet");
        assert_eq!(config.symbol, "ETH");
    }

    #[test]
    fn bridge_pairs_point_at_each_other() {
        let l1 = get_network_config(5).unwrap();
        let l2 = get_network_config(421613).unwrap();
        assert_eq!(l1.bridge_partner, Some(l2.chain_id));
        assert_eq!(l2.bridge_partner, Some(l1.chain_id));
    }

    #[test]
    fn unknown_chains_are_rejected() {
        assert!(matches!(
            get_network_config(9999),
            Err(CustomError::UnsupportedChainError(9999))
        ));
    }
}
