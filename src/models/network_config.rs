use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub symbol: String,
    pub block_explorer: String,
    /// Chain id of the other side of the bridge, when this chain is
    /// part of a configured L1/L2 pair.
    pub bridge_partner: Option<u64>,
}
