use chrono::{DateTime, Utc};
use ethers::types::U256;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NetworkStatus {
    pub chain_id: u64,
    pub name: String,
    pub latest_block: u64,
    /// Current gas price in native smallest units. Only valid at
    /// `fetched_at`; never cached.
    pub gas_price: U256,
    pub fetched_at: DateTime<Utc>,
    pub symbol: String,
    pub block_explorer: String,
}
