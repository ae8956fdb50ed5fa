use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// Decimal precision of every supported chain's native currency.
pub const NATIVE_DECIMALS: u32 = 18;

/// A fungible token chosen for transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: String,
    pub symbol: String,
    /// Precision reported by the token contract. Registry entries that
    /// never published one are treated as 18.
    pub decimals: Option<u8>,
}

impl TokenDescriptor {
    pub fn display_decimals(&self) -> u32 {
        u32::from(self.decimals.unwrap_or(18))
    }
}

/// The asset being moved: the chain's native currency, or a token.
///
/// Native transfers pay their own gas out of the same balance; token
/// transfers pay gas from the separate native balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetSelection {
    Native,
    Token(TokenDescriptor),
}

impl AssetSelection {
    pub fn decimals(&self) -> u32 {
        match self {
            AssetSelection::Native => NATIVE_DECIMALS,
            AssetSelection::Token(token) => token.display_decimals(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetSelection::Native)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token_address: Option<String>, // None for native token
    pub symbol: String,
    pub balance: U256,
    pub decimals: u8,
    pub formatted_balance: String,
}
