use serde::{Deserialize, Serialize};

use super::balance::BalanceState;
use super::token::AssetSelection;

/// Which side of the bridge a balance or amount field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferSide {
    L1,
    L2,
}

/// Direction funds are moving across the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDirection {
    Deposit,
    Withdraw,
}

impl TransferDirection {
    /// The side funds leave. Only this side's amount field accepts
    /// input.
    pub fn entry_side(self) -> TransferSide {
        match self {
            TransferDirection::Deposit => TransferSide::L1,
            TransferDirection::Withdraw => TransferSide::L2,
        }
    }

    pub fn is_entry_side(self, side: TransferSide) -> bool {
        self.entry_side() == side
    }

    /// The "From"/"To" role a side plays under this direction.
    pub fn side_label(self, side: TransferSide) -> &'static str {
        if self.is_entry_side(side) {
            "From"
        } else {
            "To"
        }
    }
}

/// One asset's balance on each side of the bridge. Either side may be
/// unavailable independently of the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeBalance {
    pub l1: BalanceState,
    pub l2: BalanceState,
}

impl BridgeBalance {
    pub fn on(self, side: TransferSide) -> BalanceState {
        match side {
            TransferSide::L1 => self.l1,
            TransferSide::L2 => self.l2,
        }
    }
}

/// One asset across the bridge, with the metadata needed to display it.
#[derive(Clone, Debug, Serialize)]
pub struct BridgeAssetBalance {
    pub token_address: Option<String>, // None for the native currency
    pub symbol: String,
    pub decimals: u8,
    pub balance: BridgeBalance,
    pub l1_formatted: Option<String>,
    pub l2_formatted: Option<String>,
}

/// Every tracked asset's balances on both sides of the bridge.
#[derive(Debug, Serialize)]
pub struct BridgeBalances {
    pub native: BridgeAssetBalance,
    pub tokens: Vec<BridgeAssetBalance>,
}

impl BridgeBalances {
    /// Look up the selected asset's bridge-wide balance. Tokens are
    /// matched by address, case-insensitively.
    pub fn for_asset(&self, asset: &AssetSelection) -> Option<&BridgeAssetBalance> {
        match asset {
            AssetSelection::Native => Some(&self.native),
            AssetSelection::Token(token) => self.tokens.iter().find(|entry| {
                entry
                    .token_address
                    .as_deref()
                    .is_some_and(|address| address.eq_ignore_ascii_case(&token.address))
            }),
        }
    }
}
