use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// An on-chain balance as reported by the data source.
///
/// `Unavailable` means the lookup has not completed or failed; it is a
/// distinct state, never collapsed to zero. Serializes as the raw
/// quantity, or `null` when unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceState {
    Available(U256),
    Unavailable,
}

impl BalanceState {
    pub fn available(self) -> Option<U256> {
        match self {
            BalanceState::Available(value) => Some(value),
            BalanceState::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, BalanceState::Available(_))
    }
}

impl From<Option<U256>> for BalanceState {
    fn from(value: Option<U256>) -> Self {
        match value {
            Some(value) => BalanceState::Available(value),
            None => BalanceState::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_not_zero() {
        assert_ne!(
            BalanceState::Unavailable,
            BalanceState::Available(U256::zero())
        );
        assert!(BalanceState::Unavailable.available().is_none());
    }

    #[test]
    fn serializes_as_quantity_or_null() {
        let available = BalanceState::Available(U256::from(1u64));
        assert_eq!(serde_json::to_value(available).unwrap(), "0x1");
        assert_eq!(
            serde_json::to_value(BalanceState::Unavailable).unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn deserializes_null_as_unavailable() {
        let state: BalanceState = serde_json::from_str("null").unwrap();
        assert_eq!(state, BalanceState::Unavailable);
        let state: BalanceState = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(state, BalanceState::Available(U256::from(42u64)));
    }
}
