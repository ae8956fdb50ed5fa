use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use ethers::types::U256;
use log::{debug, warn};

use crate::errors::CustomError;
use crate::models::balance::BalanceState;
use crate::models::token::{AssetSelection, NATIVE_DECIMALS};
use crate::units::{format_units, parse_units};

/// Source of the current gas price, in native smallest units. Each
/// call fetches a fresh value; nothing is cached or retried here.
#[async_trait]
pub trait GasPriceSource: Send + Sync {
    async fn gas_price(&self) -> Result<U256, CustomError>;
}

/// A max-amount computation that produced a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaxAmountOutcome {
    /// Human-readable decimal amount safe to place in the field.
    Amount(String),
    /// The gas reservation exceeds the native balance. The spendable
    /// amount is clamped to zero; a negative amount is never emitted.
    InsufficientForGas,
}

/// Compute the largest amount the user may enter without exceeding
/// their balance, reserving gas when the native currency itself is
/// being moved.
///
/// Returns `Ok(None)` when the balance is not yet known or the gas
/// price could not be fetched. Both are recoverable: the caller's
/// field is left untouched and a later trigger recomputes.
pub async fn compute_max_amount(
    balance: BalanceState,
    asset: &AssetSelection,
    gas: &dyn GasPriceSource,
) -> Result<Option<MaxAmountOutcome>, CustomError> {
    let balance = match balance {
        BalanceState::Available(value) => value,
        BalanceState::Unavailable => return Ok(None),
    };

    // A token transfer pays its gas from the separate native balance,
    // so the full token balance is spendable.
    if let AssetSelection::Token(token) = asset {
        let amount = format_units(balance, token.display_decimals())?;
        return Ok(Some(MaxAmountOutcome::Amount(amount)));
    }

    let gas_price = match gas.gas_price().await {
        Ok(price) => price,
        Err(e) => {
            warn!("gas price unavailable, leaving amount unchanged: {}", e);
            return Ok(None);
        }
    };
    debug!("reserving {} wei for gas", gas_price);

    match balance.checked_sub(gas_price) {
        Some(adjusted) => Ok(Some(MaxAmountOutcome::Amount(format_units(
            adjusted,
            NATIVE_DECIMALS,
        )?))),
        None => Ok(Some(MaxAmountOutcome::InsufficientForGas)),
    }
}

/// Validate a user-entered transfer amount against a known balance.
///
/// Returns the amount in smallest units. Zero and malformed amounts
/// are invalid; an amount above the balance is insufficient funds.
pub fn validate_transfer_amount(
    amount: &str,
    balance: U256,
    asset: &AssetSelection,
) -> Result<U256, CustomError> {
    let parsed = parse_units(amount, asset.decimals())?;
    if parsed.is_zero() {
        return Err(CustomError::InvalidAmountError(amount.to_string()));
    }
    if parsed > balance {
        return Err(CustomError::InsufficientFundsError);
    }
    Ok(parsed)
}

/// The transfer-amount field as seen by asynchronous fillers.
///
/// User edits bump the generation, so a computation that started
/// before the edit presents a stale generation when it completes and
/// is discarded instead of overwriting newer input.
#[derive(Debug, Default)]
pub struct AmountField {
    generation: AtomicU64,
    value: Mutex<Option<String>>,
}

impl AmountField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an asynchronous fill against the field's current state.
    /// The returned generation must be presented to [`complete`].
    ///
    /// [`complete`]: AmountField::complete
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a user edit, invalidating any in-flight fill.
    pub fn set_user_input(&self, amount: String) {
        let mut value = self.value.lock().unwrap();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *value = Some(amount);
    }

    /// Apply a computed amount unless a newer edit or fill started
    /// after `generation` was issued. Returns whether it applied.
    pub fn complete(&self, generation: u64, amount: String) -> bool {
        let mut value = self.value.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *value = Some(amount);
        true
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::models::token::TokenDescriptor;

    struct FixedGas(U256);

    #[async_trait]
    impl GasPriceSource for FixedGas {
        async fn gas_price(&self) -> Result<U256, CustomError> {
            Ok(self.0)
        }
    }

    struct FailingGas;

    #[async_trait]
    impl GasPriceSource for FailingGas {
        async fn gas_price(&self) -> Result<U256, CustomError> {
            Err(CustomError::NetworkError("rpc unreachable".to_string()))
        }
    }

    struct RecordingGas {
        called: AtomicBool,
    }

    #[async_trait]
    impl GasPriceSource for RecordingGas {
        async fn gas_price(&self) -> Result<U256, CustomError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(U256::from(1u64))
        }
    }

    fn wei(s: &str) -> U256 {
        U256::from_dec_str(s).unwrap()
    }

    fn token(decimals: Option<u8>) -> AssetSelection {
        AssetSelection::Token(TokenDescriptor {
            address: "0x0000000000000000000000000000000000000001".to_string(),
            symbol: "TKN".to_string(),
            decimals,
        })
    }

    #[tokio::test]
    async fn token_balance_is_fully_spendable() {
        let balance = BalanceState::Available(wei("5000000000000000000"));
        let gas = RecordingGas {
            called: AtomicBool::new(false),
        };

        let outcome = compute_max_amount(balance, &token(Some(18)), &gas)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Some(MaxAmountOutcome::Amount("5.0".to_string()))
        );
        // gas is paid in the native currency, so it was never consulted
        assert!(!gas.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn token_without_declared_decimals_formats_at_18() {
        let balance = BalanceState::Available(wei("1000000000000000000"));
        let outcome = compute_max_amount(balance, &token(None), &FailingGas)
            .await
            .unwrap();
        assert_eq!(outcome, Some(MaxAmountOutcome::Amount("1.0".to_string())));
    }

    #[tokio::test]
    async fn native_balance_reserves_gas() {
        let balance = wei("1000000000000000000");
        let gas_price = wei("21000000000000");

        let outcome = compute_max_amount(
            BalanceState::Available(balance),
            &AssetSelection::Native,
            &FixedGas(gas_price),
        )
        .await
        .unwrap();

        let expected = format_units(balance - gas_price, NATIVE_DECIMALS).unwrap();
        assert_eq!(outcome, Some(MaxAmountOutcome::Amount(expected.clone())));

        // the reserved amount plus gas reconstructs the balance exactly
        let reparsed = parse_units(&expected, NATIVE_DECIMALS).unwrap();
        assert_eq!(reparsed + gas_price, balance);
    }

    #[tokio::test]
    async fn unavailable_balance_yields_nothing() {
        for asset in [AssetSelection::Native, token(Some(6))] {
            let outcome =
                compute_max_amount(BalanceState::Unavailable, &asset, &FixedGas(U256::one()))
                    .await
                    .unwrap();
            assert_eq!(outcome, None);
        }
    }

    #[tokio::test]
    async fn gas_fetch_failure_yields_nothing() {
        let balance = BalanceState::Available(wei("1000000000000000000"));
        let outcome = compute_max_amount(balance, &AssetSelection::Native, &FailingGas)
            .await
            .unwrap();
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn gas_above_balance_is_clamped_and_flagged() {
        let balance = BalanceState::Available(wei("20000000000000"));
        let gas = FixedGas(wei("21000000000000"));

        let outcome = compute_max_amount(balance, &AssetSelection::Native, &gas)
            .await
            .unwrap();

        // never a negative amount: the outcome carries no string at all
        assert_eq!(outcome, Some(MaxAmountOutcome::InsufficientForGas));
    }

    #[tokio::test]
    async fn exact_gas_leaves_a_zero_amount() {
        let price = wei("21000000000000");
        let outcome = compute_max_amount(
            BalanceState::Available(price),
            &AssetSelection::Native,
            &FixedGas(price),
        )
        .await
        .unwrap();
        assert_eq!(outcome, Some(MaxAmountOutcome::Amount("0.0".to_string())));
    }

    #[test]
    fn amounts_within_balance_validate() {
        let balance = wei("1000000000000000000");
        let parsed =
            validate_transfer_amount("0.5", balance, &AssetSelection::Native).unwrap();
        assert_eq!(parsed, wei("500000000000000000"));

        // spending the entire balance is allowed
        assert_eq!(
            validate_transfer_amount("1.0", balance, &AssetSelection::Native).unwrap(),
            balance
        );
    }

    #[test]
    fn amounts_above_balance_are_insufficient() {
        let balance = wei("1000000000000000000");
        assert!(matches!(
            validate_transfer_amount("1.000000000000000001", balance, &AssetSelection::Native),
            Err(CustomError::InsufficientFundsError)
        ));
    }

    #[test]
    fn zero_and_malformed_amounts_are_invalid() {
        let balance = wei("1000000000000000000");
        assert!(matches!(
            validate_transfer_amount("0", balance, &AssetSelection::Native),
            Err(CustomError::InvalidAmountError(_))
        ));
        assert!(matches!(
            validate_transfer_amount("1..0", balance, &AssetSelection::Native),
            Err(CustomError::InvalidAmountError(_))
        ));
    }

    #[test]
    fn validation_respects_token_precision() {
        // 6-decimal token: 7 fractional digits cannot be represented
        let asset = token(Some(6));
        assert!(validate_transfer_amount("0.0000001", wei("1000000"), &asset).is_err());
        assert_eq!(
            validate_transfer_amount("0.5", wei("1000000"), &asset).unwrap(),
            wei("500000")
        );
    }

    #[test]
    fn stale_fill_does_not_overwrite_newer_input() {
        let field = AmountField::new();

        let generation = field.begin();
        field.set_user_input("0.5".to_string());

        assert!(!field.complete(generation, "9.999".to_string()));
        assert_eq!(field.value(), Some("0.5".to_string()));
    }

    #[test]
    fn current_fill_applies() {
        let field = AmountField::new();
        let generation = field.begin();
        assert!(field.complete(generation, "1.0".to_string()));
        assert_eq!(field.value(), Some("1.0".to_string()));
    }

    #[test]
    fn newer_fill_supersedes_older_one() {
        let field = AmountField::new();
        let first = field.begin();
        let second = field.begin();

        assert!(field.complete(second, "2.0".to_string()));
        assert!(!field.complete(first, "1.0".to_string()));
        assert_eq!(field.value(), Some("2.0".to_string()));
    }
}
