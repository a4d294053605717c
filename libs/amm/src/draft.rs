//! Transaction drafts: a quote paired with the sender and destination vault
//!
//! A draft is what the transaction collaborator needs besides the memo text.
//! Building one applies the wallet and pool-address guards, so a draft that
//! exists can always be signed and sent somewhere.

use crate::errors::GuardError;
use crate::guards;
use crate::stake::LiquidityAddQuote;
use crate::swap::SwapQuote;
use crate::withdraw::LiquidityWithdrawQuote;
use hubswap_types::{AssetSymbol, PoolSnapshots};

/// Quote that can be turned into a transaction
pub trait DraftableQuote {
    /// Asset whose pool receives the transaction
    fn deposit_asset(&self) -> &AssetSymbol;

    /// Destination resolved by the quote itself, if it carries one
    fn resolved_address(&self) -> Option<&str>;
}

impl DraftableQuote for SwapQuote {
    fn deposit_asset(&self) -> &AssetSymbol {
        &self.source_asset
    }

    fn resolved_address(&self) -> Option<&str> {
        self.route_pool_addresses.first().map(String::as_str)
    }
}

impl DraftableQuote for LiquidityAddQuote {
    fn deposit_asset(&self) -> &AssetSymbol {
        &self.asset
    }

    fn resolved_address(&self) -> Option<&str> {
        Some(&self.pool_address)
    }
}

impl DraftableQuote for LiquidityWithdrawQuote {
    fn deposit_asset(&self) -> &AssetSymbol {
        &self.asset
    }

    fn resolved_address(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft<Q> {
    pub sender: String,
    pub pool_address: String,
    pub quote: Q,
}

impl<Q: DraftableQuote> TransactionDraft<Q> {
    /// Pair `quote` with its sender and destination
    ///
    /// Fails with `MissingWallet` when no sender is connected and with
    /// `MissingPoolAddress` when neither the quote nor the snapshot knows
    /// where to send the transaction.
    pub fn prepare(
        sender: Option<&str>,
        quote: Q,
        pools: &PoolSnapshots,
    ) -> Result<Self, GuardError> {
        let sender = guards::require_sender(sender)?.to_string();
        let pool_address = match quote.resolved_address() {
            Some(address) => address.to_string(),
            None => guards::require_pool_address(pools, quote.deposit_asset())?.to_string(),
        };

        Ok(Self {
            sender,
            pool_address,
            quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubswap_types::{FixedPointAmount, Percent};

    fn withdraw_quote() -> LiquidityWithdrawQuote {
        LiquidityWithdrawQuote {
            asset: "BNB".into(),
            withdraw_percent: Percent::ONE_HUNDRED,
            rune_amount_returned: FixedPointAmount::ONE,
            asset_amount_returned: FixedPointAmount::ONE,
        }
    }

    #[test]
    fn test_prepare_resolves_vault() {
        let pools = PoolSnapshots::new(Some("tbnb1vault".to_string()));
        let draft = TransactionDraft::prepare(Some("tbnb1sender"), withdraw_quote(), &pools).unwrap();
        assert_eq!(draft.sender, "tbnb1sender");
        assert_eq!(draft.pool_address, "tbnb1vault");
    }

    #[test]
    fn test_prepare_requires_wallet() {
        let pools = PoolSnapshots::new(Some("tbnb1vault".to_string()));
        assert_eq!(
            TransactionDraft::prepare(None, withdraw_quote(), &pools).unwrap_err(),
            GuardError::MissingWallet
        );
    }

    #[test]
    fn test_prepare_requires_address() {
        let pools = PoolSnapshots::new(None);
        assert_eq!(
            TransactionDraft::prepare(Some("tbnb1sender"), withdraw_quote(), &pools).unwrap_err(),
            GuardError::MissingPoolAddress { asset: "BNB".into() }
        );
    }
}
