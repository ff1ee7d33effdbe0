// contracts/fund_me/src/types.rs
//
// Storage keys and the price-feed payload.
//
// Instance storage holds the small, always-read entries (owner, feed, token,
// running total, withdrawal lock, epoch). Per-funder amounts and the funder
// index live in persistent storage, one entry per funder and keyed by epoch,
// so no entry grows with the number of donations and a reset only has to
// move to the next epoch.

use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable owner set by the constructor.
    Owner,
    /// Immutable price-feed contract address.
    PriceFeed,
    /// Immutable native-currency token contract address.
    NativeToken,
    /// Sum of all recorded contributions since the last withdrawal.
    TotalFunded,
    /// Set while a withdrawal is paying out.
    Locked,
    /// Ledger generation; bumped by every withdrawal.
    Epoch,
    /// Cumulative amount funded by an address during an epoch.
    AmountFunded(u32, Address),
    /// Funder at a position in first-contribution order during an epoch.
    Funder(u32, u32),
    /// Number of distinct funders during an epoch.
    FunderCount(u32),
}

/// Answer returned by a price feed's `latest_price`.
///
/// `price` is the value of one whole unit of the native currency in USD,
/// scaled by `10^decimals`. `updated_at` is the ledger timestamp of the
/// feed's last update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub decimals: u32,
    pub updated_at: u64,
}
