// contracts/fund_me/src/oracle.rs
//
// Price-feed boundary. The feed address is bound at construction; every
// conversion reads the feed's current answer, nothing is cached.

use soroban_sdk::{contractclient, log, panic_with_error, Env};

use crate::{storage, types::PriceData, Error};

/// Decimals of the native currency (stroops per XLM).
pub const NATIVE_DECIMALS: u32 = 7;
/// Decimals of the USD values produced by `convert_to_usd`.
pub const USD_DECIMALS: u32 = 7;
/// Answers older than this many seconds are rejected.
pub const MAX_PRICE_AGE: u64 = 3_600;

/// Interface every bound price feed must expose.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> PriceData;
}

/// Convert `native_amount` stroops to USD at `USD_DECIMALS` precision using
/// the feed's current answer.
///
/// Panics with `Error::OracleUnavailable` if the feed call fails, the price is
/// not positive, or the answer is stale.
pub fn convert_to_usd(env: &Env, native_amount: i128) -> i128 {
    let data = latest_price(env);
    let usd = scale_to_usd(native_amount, data.price, data.decimals)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    log!(env, "convert_to_usd", native_amount, data.price, usd);
    usd
}

fn latest_price(env: &Env) -> PriceData {
    let feed = storage::get_price_feed(env);
    let data = match PriceFeedClient::new(env, &feed).try_latest_price() {
        Ok(Ok(data)) => data,
        _ => {
            log!(env, "price feed call failed", feed);
            panic_with_error!(env, Error::OracleUnavailable)
        }
    };

    if data.price <= 0 {
        log!(env, "non-positive price", data.price);
        panic_with_error!(env, Error::OracleUnavailable);
    }

    let now = env.ledger().timestamp();
    let fresh = data.updated_at <= now && now - data.updated_at <= MAX_PRICE_AGE;
    if !fresh {
        log!(env, "stale price", data.updated_at, now);
        panic_with_error!(env, Error::OracleUnavailable);
    }

    data
}

/// `native_amount * price / 10^(NATIVE_DECIMALS + feed_decimals - USD_DECIMALS)`,
/// floored. A negative exponent multiplies instead.
///
/// Returns `None` on overflow.
pub fn scale_to_usd(native_amount: i128, price: i128, feed_decimals: u32) -> Option<i128> {
    let product = native_amount.checked_mul(price)?;
    let scale_up = NATIVE_DECIMALS.saturating_add(feed_decimals);

    if scale_up >= USD_DECIMALS {
        match 10i128.checked_pow(scale_up - USD_DECIMALS) {
            Some(divisor) => Some(product.div_euclid(divisor)),
            // 10^39 and above exceed any i128, so the quotient floors to 0 or -1.
            None => Some(if product < 0 { -1 } else { 0 }),
        }
    } else {
        product.checked_mul(10i128.checked_pow(USD_DECIMALS - scale_up)?)
    }
}
