#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, panic_with_error, token, Address, Bytes, Env,
};

mod events;
mod ledger;
mod oracle;
mod storage;
mod types;

#[cfg(test)]
mod test_oracle;

pub use events::{Funded, Initialized, Withdrawn};
pub use oracle::{PriceFeed, PriceFeedClient, MAX_PRICE_AGE, NATIVE_DECIMALS, USD_DECIMALS};
pub use types::{DataKey, PriceData};

/// Minimum deposit value: 5 USD at `USD_DECIMALS` precision.
pub const MINIMUM_USD: i128 = 5 * 10i128.pow(USD_DECIMALS);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Deposit is worth less than `MINIMUM_USD` at the current price.
    InsufficientAmount = 1,
    /// Only the owner may withdraw.
    NotOwner = 2,
    /// The payout to the owner was rejected.
    TransferFailed = 3,
    /// The price feed failed, or returned a non-positive or stale answer.
    OracleUnavailable = 4,
    Overflow = 5,
    IndexOutOfRange = 6,
    /// Called while a withdrawal is paying out.
    Locked = 7,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// Bind the owner, the price feed and the native-currency token.
    ///
    /// All three are immutable for the lifetime of the contract.
    pub fn __constructor(env: Env, owner: Address, price_feed: Address, native_token: Address) {
        storage::init_config(&env, &owner, &price_feed, &native_token);
        events::emit_initialized(&env, owner, price_feed, native_token);
    }

    /// Deposit `amount` stroops of the native currency.
    ///
    /// - `funder` must authorize the call and the token transfer.
    /// - The deposit must be worth at least `MINIMUM_USD` at the feed's
    ///   current price, otherwise the call fails with `InsufficientAmount`
    ///   and nothing is transferred.
    pub fn fund(env: Env, funder: Address, amount: i128) {
        funder.require_auth();
        accept_funds(&env, &funder, amount);
    }

    /// Plain transfer entry point: a transfer with empty or unrecognised
    /// call data. `_data` is ignored and the deposit follows `fund` exactly.
    pub fn receive(env: Env, funder: Address, amount: i128, _data: Bytes) {
        funder.require_auth();
        accept_funds(&env, &funder, amount);
    }

    /// Pay the contract's entire native balance to the owner and clear the
    /// ledger.
    ///
    /// The balance is captured and the ledger cleared before the payout.
    /// The Soroban host rejects any call back into this contract while the
    /// transfer runs, so a recipient that tries to re-enter fails the payout
    /// with `TransferFailed`; the withdrawal lock (`Locked`) is a second guard
    /// behind the host. If the owner cannot accept the payout the call fails
    /// with `TransferFailed` and the reset is rolled back with it.
    ///
    /// Clearing the ledger starts a new epoch, so the cost of a withdrawal does
    /// not depend on how many funders there were.
    ///
    /// Returns the amount paid out. Withdrawing an empty contract pays out 0.
    pub fn withdraw(env: Env, caller: Address) -> i128 {
        caller.require_auth();

        let owner = storage::get_owner(&env);
        if caller != owner {
            panic_with_error!(&env, Error::NotOwner);
        }
        storage::require_unlocked(&env);

        let token_client = token::Client::new(&env, &storage::get_native_token(&env));
        let contract = env.current_contract_address();
        let amount = token_client.balance(&contract);

        storage::set_locked(&env, true);
        let cleared = ledger::reset(&env);

        if amount > 0 {
            match token_client.try_transfer(&contract, &owner, &amount) {
                Ok(Ok(())) => {}
                _ => {
                    log!(&env, "payout rejected", owner, amount);
                    panic_with_error!(&env, Error::TransferFailed);
                }
            }
        }

        storage::set_locked(&env, false);
        events::emit_withdrawn(&env, owner, amount, cleared);
        amount
    }

    /// Current USD value of `native_amount` stroops, at `USD_DECIMALS`.
    pub fn convert_to_usd(env: Env, native_amount: i128) -> i128 {
        oracle::convert_to_usd(&env, native_amount)
    }

    /// Amount funded by `funder` since the last withdrawal. 0 if unknown.
    pub fn get_amount(env: Env, funder: Address) -> i128 {
        ledger::get_amount(&env, &funder)
    }

    /// Funder at `index` in first-contribution order.
    ///
    /// Panics with `IndexOutOfRange` past the end.
    pub fn get_contributor_at(env: Env, index: u32) -> Address {
        ledger::get_contributor_at(&env, index)
    }

    /// Number of distinct funders since the last withdrawal.
    pub fn get_funder_count(env: Env) -> u32 {
        ledger::funder_count(&env)
    }

    /// Sum of all contributions recorded since the last withdrawal.
    pub fn get_total_funded(env: Env) -> i128 {
        storage::get_total_funded(&env)
    }

    /// The only address allowed to withdraw. Fixed at construction.
    pub fn get_owner(env: Env) -> Address {
        storage::get_owner(&env)
    }

    /// Price-feed contract used for every USD conversion.
    pub fn get_price_feed(env: Env) -> Address {
        storage::get_price_feed(&env)
    }

    /// Token contract of the native currency accepted by `fund` and `receive`.
    pub fn get_native_token(env: Env) -> Address {
        storage::get_native_token(&env)
    }

    /// Smallest accepted deposit value, in USD at `USD_DECIMALS`.
    pub fn get_minimum_usd(_env: Env) -> i128 {
        MINIMUM_USD
    }
}

/// Shared deposit path for `fund` and `receive`. Caller auth is already
/// checked.
fn accept_funds(env: &Env, funder: &Address, amount: i128) {
    storage::require_unlocked(env);

    let usd_value = oracle::convert_to_usd(env, amount);
    if usd_value < MINIMUM_USD {
        log!(env, "Less than 5U", funder.clone(), amount, usd_value);
        panic_with_error!(env, Error::InsufficientAmount);
    }

    let token_client = token::Client::new(env, &storage::get_native_token(env));
    token_client.transfer(funder, &env.current_contract_address(), &amount);

    let total = ledger::record_contribution(env, funder, amount);
    events::emit_funded(env, funder.clone(), amount, usd_value, total);
}
