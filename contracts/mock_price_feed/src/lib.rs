#![no_std]

//! Mock price feed for local deployments.
//!
//! Serves a fixed answer with a configurable number of decimals, in the shape
//! FundMe expects from a live aggregator. The admin can move the price and
//! halt the feed to simulate an oracle outage.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, Address,
    Env,
};


/// Decimals used by the local deployment.
pub const DECIMALS: u32 = 8;
/// 2000 USD per unit at 8 decimals.
pub const INITIAL_ANSWER: i128 = 200_000_000_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockFeedError {
    FeedHalted = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub decimals: u32,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Decimals,
    Answer,
    UpdatedAt,
    Round,
    Halted,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn __constructor(env: Env, admin: Address, decimals: u32, initial_answer: i128) {
        let store = env.storage().instance();
        store.set(&DataKey::Admin, &admin);
        store.set(&DataKey::Decimals, &decimals);
        store.set(&DataKey::Halted, &false);
        store.set(&DataKey::Round, &0u64);
        write_answer(&env, initial_answer);
    }

    /// Latest answer. Panics with `FeedHalted` while the feed is halted.
    pub fn latest_price(env: Env) -> PriceData {
        let store = env.storage().instance();
        if store.get(&DataKey::Halted).unwrap_or(false) {
            panic_with_error!(&env, MockFeedError::FeedHalted);
        }
        PriceData {
            price: store.get(&DataKey::Answer).unwrap_or(0),
            decimals: store.get(&DataKey::Decimals).unwrap_or(DECIMALS),
            updated_at: store.get(&DataKey::UpdatedAt).unwrap_or(0),
        }
    }

    /// Store a new answer. Any value is accepted, including zero and
    /// negative prices.
    pub fn update_answer(env: Env, price: i128) {
        read_admin(&env).require_auth();
        write_answer(&env, price);
        env.events().publish((symbol_short!("answer"),), price);
    }

    pub fn set_halted(env: Env, halted: bool) {
        read_admin(&env).require_auth();
        env.storage().instance().set(&DataKey::Halted, &halted);
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .unwrap_or(DECIMALS)
    }

    pub fn latest_round(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::Round).unwrap_or(0)
    }

    pub fn admin(env: Env) -> Address {
        read_admin(&env)
    }
}

fn read_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic!("admin not set"))
}

fn write_answer(env: &Env, price: i128) {
    let store = env.storage().instance();
    let round: u64 = store.get(&DataKey::Round).unwrap_or(0);
    store.set(&DataKey::Answer, &price);
    store.set(&DataKey::UpdatedAt, &env.ledger().timestamp());
    store.set(&DataKey::Round, &(round + 1));
}
