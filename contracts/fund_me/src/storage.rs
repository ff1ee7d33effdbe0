// contracts/fund_me/src/storage.rs
//
// Storage helpers for FundMe.
//
//   - Instance entries: Owner, PriceFeed, NativeToken, TotalFunded, Locked, Epoch
//   - Persistent entries, per epoch:
//       AmountFunded(epoch, address) → i128
//       Funder(epoch, index)         → Address
//       FunderCount(epoch)           → u32
//
// Entries of past epochs are never read again and are left to expire.
// Every write extends the TTL of the entry it touched.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::{types::DataKey, Error};

/// Bump amount for storage entries (roughly 30 days in ledgers).
const LEDGER_BUMP: u32 = 518_400;
/// Threshold for bumping (roughly 15 days).
const LEDGER_THRESHOLD: u32 = 259_200;

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD, LEDGER_BUMP);
}

// ─────────────────────────────────────────────────────────
// Immutable configuration
// ─────────────────────────────────────────────────────────

/// Write the constructor-time references. Called exactly once.
pub fn init_config(env: &Env, owner: &Address, price_feed: &Address, native_token: &Address) {
    let store = env.storage().instance();
    store.set(&DataKey::Owner, owner);
    store.set(&DataKey::PriceFeed, price_feed);
    store.set(&DataKey::NativeToken, native_token);
    store.set(&DataKey::TotalFunded, &0i128);
    store.set(&DataKey::Locked, &false);
    store.set(&DataKey::Epoch, &0u32);
    bump_instance(env);
}

fn read_address(env: &Env, key: &DataKey) -> Address {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic!("contract not constructed"))
}

pub fn get_owner(env: &Env) -> Address {
    read_address(env, &DataKey::Owner)
}

pub fn get_price_feed(env: &Env) -> Address {
    read_address(env, &DataKey::PriceFeed)
}

pub fn get_native_token(env: &Env) -> Address {
    read_address(env, &DataKey::NativeToken)
}

// ─────────────────────────────────────────────────────────
// Running total
// ─────────────────────────────────────────────────────────

pub fn get_total_funded(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalFunded)
        .unwrap_or(0)
}

pub fn set_total_funded(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalFunded, &total);
    bump_instance(env);
}

// ─────────────────────────────────────────────────────────
// Withdrawal lock
// ─────────────────────────────────────────────────────────

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage().instance().set(&DataKey::Locked, &locked);
}

/// Panic with `Error::Locked` if a withdrawal is in flight.
pub fn require_unlocked(env: &Env) {
    if is_locked(env) {
        panic_with_error!(env, Error::Locked);
    }
}

// ─────────────────────────────────────────────────────────
// Epoch
// ─────────────────────────────────────────────────────────

pub fn get_epoch(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Epoch).unwrap_or(0)
}

pub fn set_epoch(env: &Env, epoch: u32) {
    env.storage().instance().set(&DataKey::Epoch, &epoch);
    bump_instance(env);
}

// ─────────────────────────────────────────────────────────
// Per-funder amounts
// ─────────────────────────────────────────────────────────

/// Amount funded by `funder` during `epoch`; 0 if never seen.
pub fn get_amount_funded(env: &Env, epoch: u32, funder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AmountFunded(epoch, funder.clone()))
        .unwrap_or(0)
}

pub fn set_amount_funded(env: &Env, epoch: u32, funder: &Address, amount: i128) {
    let key = DataKey::AmountFunded(epoch, funder.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

// ─────────────────────────────────────────────────────────
// Funder index
// ─────────────────────────────────────────────────────────

pub fn get_funder_count(env: &Env, epoch: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::FunderCount(epoch))
        .unwrap_or(0)
}

pub fn get_funder(env: &Env, epoch: u32, index: u32) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Funder(epoch, index))
}

/// Append `funder` at position `index` and bump the count to `index + 1`.
pub fn push_funder(env: &Env, epoch: u32, index: u32, funder: &Address) {
    let store = env.storage().persistent();
    let slot = DataKey::Funder(epoch, index);
    let count = DataKey::FunderCount(epoch);
    store.set(&slot, funder);
    store.set(&count, &(index + 1));
    store.extend_ttl(&slot, LEDGER_THRESHOLD, LEDGER_BUMP);
    store.extend_ttl(&count, LEDGER_THRESHOLD, LEDGER_BUMP);
}
