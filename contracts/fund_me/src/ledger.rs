// contracts/fund_me/src/ledger.rs
//
// Funding ledger: per-funder cumulative amounts plus the ordered funder index,
// both scoped to the current epoch.
//
// Invariants within an epoch:
//   - an address has a nonzero amount iff it appears exactly once in the index
//   - TotalFunded == sum of all per-funder amounts
//
// Resetting starts a new, empty epoch; its cost does not depend on how many
// funders the old epoch had.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::{storage, Error};

/// Add `amount` to `funder`'s running total, appending the funder to the
/// index on their first contribution since the last reset.
///
/// Returns the new running total across all funders.
pub fn record_contribution(env: &Env, funder: &Address, amount: i128) -> i128 {
    let epoch = storage::get_epoch(env);
    let previous = storage::get_amount_funded(env, epoch, funder);
    let updated = previous
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    let total = storage::get_total_funded(env)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));

    if previous == 0 {
        let index = storage::get_funder_count(env, epoch);
        storage::push_funder(env, epoch, index, funder);
    }

    storage::set_amount_funded(env, epoch, funder, updated);
    storage::set_total_funded(env, total);
    total
}

pub fn get_amount(env: &Env, funder: &Address) -> i128 {
    storage::get_amount_funded(env, storage::get_epoch(env), funder)
}

/// Funder at position `index` in first-contribution order.
pub fn get_contributor_at(env: &Env, index: u32) -> Address {
    storage::get_funder(env, storage::get_epoch(env), index)
        .unwrap_or_else(|| panic_with_error!(env, Error::IndexOutOfRange))
}

pub fn funder_count(env: &Env) -> u32 {
    storage::get_funder_count(env, storage::get_epoch(env))
}

/// Start a new epoch: every amount reads 0, the index is empty and the
/// running total is zeroed.
///
/// Returns how many funders the closed epoch had.
pub(crate) fn reset(env: &Env) -> u32 {
    let epoch = storage::get_epoch(env);
    let cleared = storage::get_funder_count(env, epoch);
    let next = epoch
        .checked_add(1)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    storage::set_epoch(env, next);
    storage::set_total_funded(env, 0);
    cleared
}
