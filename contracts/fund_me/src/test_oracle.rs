// contracts/fund_me/src/test_oracle.rs
//
// Price-feed boundary tests: live price reads, invalid answers, outages.

extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use mock_price_feed::{MockPriceFeed, MockPriceFeedClient, DECIMALS, INITIAL_ANSWER};

use crate::{Error, FundMe, FundMeClient, MAX_PRICE_AGE};

const ONE_XLM: i128 = 10_000_000;
/// 1 USD per XLM at the mock's 8 decimals.
const ONE_USD_PRICE: i128 = 100_000_000;

fn setup() -> (Env, FundMeClient<'static>, MockPriceFeedClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let feed_admin = Address::generate(&env);
    let feed_id = env.register(MockPriceFeed, (&feed_admin, DECIMALS, INITIAL_ANSWER));
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(FundMe, (&owner, &feed_id, &token));
    (
        env.clone(),
        FundMeClient::new(&env, &contract_id),
        MockPriceFeedClient::new(&env, &feed_id),
        token,
    )
}

fn funder(env: &Env, token: &Address, amount: i128) -> Address {
    let funder = Address::generate(env);
    token::StellarAssetClient::new(env, token).mint(&funder, &amount);
    funder
}

fn oracle_unavailable() -> soroban_sdk::Error {
    Error::OracleUnavailable.into()
}

#[test]
fn test_convert_one_xlm_at_initial_answer() {
    let (_env, client, _, _) = setup();
    // 2000 USD at 7 decimals.
    assert_eq!(client.convert_to_usd(&ONE_XLM), 20_000_000_000);
}

#[test]
fn test_convert_floors() {
    let (_env, client, feed, _) = setup();
    // 0.00000001 USD per XLM: one stroop is worth far less than one USD unit.
    feed.update_answer(&1);
    assert_eq!(client.convert_to_usd(&1), 0);
    assert_eq!(client.convert_to_usd(&(ONE_XLM * 10 - 1)), 0);
    assert_eq!(client.convert_to_usd(&(ONE_XLM * 10)), 1);
}

#[test]
fn test_price_drop_turns_deposit_away() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, 10 * ONE_XLM);

    // 4 XLM is worth 8000 USD at the initial answer.
    client.fund(&donor, &(4 * ONE_XLM));

    // At 1 USD per XLM the same deposit is worth 4 USD.
    feed.update_answer(&ONE_USD_PRICE);
    let result = client.try_fund(&donor, &(4 * ONE_XLM));
    assert_eq!(result, Err(Ok(Error::InsufficientAmount.into())));
    assert_eq!(client.get_amount(&donor), 4 * ONE_XLM);

    // 5 XLM is worth exactly the 5 USD minimum.
    client.fund(&donor, &(5 * ONE_XLM));
    assert_eq!(client.get_amount(&donor), 9 * ONE_XLM);
}

#[test]
fn test_price_rise_lets_small_deposit_in() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, ONE_XLM);
    let small = 10_000;

    assert!(client.try_fund(&donor, &small).is_err());

    // 10_000 stroops at 5000 USD per XLM is 5 USD.
    feed.update_answer(&500_000_000_000);
    client.fund(&donor, &small);
    assert_eq!(client.get_amount(&donor), small);
}

#[test]
fn test_halted_feed_is_unavailable() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, ONE_XLM);

    feed.set_halted(&true);

    assert_eq!(client.try_fund(&donor, &ONE_XLM), Err(Ok(oracle_unavailable())));
    assert_eq!(
        client.try_convert_to_usd(&ONE_XLM),
        Err(Ok(oracle_unavailable()))
    );
    assert_eq!(client.get_amount(&donor), 0);
    assert_eq!(token::Client::new(&env, &token).balance(&donor), ONE_XLM);

    feed.set_halted(&false);
    client.fund(&donor, &ONE_XLM);
    assert_eq!(client.get_amount(&donor), ONE_XLM);
}

#[test]
fn test_zero_price_is_unavailable() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, ONE_XLM);

    feed.update_answer(&0);
    assert_eq!(client.try_fund(&donor, &ONE_XLM), Err(Ok(oracle_unavailable())));
}

#[test]
fn test_negative_price_is_unavailable() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, ONE_XLM);

    feed.update_answer(&-ONE_USD_PRICE);
    assert_eq!(client.try_fund(&donor, &ONE_XLM), Err(Ok(oracle_unavailable())));
}

#[test]
fn test_stale_price_is_unavailable() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, 2 * ONE_XLM);

    env.ledger().set_timestamp(MAX_PRICE_AGE);
    client.fund(&donor, &ONE_XLM);

    env.ledger().set_timestamp(MAX_PRICE_AGE + 1);
    assert_eq!(client.try_fund(&donor, &ONE_XLM), Err(Ok(oracle_unavailable())));

    feed.update_answer(&INITIAL_ANSWER);
    client.fund(&donor, &ONE_XLM);
    assert_eq!(client.get_amount(&donor), 2 * ONE_XLM);
}

#[test]
fn test_oracle_failure_does_not_block_withdraw() {
    let (env, client, feed, token) = setup();
    let donor = funder(&env, &token, ONE_XLM);
    client.fund(&donor, &ONE_XLM);

    feed.set_halted(&true);

    let owner = client.get_owner();
    assert_eq!(client.withdraw(&owner), ONE_XLM);
    assert_eq!(client.get_amount(&donor), 0);
}
