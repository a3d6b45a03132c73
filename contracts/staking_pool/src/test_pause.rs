#![cfg(test)]

use crate::events::{StakingPausedEvent, StakingResumedEvent};
use crate::{ContractError, StakingPoolContract, StakingPoolContractClient};
use common::authorization::{LIMIT_CONTROL, PAUSE_CONTROL};
use common::testutils::{PermissionsMock, PermissionsMockClient};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal, Val, Vec,
};

fn setup_test() -> (Env, StakingPoolContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let acl_id = env.register(PermissionsMock, ());
    let acl = PermissionsMockClient::new(&env, &acl_id);
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPoolContract, ());
    let client = StakingPoolContractClient::new(&env, &contract_id);
    client.initialize(&acl_id, &stake_token);

    let admin = Address::generate(&env);
    acl.grant(&admin, &contract_id, &PAUSE_CONTROL);
    acl.grant(&admin, &contract_id, &LIMIT_CONTROL);

    (env, client, admin, stake_token)
}

/// Number of events the pool published during the last invocation.
fn pool_event_count(env: &Env, client: &StakingPoolContractClient) -> usize {
    env.events()
        .all()
        .filter_by_contract(&client.address)
        .events()
        .len()
}

#[test]
fn test_starts_paused() {
    let (_env, client, _admin, _) = setup_test();
    assert!(client.is_staking_paused());
}

#[test]
fn test_resume_then_pause() {
    let (env, client, admin, _) = setup_test();
    env.ledger().set_sequence_number(4);

    client.resume_staking(&admin);
    assert!(!client.is_staking_paused());
    let expected: Vec<(Address, Vec<Val>, Val)> = vec![
        &env,
        (
            client.address.clone(),
            (symbol_short!("RESUMED"),).into_val(&env),
            StakingResumedEvent {
                caller: admin.clone(),
                block: 4,
            }
            .into_val(&env),
        ),
    ];
    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        expected
    );

    client.pause_staking(&admin);
    assert!(client.is_staking_paused());
    let expected: Vec<(Address, Vec<Val>, Val)> = vec![
        &env,
        (
            client.address.clone(),
            (symbol_short!("PAUSED"),).into_val(&env),
            StakingPausedEvent {
                caller: admin.clone(),
                block: 4,
            }
            .into_val(&env),
        ),
    ];
    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        expected
    );
}

#[test]
fn test_repeated_pause_emits_every_time() {
    let (env, client, admin, _) = setup_test();

    // Already paused after initialize; each call still reports itself.
    client.pause_staking(&admin);
    assert_eq!(pool_event_count(&env, &client), 1);
    client.pause_staking(&admin);
    assert_eq!(pool_event_count(&env, &client), 1);
    assert!(client.is_staking_paused());

    client.resume_staking(&admin);
    assert_eq!(pool_event_count(&env, &client), 1);
    client.resume_staking(&admin);
    assert_eq!(pool_event_count(&env, &client), 1);
    assert!(!client.is_staking_paused());
}

#[test]
fn test_unauthorized_pause() {
    let (env, client, admin, stake_token) = setup_test();
    client.resume_staking(&admin);
    client.set_staking_limit(&admin, &10, &2);
    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &4);
    client.submit(&staker, &4, &None);
    env.ledger().set_sequence_number(1);
    let before = client.get_stake_limit_full_info();

    let stranger = Address::generate(&env);
    let res = client.try_pause_staking(&stranger);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert_eq!(pool_event_count(&env, &client), 0);
    assert!(!client.is_staking_paused());
    assert_eq!(client.get_stake_limit_full_info(), before);

    // Rejected resume on a paused pool leaves it paused and untouched.
    client.pause_staking(&admin);
    let paused = client.get_stake_limit_full_info();
    let res = client.try_resume_staking(&stranger);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert_eq!(pool_event_count(&env, &client), 0);
    assert!(client.is_staking_paused());
    assert_eq!(client.get_stake_limit_full_info(), paused);
}

#[test]
fn test_pause_overrides_limit_and_keeps_accrual() {
    let (env, client, admin, stake_token) = setup_test();
    client.resume_staking(&admin);
    client.set_staking_limit(&admin, &10, &2);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&staker, &10);
    client.submit(&staker, &10, &None);
    assert_eq!(client.get_current_stake_limit(), 0);

    client.pause_staking(&admin);
    env.ledger().set_sequence_number(3);
    assert_eq!(client.get_current_stake_limit(), 0);
    assert_eq!(client.get_stake_limit_full_info().current_stake_limit, 0);

    // Three blocks of growth accrued while paused are honoured on resume.
    client.resume_staking(&admin);
    assert_eq!(client.get_current_stake_limit(), 6);

    let info = client.get_stake_limit_full_info();
    assert_eq!(info.prev_stake_limit, 0);
    assert_eq!(info.prev_stake_block, 0);
}

#[test]
fn test_set_limit_while_paused_starts_full() {
    let (env, client, admin, _) = setup_test();
    env.ledger().set_sequence_number(20);

    client.set_staking_limit(&admin, &10, &2);
    assert_eq!(client.get_current_stake_limit(), 0);

    env.ledger().set_sequence_number(25);
    client.resume_staking(&admin);
    assert_eq!(client.get_current_stake_limit(), 10);
    assert_eq!(client.get_stake_limit_full_info().prev_stake_block, 20);
}
