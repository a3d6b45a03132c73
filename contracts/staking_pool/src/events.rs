#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub acl: Address,
    pub stake_token: Address,
    pub block: u64,
}

/// Fired when a limit is configured or reconfigured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingLimitSetEvent {
    pub caller: Address,
    pub max_stake_limit: u128,
    pub stake_limit_increase_per_block: u128,
    pub block: u64,
}

/// Fired when the limit is dropped and the pool goes back to unlimited.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingLimitRemovedEvent {
    pub caller: Address,
    pub block: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPausedEvent {
    pub caller: Address,
    pub block: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingResumedEvent {
    pub caller: Address,
    pub block: u64,
}

/// Fired for every accepted deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmittedEvent {
    pub sender: Address,
    pub amount: i128,
    pub referral: Option<Address>,
    pub block: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

fn current_block(env: &Env) -> u64 {
    u64::from(env.ledger().sequence())
}

pub fn publish_initialized(env: &Env, acl: Address, stake_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            acl,
            stake_token,
            block: current_block(env),
        },
    );
}

pub fn publish_staking_limit_set(
    env: &Env,
    caller: Address,
    max_stake_limit: u128,
    stake_limit_increase_per_block: u128,
) {
    env.events().publish(
        (symbol_short!("LIM_SET"),),
        StakingLimitSetEvent {
            caller,
            max_stake_limit,
            stake_limit_increase_per_block,
            block: current_block(env),
        },
    );
}

pub fn publish_staking_limit_removed(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("LIM_RM"),),
        StakingLimitRemovedEvent {
            caller,
            block: current_block(env),
        },
    );
}

pub fn publish_staking_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        StakingPausedEvent {
            caller,
            block: current_block(env),
        },
    );
}

pub fn publish_staking_resumed(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("RESUMED"),),
        StakingResumedEvent {
            caller,
            block: current_block(env),
        },
    );
}

pub fn publish_submitted(env: &Env, sender: Address, amount: i128, referral: Option<Address>) {
    env.events().publish(
        (symbol_short!("SUBMIT"), sender.clone()),
        SubmittedEvent {
            sender,
            amount,
            referral,
            block: current_block(env),
        },
    );
}
