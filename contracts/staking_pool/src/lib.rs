#![no_std]

pub mod events;
pub mod pause;

use common::authorization::{self, LIMIT_CONTROL, PAUSE_CONTROL};
use common::stake_limit::{self, LimiterState, StakeLimitError};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const ACL: Symbol = symbol_short!("ACL");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const STAKE_LIMIT: Symbol = symbol_short!("STK_LIM");
const BUFFERED: Symbol = symbol_short!("BUFFERED");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidBlockOrder = 4,
    InvalidConfiguration = 5,
    InsufficientCapacity = 6,
    StakingPaused = 7,
    ZeroDeposit = 8,
}

impl From<StakeLimitError> for ContractError {
    fn from(err: StakeLimitError) -> Self {
        match err {
            StakeLimitError::InvalidBlockOrder { .. } => ContractError::InvalidBlockOrder,
            StakeLimitError::InvalidConfiguration => ContractError::InvalidConfiguration,
            StakeLimitError::InsufficientCapacity { .. } => ContractError::InsufficientCapacity,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of the pause flag and the stake limit bucket, as returned by
/// `get_stake_limit_full_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeLimitInfo {
    pub is_staking_paused: bool,
    pub is_staking_limit_set: bool,
    pub current_stake_limit: u128,
    pub max_stake_limit: u128,
    pub full_recovery_blocks: u128,
    pub prev_stake_limit: u128,
    pub prev_stake_block: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolContract;

#[contractimpl]
impl StakingPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `acl`         – policy engine answering `has_capability` queries.
    /// * `stake_token` – SAC address of the asset users deposit.
    ///
    /// The pool starts paused and without a stake limit.
    pub fn initialize(env: Env, acl: Address, stake_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let now = Self::current_block(&env);

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&ACL, &acl);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage()
            .instance()
            .set(&STAKE_LIMIT, &LimiterState::new(now));
        pause::set_paused(&env, true);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, acl, stake_token);

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens into the pool buffer.
    ///
    /// The amount is charged against the stake limit before any tokens move;
    /// if the transfer fails afterwards the whole invocation, including the
    /// limit update, is rolled back by the host.
    ///
    /// Returns the new buffered total.
    pub fn submit(
        env: Env,
        sender: Address,
        amount: i128,
        referral: Option<Address>,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        sender.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroDeposit);
        }
        pause::require_not_paused(&env)?;

        // `amount` is positive here.
        Self::record_consumption(&env, amount as u128)?;

        let stake_token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        token::Client::new(&env, &stake_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        let prev_buffered: i128 = env.storage().instance().get(&BUFFERED).unwrap_or(0);
        let new_buffered = prev_buffered.saturating_add(amount);
        env.storage().instance().set(&BUFFERED, &new_buffered);
        Self::extend_instance_ttl(&env);

        events::publish_submitted(&env, sender, amount, referral);

        Ok(new_buffered)
    }

    // ── Pause switch ────────────────────────────────────────────────────────

    /// Stop accepting deposits. Requires `PAUSE_CONTROL`.
    pub fn pause_staking(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_capability(&env, &caller, &PAUSE_CONTROL)?;

        pause::pause(&env, &caller);
        Self::extend_instance_ttl(&env);

        Ok(())
    }

    /// Accept deposits again. Requires `PAUSE_CONTROL`.
    pub fn resume_staking(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_capability(&env, &caller, &PAUSE_CONTROL)?;

        pause::resume(&env, &caller);
        Self::extend_instance_ttl(&env);

        Ok(())
    }

    pub fn is_staking_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    // ── Stake limit ─────────────────────────────────────────────────────────

    /// Configure the stake limit. Requires `LIMIT_CONTROL`.
    ///
    /// * `max_stake_limit`                – bucket ceiling.
    /// * `stake_limit_increase_per_block` – capacity regained per ledger.
    ///
    /// The bucket is refilled to `max_stake_limit` at the current ledger,
    /// whether or not staking is paused.
    pub fn set_staking_limit(
        env: Env,
        caller: Address,
        max_stake_limit: u128,
        stake_limit_increase_per_block: u128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_capability(&env, &caller, &LIMIT_CONTROL)?;

        let state = Self::load_limit(&env);
        let next = stake_limit::set_configuration(
            &state,
            Self::current_block(&env),
            max_stake_limit,
            stake_limit_increase_per_block,
        )?;
        Self::store_limit(&env, &next);

        log!(
            &env,
            "stake limit set: max {} per block {}",
            max_stake_limit,
            stake_limit_increase_per_block
        );
        events::publish_staking_limit_set(
            &env,
            caller,
            max_stake_limit,
            stake_limit_increase_per_block,
        );

        Ok(())
    }

    /// Drop the stake limit; deposits become unlimited while not paused.
    /// Requires `LIMIT_CONTROL`.
    pub fn remove_staking_limit(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_capability(&env, &caller, &LIMIT_CONTROL)?;

        let state = Self::load_limit(&env);
        Self::store_limit(&env, &stake_limit::clear_configuration(&state));

        log!(&env, "stake limit removed");
        events::publish_staking_limit_removed(&env, caller);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Amount the pool accepts right now: zero while paused, `u128::MAX`
    /// when no limit is set.
    pub fn get_current_stake_limit(env: Env) -> Result<u128, ContractError> {
        if pause::is_paused(&env) {
            return Ok(0);
        }
        let state = Self::load_limit(&env);
        Ok(stake_limit::current_capacity(
            &state,
            Self::current_block(&env),
        )?)
    }

    pub fn get_stake_limit_full_info(env: Env) -> Result<StakeLimitInfo, ContractError> {
        let state = Self::load_limit(&env);
        let is_staking_paused = pause::is_paused(&env);
        let current_stake_limit = if is_staking_paused {
            0
        } else {
            stake_limit::current_capacity(&state, Self::current_block(&env))?
        };

        Ok(StakeLimitInfo {
            is_staking_paused,
            is_staking_limit_set: state.is_limit_set(),
            current_stake_limit,
            max_stake_limit: state.max_limit,
            full_recovery_blocks: state.full_recovery_blocks(),
            prev_stake_limit: state.prev_limit,
            prev_stake_block: state.prev_block,
        })
    }

    /// Total deposited through `submit` so far.
    pub fn get_buffered_stake(env: Env) -> i128 {
        env.storage().instance().get(&BUFFERED).unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_acl(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ACL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: `caller` must sign and the policy engine must grant it
    /// `capability` on this pool.
    fn require_capability(
        env: &Env,
        caller: &Address,
        capability: &Symbol,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let acl: Address = env
            .storage()
            .instance()
            .get(&ACL)
            .ok_or(ContractError::NotInitialized)?;
        if !authorization::has_capability(env, &acl, caller, capability) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Charge `amount` against the stake limit at the current ledger.
    /// This is the only place deposits drain the bucket.
    fn record_consumption(env: &Env, amount: u128) -> Result<(), ContractError> {
        let state = Self::load_limit(env);
        let next = stake_limit::consume(&state, Self::current_block(env), amount).map_err(
            |err| {
                if let StakeLimitError::InsufficientCapacity {
                    requested,
                    available,
                } = err
                {
                    log!(env, "stake limit exceeded: {} > {}", requested, available);
                }
                ContractError::from(err)
            },
        )?;
        if next != state {
            Self::store_limit(env, &next);
        }
        Ok(())
    }

    fn load_limit(env: &Env) -> LimiterState {
        env.storage()
            .instance()
            .get(&STAKE_LIMIT)
            .unwrap_or_default()
    }

    fn store_limit(env: &Env, state: &LimiterState) {
        env.storage().instance().set(&STAKE_LIMIT, state);
        Self::extend_instance_ttl(env);
    }

    fn current_block(env: &Env) -> u64 {
        u64::from(env.ledger().sequence())
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_pause;
