use crate::{events, ContractError};
use soroban_sdk::{log, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────

const PAUSED: Symbol = symbol_short!("PAUSED");

// ── Switch ───────────────────────────────────────────────────

/// Pools start paused, so a missing flag reads as paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(true)
}

pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::StakingPaused);
    }
    Ok(())
}

pub(crate) fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Stops accepting deposits. The stake limit bucket is left as it is.
/// Callers must check `PAUSE_CONTROL` beforehand.
pub fn pause(env: &Env, caller: &Address) {
    set_paused(env, true);
    log!(env, "staking paused by {}", caller.clone());
    events::publish_staking_paused(env, caller.clone());
}

/// Accepts deposits again. Capacity regained while paused is kept.
/// Callers must check `PAUSE_CONTROL` beforehand.
pub fn resume(env: &Env, caller: &Address) {
    set_paused(env, false);
    log!(env, "staking resumed by {}", caller.clone());
    events::publish_staking_resumed(env, caller.clone());
}
