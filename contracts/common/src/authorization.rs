//! Capability checks delegated to an external policy engine contract.
//!
//! A pool never stores role tables. It asks the policy engine configured at
//! initialization whether `actor` holds `capability` on `resource` (the
//! pool's own contract address) and refuses the call on `false`.

use soroban_sdk::{contractclient, symbol_short, Address, Env, Symbol};

/// May change or remove the stake limit.
pub const LIMIT_CONTROL: Symbol = symbol_short!("LIMIT_CTL");

/// May pause and resume staking.
pub const PAUSE_CONTROL: Symbol = symbol_short!("PAUSE_CTL");

/// Interface every policy engine contract exposes.
#[contractclient(name = "AuthorizationClient")]
pub trait Authorization {
    fn has_capability(env: Env, actor: Address, resource: Address, capability: Symbol) -> bool;
}

/// Cross-contract query against the policy engine at `policy`.
pub fn has_capability(
    env: &Env,
    policy: &Address,
    actor: &Address,
    capability: &Symbol,
) -> bool {
    AuthorizationClient::new(env, policy).has_capability(
        actor,
        &env.current_contract_address(),
        capability,
    )
}
