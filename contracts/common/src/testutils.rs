//! In-memory policy engine for tests and fuzzing.

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Policy engine answering `has_capability` from explicit grants.
#[contract]
pub struct PermissionsMock;

#[contractimpl]
impl PermissionsMock {
    pub fn grant(env: Env, actor: Address, resource: Address, capability: Symbol) {
        env.storage()
            .instance()
            .set(&(actor, resource, capability), &true);
    }

    pub fn revoke(env: Env, actor: Address, resource: Address, capability: Symbol) {
        env.storage()
            .instance()
            .remove(&(actor, resource, capability));
    }

    pub fn has_capability(env: Env, actor: Address, resource: Address, capability: Symbol) -> bool {
        env.storage()
            .instance()
            .get(&(actor, resource, capability))
            .unwrap_or(false)
    }
}
