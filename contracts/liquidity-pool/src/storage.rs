use defi_types::{Error, PoolConfig, Reserves};
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool configuration (Instance storage)
    Config,
    /// Current reserves and share supply (Instance storage)
    Reserves,
    /// Provider -> share balance (Persistent storage)
    Shares(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> PoolConfig {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Reserves ===

pub fn get_reserves(env: &Env) -> Reserves {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Reserves) {
        Some(reserves) => reserves,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn set_reserves(env: &Env, reserves: &Reserves) {
    env.storage().instance().set(&DataKey::Reserves, reserves);
    extend_instance_ttl(env);
}

// === Shares ===

pub fn get_shares(env: &Env, provider: &Address) -> i128 {
    let key = DataKey::Shares(provider.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_shares(env: &Env, provider: &Address, shares: i128) {
    let key = DataKey::Shares(provider.clone());
    if shares == 0 {
        // Remove empty share entry
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &shares);
        extend_persistent_ttl(env, &key);
    }
}
