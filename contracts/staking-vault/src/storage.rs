use defi_types::{Error, StakePool, UserStakeInfo, VaultConfig};
use soroban_sdk::{contracttype, panic_with_error, Address, Env};

/// Storage keys for the vault contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vault configuration (Instance storage)
    Config,
    /// Sum of all pool weights (Instance storage)
    TotalWeight,
    /// Number of pools created; ids are 0..count (Instance storage)
    PoolCount,
    /// Pool id -> StakePool (Persistent storage)
    Pool(u32),
    /// (pool id, principal) -> UserStakeInfo (Persistent storage)
    UserStake(u32, Address),
    /// Admin role membership (Persistent storage)
    Admin(Address),
    /// Withdrawals paused (Instance storage)
    WithdrawPaused,
    /// Reward claims paused (Instance storage)
    ClaimPaused,
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

pub fn get_config(env: &Env) -> VaultConfig {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Total weight ===

pub fn get_total_weight(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalWeight)
        .unwrap_or(0)
}

pub fn set_total_weight(env: &Env, weight: i128) {
    env.storage().instance().set(&DataKey::TotalWeight, &weight);
    extend_instance_ttl(env);
}

// === Pools ===

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PoolCount, &count);
    extend_instance_ttl(env);
}

pub fn get_pool(env: &Env, pool_id: u32) -> StakePool {
    let key = DataKey::Pool(pool_id);
    match env.storage().persistent().get(&key) {
        Some(pool) => pool,
        None => panic_with_error!(env, Error::PoolNotFound),
    }
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &StakePool) {
    let key = DataKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    extend_persistent_ttl(env, &key);
}

// === User stakes ===

pub fn get_user_stake(env: &Env, pool_id: u32, account: &Address) -> UserStakeInfo {
    let key = DataKey::UserStake(pool_id, account.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| UserStakeInfo::new(env))
}

pub fn set_user_stake(env: &Env, pool_id: u32, account: &Address, info: &UserStakeInfo) {
    let key = DataKey::UserStake(pool_id, account.clone());
    if info.is_empty() {
        // Remove fully drained stake entry
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, info);
        extend_persistent_ttl(env, &key);
    }
}

// === Admin role set ===

pub fn is_admin(env: &Env, account: &Address) -> bool {
    let key = DataKey::Admin(account.clone());
    env.storage().persistent().has(&key)
}

pub fn set_admin(env: &Env, account: &Address, admin: bool) {
    let key = DataKey::Admin(account.clone());
    if admin {
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// === Pause flags ===

pub fn withdraw_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::WithdrawPaused)
        .unwrap_or(false)
}

pub fn set_withdraw_paused(env: &Env, paused: bool) {
    env.storage()
        .instance()
        .set(&DataKey::WithdrawPaused, &paused);
    extend_instance_ttl(env);
}

pub fn claim_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::ClaimPaused)
        .unwrap_or(false)
}

pub fn set_claim_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::ClaimPaused, &paused);
    extend_instance_ttl(env);
}
