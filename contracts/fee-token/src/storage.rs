use defi_types::Error;
use soroban_sdk::{contracttype, panic_with_error, Address, Env, String};

/// Token configuration - immutable after initialization
#[contracttype]
#[derive(Clone)]
pub struct TokenConfig {
    pub admin: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Transfer fee in basis points, burned on every non-exempt transfer
    pub fee_bps: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

/// Storage keys for the token contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Token configuration (Instance storage)
    Config,
    /// Total supply (Instance storage)
    TotalSupply,
    /// Principal -> balance (Persistent storage)
    Balance(Address),
    /// (from, spender) -> allowance (Temporary storage, expires)
    Allowance(AllowanceKey),
    /// Principals exempt from the transfer fee (Persistent storage)
    FeeExempt(Address),
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

pub fn get_config(env: &Env) -> TokenConfig {
    extend_instance_ttl(env);
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => config,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

pub fn set_config(env: &Env, config: &TokenConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Total supply ===

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    extend_instance_ttl(env);
}

// === Balances ===

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    if amount == 0 {
        // Remove empty balance entry
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
}

// === Allowances ===

pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> Option<AllowanceValue> {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().temporary().get(&key)
}

/// Live allowance amount; expired or absent entries count as zero.
pub fn live_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    match get_allowance(env, from, spender) {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => {
            allowance.amount
        }
        _ => 0,
    }
}

pub fn set_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    if amount == 0 {
        // Remove zeroed allowance
        env.storage().temporary().remove(&key);
        return;
    }
    let value = AllowanceValue {
        amount,
        expiration_ledger,
    };
    env.storage().temporary().set(&key, &value);
    // Keep the entry alive exactly until it expires
    let live_for = expiration_ledger.saturating_sub(env.ledger().sequence());
    if live_for > 0 {
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

// === Fee exemption set ===

pub fn is_fee_exempt(env: &Env, id: &Address) -> bool {
    let key = DataKey::FeeExempt(id.clone());
    env.storage().persistent().has(&key)
}

pub fn set_fee_exempt(env: &Env, id: &Address, exempt: bool) {
    let key = DataKey::FeeExempt(id.clone());
    if exempt {
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}
