#![no_std]

mod reward;
mod storage;
mod transfers;

use defi_math::{add, sub};
use defi_types::{Error, StakePool, UserStakeInfo, VaultConfig, WithdrawRequest};
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Symbol, Vec};
use storage::{
    claim_paused, get_config, get_pool, get_pool_count, get_total_weight, get_user_stake,
    has_config, is_admin, set_admin, set_claim_paused, set_config, set_pool, set_pool_count,
    set_total_weight, set_user_stake, set_withdraw_paused, withdraw_paused,
};
use transfers::{payout, pull};

#[contract]
pub struct StakingVault;

#[contractimpl]
impl StakingVault {
    /// Initialize the vault with its reward schedule and grant `admin` the
    /// admin role. The vault pays rewards from its own reward-token
    /// balance, which the operator funds separately.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        start_block: u32,
        end_block: u32,
        reward_per_block: i128,
    ) {
        if has_config(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if start_block >= end_block || reward_per_block <= 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        let config = VaultConfig {
            reward_token,
            start_block,
            end_block,
            reward_per_block,
        };
        set_config(&env, &config);
        set_admin(&env, &admin, true);
    }

    // === Role Management ===

    pub fn grant_admin(env: Env, caller: Address, account: Address) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_admin(&env, &account, true);
    }

    pub fn revoke_admin(env: Env, caller: Address, account: Address) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_admin(&env, &account, false);
    }

    pub fn is_admin(env: Env, account: Address) -> bool {
        is_admin(&env, &account)
    }

    // === Pool Administration ===

    /// Append a new staking pool. Admin only.
    ///
    /// Existing pools are checkpointed first so their accrual up to this
    /// ledger still uses the old total weight.
    ///
    /// # Returns
    /// The new pool's id (insertion order; pool 0 is conventionally the
    /// native-asset pool)
    pub fn add_pool(
        env: Env,
        caller: Address,
        staked_token: Address,
        weight: i128,
        min_deposit: i128,
        unstake_lock_blocks: u32,
    ) -> u32 {
        caller.require_auth();
        require_admin(&env, &caller);
        if weight <= 0 || min_deposit < 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        mass_update(&env);

        let config = get_config(&env);
        let pool_id = get_pool_count(&env);
        let pool = StakePool {
            staked_token: staked_token.clone(),
            weight,
            min_deposit,
            unstake_lock_blocks,
            acc_reward_per_share: 0,
            last_reward_block: env.ledger().sequence().max(config.start_block),
            total_staked: 0,
        };
        set_pool(&env, pool_id, &pool);
        set_pool_count(&env, pool_id + 1);
        set_total_weight(&env, add(&env, get_total_weight(&env), weight));

        env.events()
            .publish((Symbol::new(&env, "pool_added"), staked_token), pool_id);

        pool_id
    }

    /// Change a pool's weight. Admin only; every pool is checkpointed
    /// against the old weights first.
    pub fn set_pool_weight(env: Env, caller: Address, pool_id: u32, weight: i128) {
        caller.require_auth();
        require_admin(&env, &caller);
        if weight <= 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        mass_update(&env);

        let mut pool = get_pool(&env, pool_id);
        let total = sub(&env, get_total_weight(&env), pool.weight);
        set_total_weight(&env, add(&env, total, weight));
        pool.weight = weight;
        set_pool(&env, pool_id, &pool);
    }

    /// Change the per-block emission. Admin only; every pool is
    /// checkpointed against the old rate first.
    pub fn set_reward_per_block(env: Env, caller: Address, reward_per_block: i128) {
        caller.require_auth();
        require_admin(&env, &caller);
        if reward_per_block <= 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        mass_update(&env);

        let mut config = get_config(&env);
        config.reward_per_block = reward_per_block;
        set_config(&env, &config);
    }

    /// Emergency pause for withdrawals. Admin only.
    pub fn set_withdraw_paused(env: Env, caller: Address, paused: bool) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_withdraw_paused(&env, paused);
    }

    /// Emergency pause for reward claims. Admin only.
    pub fn set_claim_paused(env: Env, caller: Address, paused: bool) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_claim_paused(&env, paused);
    }

    // === Accrual ===

    /// Checkpoint a single pool at the current ledger. Anyone may call;
    /// calling twice in the same ledger changes nothing after the first.
    pub fn update_pool(env: Env, pool_id: u32) {
        reward::update_pool(&env, pool_id);
    }

    /// Checkpoint every pool at the current ledger.
    pub fn mass_update_pools(env: Env) {
        mass_update(&env);
    }

    // === Staking ===

    /// Stake `amount` of the pool's asset. Any pending reward is settled
    /// to the caller before the stake changes.
    pub fn deposit(env: Env, caller: Address, pool_id: u32, amount: i128) {
        caller.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let config = get_config(&env);
        let mut pool = reward::update_pool(&env, pool_id);
        if amount < pool.min_deposit {
            panic_with_error!(&env, Error::BelowMinimum);
        }

        let mut user = get_user_stake(&env, pool_id, &caller);
        settle_pending(&env, &config, &pool, pool_id, &caller, &user);

        pull(&env, &pool.staked_token, &caller, amount);

        user.staked_amount = add(&env, user.staked_amount, amount);
        pool.total_staked = add(&env, pool.total_staked, amount);
        user.reward_debt = reward::reward_debt(&env, &user, pool.acc_reward_per_share);
        set_pool(&env, pool_id, &pool);
        set_user_stake(&env, pool_id, &caller, &user);

        env.events().publish(
            (Symbol::new(&env, "deposited"), caller),
            (pool_id, amount),
        );
    }

    /// Stop `amount` from earning and queue it behind the pool's unstake
    /// lock. Funds transfer only on `withdraw` once the lock expires.
    pub fn request_unstake(env: Env, caller: Address, pool_id: u32, amount: i128) {
        caller.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let config = get_config(&env);
        let mut pool = reward::update_pool(&env, pool_id);
        let mut user = get_user_stake(&env, pool_id, &caller);
        if amount > user.staked_amount {
            panic_with_error!(&env, Error::InsufficientStake);
        }

        settle_pending(&env, &config, &pool, pool_id, &caller, &user);

        user.staked_amount = sub(&env, user.staked_amount, amount);
        pool.total_staked = sub(&env, pool.total_staked, amount);
        user.reward_debt = reward::reward_debt(&env, &user, pool.acc_reward_per_share);

        let unlock_block = match env
            .ledger()
            .sequence()
            .checked_add(pool.unstake_lock_blocks)
        {
            Some(block) => block,
            None => panic_with_error!(&env, Error::Overflow),
        };
        user.pending_withdrawals
            .push_back(WithdrawRequest { amount, unlock_block });

        set_pool(&env, pool_id, &pool);
        set_user_stake(&env, pool_id, &caller, &user);

        env.events().publish(
            (Symbol::new(&env, "unstake_requested"), caller),
            (pool_id, amount, unlock_block),
        );
    }

    /// Pay out every queued withdrawal whose unlock block has passed.
    /// Matured requests never expire.
    ///
    /// # Returns
    /// Total amount transferred out
    pub fn withdraw(env: Env, caller: Address, pool_id: u32) -> i128 {
        caller.require_auth();
        if withdraw_paused(&env) {
            panic_with_error!(&env, Error::Paused);
        }

        let pool = get_pool(&env, pool_id);
        let mut user = get_user_stake(&env, pool_id, &caller);
        let current = env.ledger().sequence();

        let mut kept: Vec<WithdrawRequest> = Vec::new(&env);
        let mut matured: i128 = 0;
        for request in user.pending_withdrawals.iter() {
            if request.unlock_block <= current {
                matured = add(&env, matured, request.amount);
            } else {
                kept.push_back(request);
            }
        }
        if matured == 0 {
            panic_with_error!(&env, Error::NothingToWithdraw);
        }

        user.pending_withdrawals = kept;
        set_user_stake(&env, pool_id, &caller, &user);

        payout(&env, &pool.staked_token, &caller, matured);

        env.events().publish(
            (Symbol::new(&env, "withdrawn"), caller),
            (pool_id, matured),
        );

        matured
    }

    /// Settle and pay out the caller's pending reward without touching the
    /// staked amount.
    ///
    /// # Returns
    /// Reward amount paid
    pub fn claim_reward(env: Env, caller: Address, pool_id: u32) -> i128 {
        caller.require_auth();
        if claim_paused(&env) {
            panic_with_error!(&env, Error::Paused);
        }

        let config = get_config(&env);
        let pool = reward::update_pool(&env, pool_id);
        let mut user = get_user_stake(&env, pool_id, &caller);

        let paid = settle_pending(&env, &config, &pool, pool_id, &caller, &user);
        user.reward_debt = reward::reward_debt(&env, &user, pool.acc_reward_per_share);
        set_user_stake(&env, pool_id, &caller, &user);

        paid
    }

    // === View Functions ===

    /// The reward a settlement at the current ledger would pay. Uses the
    /// same accrual path as the state-changing operations.
    pub fn pending_reward(env: Env, pool_id: u32, account: Address) -> i128 {
        let config = get_config(&env);
        let pool = get_pool(&env, pool_id);
        let user = get_user_stake(&env, pool_id, &account);
        let acc = reward::projected_acc_per_share(&env, &config, &pool, get_total_weight(&env));
        reward::pending_amount(&env, &user, acc)
    }

    pub fn pool_length(env: Env) -> u32 {
        get_pool_count(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> StakePool {
        get_pool(&env, pool_id)
    }

    pub fn staking_balance(env: Env, pool_id: u32, account: Address) -> i128 {
        get_user_stake(&env, pool_id, &account).staked_amount
    }

    pub fn get_user_stake(env: Env, pool_id: u32, account: Address) -> UserStakeInfo {
        get_user_stake(&env, pool_id, &account)
    }

    /// Queued withdrawals for an account
    ///
    /// # Returns
    /// (total queued, claimable at the current ledger)
    pub fn withdraw_amount(env: Env, pool_id: u32, account: Address) -> (i128, i128) {
        let user = get_user_stake(&env, pool_id, &account);
        let current = env.ledger().sequence();
        let mut total: i128 = 0;
        let mut claimable: i128 = 0;
        for request in user.pending_withdrawals.iter() {
            total = add(&env, total, request.amount);
            if request.unlock_block <= current {
                claimable = add(&env, claimable, request.amount);
            }
        }
        (total, claimable)
    }

    pub fn get_total_weight(env: Env) -> i128 {
        get_total_weight(&env)
    }

    pub fn get_config(env: Env) -> VaultConfig {
        get_config(&env)
    }

    pub fn withdraw_paused(env: Env) -> bool {
        withdraw_paused(&env)
    }

    pub fn claim_paused(env: Env) -> bool {
        claim_paused(&env)
    }
}

fn mass_update(env: &Env) {
    let count = get_pool_count(env);
    for pool_id in 0..count {
        reward::update_pool(env, pool_id);
    }
}

/// Transfer the user's pending reward, if any. The caller refreshes
/// `reward_debt` afterwards.
fn settle_pending(
    env: &Env,
    config: &VaultConfig,
    pool: &StakePool,
    pool_id: u32,
    account: &Address,
    user: &UserStakeInfo,
) -> i128 {
    let pending = reward::pending_amount(env, user, pool.acc_reward_per_share);
    if pending > 0 {
        payout(env, &config.reward_token, account, pending);
        env.events().publish(
            (Symbol::new(env, "reward_claimed"), account.clone()),
            (pool_id, pending),
        );
    }
    pending
}

/// Role checks fail closed: no entry means no access.
fn require_admin(env: &Env, caller: &Address) {
    if !is_admin(env, caller) {
        panic_with_error!(env, Error::Unauthorized);
    }
}
