//! Block-indexed reward accrual: the scaled-accumulator pattern.
//!
//! `acc_reward_per_share` carries the cumulative reward per staked unit,
//! scaled by `REWARD_PRECISION`; a user's `reward_debt` is the accumulator
//! checkpoint from their last settlement. Pending reward is always
//! `staked * acc / PRECISION - debt`, and both the read-only preview and
//! the settlement path go through the functions here so they cannot drift.

use crate::storage::{get_config, get_pool, get_total_weight, set_pool};
use defi_math::{add, mul_div, sub};
use defi_types::{StakePool, UserStakeInfo, VaultConfig, REWARD_PRECISION};
use soroban_sdk::Env;

/// Ledger used for accrual: the current sequence clamped to the program's
/// end block. Nothing accrues past the end of the schedule.
pub fn accrual_block(env: &Env, config: &VaultConfig) -> u32 {
    env.ledger().sequence().min(config.end_block)
}

/// The accumulator value a checkpoint at the current ledger would produce.
///
/// An empty pool advances its checkpoint without materializing reward
/// (the emission for that period is simply not accrued), so the
/// accumulator is untouched when nothing is staked.
pub fn projected_acc_per_share(
    env: &Env,
    config: &VaultConfig,
    pool: &StakePool,
    total_weight: i128,
) -> i128 {
    let current = accrual_block(env, config);
    if current <= pool.last_reward_block || pool.total_staked == 0 || total_weight == 0 {
        return pool.acc_reward_per_share;
    }

    let elapsed = (current - pool.last_reward_block) as i128;
    let emitted = mul_div(env, elapsed, config.reward_per_block, 1);
    let pool_reward = mul_div(env, emitted, pool.weight, total_weight);
    add(
        env,
        pool.acc_reward_per_share,
        mul_div(env, pool_reward, REWARD_PRECISION, pool.total_staked),
    )
}

/// Checkpoint a pool at the current ledger and persist it. Idempotent
/// within a block: the second call in the same ledger is a no-op.
pub fn update_pool(env: &Env, pool_id: u32) -> StakePool {
    let config = get_config(env);
    let mut pool = get_pool(env, pool_id);

    let current = accrual_block(env, &config);
    if current <= pool.last_reward_block {
        return pool;
    }

    pool.acc_reward_per_share = projected_acc_per_share(env, &config, &pool, get_total_weight(env));
    pool.last_reward_block = current;
    set_pool(env, pool_id, &pool);
    pool
}

/// Reward accrued to a user beyond their recorded debt, against the given
/// accumulator value.
pub fn pending_amount(env: &Env, user: &UserStakeInfo, acc_per_share: i128) -> i128 {
    sub(
        env,
        mul_div(env, user.staked_amount, acc_per_share, REWARD_PRECISION),
        user.reward_debt,
    )
}

/// Debt checkpoint for the user's current stake against the given
/// accumulator value.
pub fn reward_debt(env: &Env, user: &UserStakeInfo, acc_per_share: i128) -> i128 {
    mul_div(env, user.staked_amount, acc_per_share, REWARD_PRECISION)
}
