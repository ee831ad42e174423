use crate::invariants;
use crate::storage::{get_config, get_reserves, set_reserves};
use crate::transfers::{payout, pull};
use defi_math::{add, amount_out, sub};
use defi_types::{Error, Reserves};
use soroban_sdk::{panic_with_error, Address, Env, Symbol};

/// Quote the output for a swap against the given reserves.
///
/// Shared by the read-only price preview and both swap entry points, so
/// the preview can never drift from what execution pays out.
pub fn quote(
    env: &Env,
    reserves: &Reserves,
    amount_in: i128,
    native_to_token: bool,
    fee_bps: u32,
) -> i128 {
    if amount_in <= 0 {
        panic_with_error!(env, Error::ZeroAmount);
    }
    if reserves.native == 0 || reserves.token == 0 {
        panic_with_error!(env, Error::InsufficientLiquidity);
    }

    let (reserve_in, reserve_out) = if native_to_token {
        (reserves.native, reserves.token)
    } else {
        (reserves.token, reserves.native)
    };
    amount_out(env, amount_in, reserve_in, reserve_out, fee_bps)
}

/// Execute a constant-product swap.
///
/// Reserves grow by the full pre-fee input and shrink by the output; the
/// fee therefore stays in the pool as provider yield. The formula keeps
/// the output strictly below the outbound reserve, so a swap can never
/// empty a side.
pub fn swap(env: &Env, trader: Address, amount_in: i128, native_to_token: bool) -> i128 {
    let config = get_config(env);
    let mut reserves = get_reserves(env);

    let out = quote(env, &reserves, amount_in, native_to_token, config.swap_fee_bps);
    if out == 0 {
        // Dust input whose output floors to zero; reject rather than
        // consume the input for nothing.
        panic_with_error!(env, Error::ZeroAmount);
    }

    let before = reserves.clone();
    let (asset_in, asset_out) = if native_to_token {
        reserves.native = add(env, reserves.native, amount_in);
        reserves.token = sub(env, reserves.token, out);
        (config.native_token.clone(), config.token.clone())
    } else {
        reserves.token = add(env, reserves.token, amount_in);
        reserves.native = sub(env, reserves.native, out);
        (config.token.clone(), config.native_token.clone())
    };
    set_reserves(env, &reserves);

    debug_assert!(invariants::reserves_coherent(&reserves));
    debug_assert!(invariants::product_non_decreasing(env, &before, &reserves));

    pull(env, &asset_in, &trader, amount_in);
    payout(env, &asset_out, &trader, out);

    env.events().publish(
        (Symbol::new(env, "swapped"), trader),
        (native_to_token, amount_in, out),
    );

    out
}
