use crate::invariants;
use crate::storage::{get_config, get_reserves, get_shares, set_reserves, set_shares};
use crate::transfers::{payout, pull};
use defi_math::{add, amounts_for_shares, shares_for_deposit, sub};
use defi_types::Error;
use soroban_sdk::{panic_with_error, Address, Env, Symbol};

/// Add liquidity and mint shares to the provider.
///
/// An empty pool is seeded at exactly the deposited ratio and the first
/// provider receives `native_amount` shares. A seeded pool mints by the
/// smaller of the two deposit ratios; the excess of the larger-ratio asset
/// stays in the pool without minting shares for it (not refunded).
pub fn add_liquidity(
    env: &Env,
    provider: Address,
    token_amount: i128,
    native_amount: i128,
) -> i128 {
    if token_amount <= 0 || native_amount <= 0 {
        panic_with_error!(env, Error::ZeroAmount);
    }

    let config = get_config(env);
    let mut reserves = get_reserves(env);

    let shares = if reserves.is_empty() {
        native_amount
    } else {
        shares_for_deposit(env, native_amount, token_amount, &reserves)
    };
    if shares == 0 {
        // Deposit too small to mint a single share
        panic_with_error!(env, Error::ZeroAmount);
    }

    pull(env, &config.native_token, &provider, native_amount);
    pull(env, &config.token, &provider, token_amount);

    reserves.native = add(env, reserves.native, native_amount);
    reserves.token = add(env, reserves.token, token_amount);
    reserves.total_shares = add(env, reserves.total_shares, shares);
    set_reserves(env, &reserves);
    set_shares(env, &provider, add(env, get_shares(env, &provider), shares));

    debug_assert!(invariants::reserves_coherent(&reserves));

    env.events().publish(
        (Symbol::new(env, "liquidity_added"), provider),
        (native_amount, token_amount, shares),
    );

    shares
}

/// Burn shares and pay out the proportional slice of both reserves.
///
/// Both payouts floor, so redemption dust accrues to the remaining
/// providers. State is settled before the outbound legs; a failed leg
/// aborts the operation and the host rolls back every prior write.
pub fn remove_liquidity(env: &Env, provider: Address, shares: i128) -> (i128, i128) {
    if shares <= 0 {
        panic_with_error!(env, Error::ZeroAmount);
    }

    let config = get_config(env);
    let mut reserves = get_reserves(env);
    let owned = get_shares(env, &provider);
    if owned < shares {
        panic_with_error!(env, Error::InsufficientShares);
    }

    let (native_out, token_out) = amounts_for_shares(env, shares, &reserves);

    reserves.native = sub(env, reserves.native, native_out);
    reserves.token = sub(env, reserves.token, token_out);
    reserves.total_shares = sub(env, reserves.total_shares, shares);
    set_reserves(env, &reserves);
    set_shares(env, &provider, owned - shares);

    debug_assert!(invariants::reserves_coherent(&reserves));

    payout(env, &config.native_token, &provider, native_out);
    payout(env, &config.token, &provider, token_out);

    env.events().publish(
        (Symbol::new(env, "liquidity_removed"), provider),
        (native_out, token_out, shares),
    );

    (native_out, token_out)
}
