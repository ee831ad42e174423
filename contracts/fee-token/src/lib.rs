#![no_std]

mod storage;

use defi_types::{Error, BPS_DENOMINATOR};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, panic_with_error, token, token::TokenInterface, Address, Env,
    MuxedAddress, String, Symbol,
};
use storage::{
    get_balance, get_config, get_total_supply, has_config, is_fee_exempt, live_allowance,
    set_allowance, set_balance, set_config, set_fee_exempt, set_total_supply, TokenConfig,
};

#[contract]
pub struct FeeToken;

#[contractimpl]
impl FeeToken {
    /// Initialize the token and mint the initial supply to the admin.
    ///
    /// `fee_bps` is the transfer fee in basis points; it is deducted from
    /// the credited amount and burned whenever neither party is in the
    /// fee-exemption set.
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        decimals: u32,
        initial_supply: i128,
        fee_bps: u32,
    ) {
        if has_config(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if fee_bps as i128 >= BPS_DENOMINATOR {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        check_nonnegative(&env, initial_supply);

        let config = TokenConfig {
            admin: admin.clone(),
            name,
            symbol,
            decimals,
            fee_bps,
        };
        set_config(&env, &config);
        set_balance(&env, &admin, initial_supply);
        set_total_supply(&env, initial_supply);

        env.events()
            .publish((Symbol::new(&env, "mint"), admin), initial_supply);
    }

    /// Mint new tokens to `to`. Admin only.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) {
        caller.require_auth();
        require_admin(&env, &caller);
        check_nonnegative(&env, amount);

        receive_balance(&env, &to, amount);
        set_total_supply(&env, checked_add(&env, get_total_supply(&env), amount));

        env.events()
            .publish((Symbol::new(&env, "mint"), to), amount);
    }

    /// Add a principal to the fee-exemption set. Admin only, idempotent.
    pub fn add_excluded_from_fees(env: Env, caller: Address, account: Address) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_fee_exempt(&env, &account, true);
    }

    /// Remove a principal from the fee-exemption set. Admin only, idempotent.
    pub fn remove_excluded_from_fees(env: Env, caller: Address, account: Address) {
        caller.require_auth();
        require_admin(&env, &caller);
        set_fee_exempt(&env, &account, false);
    }

    // === View Functions ===

    pub fn is_excluded_from_fees(env: Env, account: Address) -> bool {
        is_fee_exempt(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn fee_bps(env: Env) -> u32 {
        get_config(&env).fee_bps
    }

    pub fn admin(env: Env) -> Address {
        get_config(&env).admin
    }
}

#[contractimpl]
impl token::TokenInterface for FeeToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        live_allowance(&env, &from, &spender)
    }

    /// Unconditionally overwrite the allowance. The classic approve race
    /// (spender consuming the old allowance before the new one lands) is an
    /// accepted property of this interface, not a bug.
    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative(&env, amount);
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            panic_with_error!(&env, Error::InvalidExpiration);
        }

        set_allowance(&env, &from, &spender, amount, expiration_ledger);

        env.events().publish(
            (Symbol::new(&env, "approve"), from, spender),
            (amount, expiration_ledger),
        );
    }

    fn balance(env: Env, id: Address) -> i128 {
        get_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        let to = to.address();
        transfer_with_fee(&env, &from, &to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        spend_allowance(&env, &from, &spender, amount);
        transfer_with_fee(&env, &from, &to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        burn_balance(&env, &from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        spend_allowance(&env, &from, &spender, amount);
        burn_balance(&env, &from, amount);
    }

    fn decimals(env: Env) -> u32 {
        get_config(&env).decimals
    }

    fn name(env: Env) -> String {
        get_config(&env).name
    }

    fn symbol(env: Env) -> String {
        get_config(&env).symbol
    }
}

/// Debit `from`, credit `to` net of the transfer fee, burn the fee.
///
/// The fee applies only when neither party is fee-exempt; it is removed
/// from total supply at the instant it is charged, which keeps the sum of
/// all balances equal to the total supply.
fn transfer_with_fee(env: &Env, from: &Address, to: &Address, amount: i128) {
    check_nonnegative(env, amount);
    spend_balance(env, from, amount);

    let fee = if is_fee_exempt(env, from) || is_fee_exempt(env, to) {
        0
    } else {
        transfer_fee(env, amount)
    };
    let net = amount - fee;
    receive_balance(env, to, net);

    if fee > 0 {
        set_total_supply(env, get_total_supply(env) - fee);
        env.events()
            .publish((Symbol::new(env, "fee_burned"), from.clone()), fee);
    }
    env.events().publish(
        (Symbol::new(env, "transfer"), from.clone(), to.clone()),
        net,
    );
}

fn burn_balance(env: &Env, from: &Address, amount: i128) {
    check_nonnegative(env, amount);
    spend_balance(env, from, amount);
    set_total_supply(env, get_total_supply(env) - amount);

    env.events()
        .publish((Symbol::new(env, "burn"), from.clone()), amount);
}

fn spend_balance(env: &Env, id: &Address, amount: i128) {
    let balance = get_balance(env, id);
    if balance < amount {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    set_balance(env, id, balance - amount);
}

fn receive_balance(env: &Env, id: &Address, amount: i128) {
    set_balance(env, id, checked_add(env, get_balance(env, id), amount));
}

fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    check_nonnegative(env, amount);
    if amount == 0 {
        return;
    }
    let live = live_allowance(env, from, spender);
    if live < amount {
        panic_with_error!(env, Error::InsufficientAllowance);
    }
    // The entry exists and is unexpired, otherwise `live` would be zero
    let expiration = storage::get_allowance(env, from, spender)
        .map(|a| a.expiration_ledger)
        .unwrap_or(0);
    set_allowance(env, from, spender, live - amount, expiration);
}

fn transfer_fee(env: &Env, amount: i128) -> i128 {
    let config = get_config(env);
    match amount.fixed_mul_floor(config.fee_bps as i128, BPS_DENOMINATOR) {
        Some(fee) => fee,
        None => panic_with_error!(env, Error::Overflow),
    }
}

fn require_admin(env: &Env, caller: &Address) {
    if *caller != get_config(env).admin {
        panic_with_error!(env, Error::Unauthorized);
    }
}

fn check_nonnegative(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, Error::NegativeAmount);
    }
}

fn checked_add(env: &Env, a: i128, b: i128) -> i128 {
    match a.checked_add(b) {
        Some(v) => v,
        None => panic_with_error!(env, Error::Overflow),
    }
}
