use defi_types::Error;
use soroban_sdk::{panic_with_error, token, Address, Env};

/// Pull `amount` of `asset` from `from` into the vault, under `from`'s
/// authorization of this invocation. A failed leg surfaces as
/// `TransferFailed` and aborts the whole operation.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) {
    let client = token::Client::new(env, asset);
    if client
        .try_transfer(from, &env.current_contract_address(), &amount)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }
}

/// Pay `amount` of `asset` out of the vault to `to`. An underfunded vault
/// fails here rather than clamping the payout.
pub fn payout(env: &Env, asset: &Address, to: &Address, amount: i128) {
    let client = token::Client::new(env, asset);
    if client
        .try_transfer(&env.current_contract_address(), to, &amount)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }
}
