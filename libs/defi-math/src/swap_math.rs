use crate::full_math::{add, mul_div};
use defi_types::{Error, BPS_DENOMINATOR};
use soroban_sdk::{panic_with_error, Env};

/// Constant-product swap output for a given input, after deducting the fee
/// from the input side.
///
/// `out = reserve_out * in_after_fee / (reserve_in + in_after_fee)` where
/// `in_after_fee = amount_in * (10_000 - fee_bps) / 10_000`. Both divisions
/// floor, so the output is always strictly less than `reserve_out`. The
/// caller is expected to have rejected empty reserves already; a zero
/// `reserve_in` still cannot divide by zero here because the fee-reduced
/// input joins the denominator.
pub fn amount_out(
    env: &Env,
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> i128 {
    if fee_bps as i128 >= BPS_DENOMINATOR {
        panic_with_error!(env, Error::InvalidConfig);
    }
    let in_after_fee = mul_div(env, amount_in, BPS_DENOMINATOR - fee_bps as i128, BPS_DENOMINATOR);
    mul_div(
        env,
        reserve_out,
        in_after_fee,
        add(env, reserve_in, in_after_fee),
    )
}
