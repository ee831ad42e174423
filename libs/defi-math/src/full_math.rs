use defi_types::Error;
use soroban_sdk::{panic_with_error, Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
///
/// All inputs must be non-negative; every monetary quantity in the
/// workspace is an unsigned value carried in i128.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> i128 {
    if a < 0 || b < 0 || denominator < 0 {
        panic_with_error!(env, Error::NegativeAmount);
    }
    if denominator == 0 {
        panic_with_error!(env, Error::DivisionByZero);
    }

    let a_256 = U256::from_u128(env, a as u128);
    let b_256 = U256::from_u128(env, b as u128);
    let denom_256 = U256::from_u128(env, denominator as u128);

    let result = a_256.mul(&b_256).div(&denom_256);
    narrow(env, &result)
}

/// Checked i128 addition
pub fn add(env: &Env, a: i128, b: i128) -> i128 {
    match a.checked_add(b) {
        Some(v) => v,
        None => panic_with_error!(env, Error::Overflow),
    }
}

/// Checked i128 subtraction; the result must stay non-negative
pub fn sub(env: &Env, a: i128, b: i128) -> i128 {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => v,
        _ => panic_with_error!(env, Error::Overflow),
    }
}

/// Convert U256 to i128, panics if the value does not fit
fn narrow(env: &Env, value: &U256) -> i128 {
    match value.to_u128() {
        Some(v) if v <= i128::MAX as u128 => v as i128,
        _ => panic_with_error!(env, Error::Overflow),
    }
}
