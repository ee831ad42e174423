//! Pure predicates over pool state, checked via `debug_assert!` after every
//! state transition and reused by the test suite.

use defi_types::Reserves;
use soroban_sdk::{Env, U256};

/// Either every field of the reserve set is zero (empty pool) or every
/// field is strictly positive.
pub fn reserves_coherent(reserves: &Reserves) -> bool {
    if reserves.total_shares == 0 {
        reserves.native == 0 && reserves.token == 0
    } else {
        reserves.native > 0 && reserves.token > 0 && reserves.total_shares > 0
    }
}

/// The constant product `native * token` must never decrease across a
/// swap; the retained fee makes it strictly increase, which is what funds
/// liquidity providers.
pub fn product_non_decreasing(env: &Env, before: &Reserves, after: &Reserves) -> bool {
    product(env, after) >= product(env, before)
}

fn product(env: &Env, reserves: &Reserves) -> U256 {
    U256::from_u128(env, reserves.native as u128).mul(&U256::from_u128(env, reserves.token as u128))
}
