use crate::full_math::mul_div;
use defi_types::Reserves;
use soroban_sdk::Env;

/// Shares minted for a deposit into a seeded pool.
///
/// Uses the minimum of the two deposit ratios so a lopsided deposit can
/// never dilute existing holders; the excess of the larger-ratio asset is
/// kept by the pool without minting shares for it.
pub fn shares_for_deposit(
    env: &Env,
    native_amount: i128,
    token_amount: i128,
    reserves: &Reserves,
) -> i128 {
    let by_native = mul_div(env, reserves.total_shares, native_amount, reserves.native);
    let by_token = mul_div(env, reserves.total_shares, token_amount, reserves.token);
    by_native.min(by_token)
}

/// Proportional redemption for a share amount. Both divisions floor, so
/// redemption dust stays in the pool for the remaining providers.
pub fn amounts_for_shares(env: &Env, shares: i128, reserves: &Reserves) -> (i128, i128) {
    let native_out = mul_div(env, reserves.native, shares, reserves.total_shares);
    let token_out = mul_div(env, reserves.token, shares, reserves.total_shares);
    (native_out, token_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn seeded(native: i128, token: i128, total_shares: i128) -> Reserves {
        Reserves {
            native,
            token,
            total_shares,
        }
    }

    #[test]
    fn test_shares_balanced_deposit() {
        let env = Env::default();
        let r = seeded(1_000, 5_000, 1_000);
        // Depositing exactly the pool ratio mints proportionally
        assert_eq!(shares_for_deposit(&env, 500, 2_500, &r), 500);
    }

    #[test]
    fn test_shares_lopsided_deposit_takes_min_ratio() {
        let env = Env::default();
        let r = seeded(1_000, 5_000, 1_000);
        // Twice as much token as the ratio calls for: native side governs
        assert_eq!(shares_for_deposit(&env, 500, 5_000, &r), 500);
        // And the other way around
        assert_eq!(shares_for_deposit(&env, 1_000, 2_500, &r), 500);
    }

    #[test]
    fn test_shares_tiny_deposit_floors_to_zero() {
        let env = Env::default();
        let r = seeded(1_000_000, 5_000_000, 1_000);
        assert_eq!(shares_for_deposit(&env, 999, 999, &r), 0);
    }

    #[test]
    fn test_amounts_for_all_shares_returns_everything() {
        let env = Env::default();
        let r = seeded(1_000, 5_000, 1_000);
        assert_eq!(amounts_for_shares(&env, 1_000, &r), (1_000, 5_000));
    }

    #[test]
    fn test_amounts_for_half_shares() {
        let env = Env::default();
        let r = seeded(1_000, 5_000, 1_000);
        assert_eq!(amounts_for_shares(&env, 500, &r), (500, 2_500));
    }

    #[test]
    fn test_amounts_round_down() {
        let env = Env::default();
        let r = seeded(10, 11, 3);
        // 10 * 1 / 3 = 3.33 -> 3, 11 * 1 / 3 = 3.66 -> 3
        assert_eq!(amounts_for_shares(&env, 1, &r), (3, 3));
    }
}
