#![no_std]

mod invariants;
mod liquidity;
mod storage;
mod swap;
mod transfers;

use defi_types::{Error, PoolConfig, Reserves, BPS_DENOMINATOR};
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env};
use storage::{get_config, get_reserves, get_shares, has_config, set_config, set_reserves};

#[contract]
pub struct LiquidityPool;

#[contractimpl]
impl LiquidityPool {
    /// Initialize an empty pool over a native-asset / token pair.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_token: Address,
        token: Address,
        swap_fee_bps: u32,
    ) {
        if has_config(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if native_token == token {
            panic_with_error!(&env, Error::InvalidConfig);
        }
        if swap_fee_bps as i128 >= BPS_DENOMINATOR {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        let config = PoolConfig {
            admin,
            native_token,
            token,
            swap_fee_bps,
        };
        set_config(&env, &config);
        set_reserves(&env, &Reserves::empty());
    }

    /// Deposit both assets and mint provider shares
    ///
    /// # Returns
    /// Shares minted to the provider
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        token_amount: i128,
        native_amount: i128,
    ) -> i128 {
        provider.require_auth();
        liquidity::add_liquidity(&env, provider, token_amount, native_amount)
    }

    /// Burn shares and withdraw the proportional slice of both reserves
    ///
    /// # Returns
    /// (native_out, token_out) - amounts paid out
    pub fn remove_liquidity(env: Env, provider: Address, shares: i128) -> (i128, i128) {
        provider.require_auth();
        liquidity::remove_liquidity(&env, provider, shares)
    }

    /// Swap the native asset for the paired token
    ///
    /// # Returns
    /// Token amount paid out
    pub fn swap_native_for_token(env: Env, trader: Address, native_in: i128) -> i128 {
        trader.require_auth();
        swap::swap(&env, trader, native_in, true)
    }

    /// Swap the paired token for the native asset
    ///
    /// # Returns
    /// Native amount paid out
    pub fn swap_token_for_native(env: Env, trader: Address, token_in: i128) -> i128 {
        trader.require_auth();
        swap::swap(&env, trader, token_in, false)
    }

    // === View Functions ===

    /// Preview the output a swap would produce right now. Uses the same
    /// computation as the swap entry points.
    pub fn get_swap_price(env: Env, amount_in: i128, native_to_token: bool) -> i128 {
        let config = get_config(&env);
        swap::quote(
            &env,
            &get_reserves(&env),
            amount_in,
            native_to_token,
            config.swap_fee_bps,
        )
    }

    /// Current reserves and share supply snapshot
    pub fn get_pool_info(env: Env) -> Reserves {
        get_reserves(&env)
    }

    /// Shares owned by a provider
    pub fn shares_of(env: Env, provider: Address) -> i128 {
        get_shares(&env, &provider)
    }

    pub fn get_native_token(env: Env) -> Address {
        get_config(&env).native_token
    }

    pub fn get_token(env: Env) -> Address {
        get_config(&env).token
    }

    pub fn get_swap_fee_bps(env: Env) -> u32 {
        get_config(&env).swap_fee_bps
    }

    pub fn get_admin(env: Env) -> Address {
        get_config(&env).admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::token::{StellarAssetClient, TokenClient};
    use soroban_sdk::{Address, Env};

    const FEE_BPS: u32 = 30; // 0.3%
    const FUNDING: i128 = 1_000_000_000;

    fn register_asset(env: &Env, issuer: &Address) -> Address {
        env.register_stellar_asset_contract_v2(issuer.clone())
            .address()
    }

    fn fund(env: &Env, asset: &Address, to: &Address) {
        StellarAssetClient::new(env, asset).mint(to, &FUNDING);
    }

    fn setup(env: &Env) -> (LiquidityPoolClient<'_>, Address, Address, Address) {
        let issuer = Address::generate(env);
        let native = register_asset(env, &issuer);
        let token = register_asset(env, &issuer);

        let contract_id = env.register(LiquidityPool, ());
        let client = LiquidityPoolClient::new(env, &contract_id);
        let admin = Address::generate(env);
        client.initialize(&admin, &native, &token, &FEE_BPS);

        let provider = Address::generate(env);
        fund(env, &native, &provider);
        fund(env, &token, &provider);

        (client, native, token, provider)
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, _provider) = setup(&env);

        assert_eq!(client.get_native_token(), native);
        assert_eq!(client.get_token(), token);
        assert_eq!(client.get_swap_fee_bps(), FEE_BPS);

        let info = client.get_pool_info();
        assert_eq!(info, defi_types::Reserves::empty());
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #11)")]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, _provider) = setup(&env);
        let admin = Address::generate(&env);

        client.initialize(&admin, &native, &token, &FEE_BPS);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #17)")]
    fn test_initialize_identical_assets_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let issuer = Address::generate(&env);
        let native = register_asset(&env, &issuer);

        let contract_id = env.register(LiquidityPool, ());
        let client = LiquidityPoolClient::new(&env, &contract_id);
        let admin = Address::generate(&env);
        client.initialize(&admin, &native, &native, &FEE_BPS);
    }

    // === Add Liquidity Tests ===

    #[test]
    fn test_add_liquidity_seeds_pool() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        let shares = client.add_liquidity(&provider, &5_000, &10_000_000);

        // Initial shares equal the native amount deposited
        assert_eq!(shares, 10_000_000);
        let info = client.get_pool_info();
        assert_eq!(info.native, 10_000_000);
        assert_eq!(info.token, 5_000);
        assert_eq!(info.total_shares, 10_000_000);
        assert_eq!(client.shares_of(&provider), 10_000_000);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #7)")]
    fn test_add_liquidity_zero_token_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        client.add_liquidity(&provider, &0, &10_000_000);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #7)")]
    fn test_add_liquidity_zero_native_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        client.add_liquidity(&provider, &5_000, &0);
    }

    #[test]
    fn test_add_liquidity_proportional_mints_proportionally() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, provider) = setup(&env);
        client.add_liquidity(&provider, &5_000, &10_000_000);

        let second = Address::generate(&env);
        fund(&env, &native, &second);
        fund(&env, &token, &second);

        let shares = client.add_liquidity(&second, &5_000, &10_000_000);
        assert_eq!(shares, 10_000_000);

        let info = client.get_pool_info();
        assert_eq!(info.native, 20_000_000);
        assert_eq!(info.token, 10_000);
        assert_eq!(info.total_shares, 20_000_000);
    }

    #[test]
    fn test_add_liquidity_lopsided_takes_min_ratio() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);
        client.add_liquidity(&provider, &5_000, &10_000_000);

        // Token side is half the pool ratio, so it governs: the excess
        // native stays in the pool without minting shares for it
        let shares = client.add_liquidity(&provider, &2_500, &10_000_000);
        assert_eq!(shares, 5_000_000);

        let info = client.get_pool_info();
        assert_eq!(info.native, 20_000_000);
        assert_eq!(info.token, 7_500);
        assert_eq!(info.total_shares, 15_000_000);
    }

    #[test]
    fn test_share_balances_sum_to_total_shares() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, provider) = setup(&env);
        client.add_liquidity(&provider, &5_000, &10_000_000);

        let second = Address::generate(&env);
        fund(&env, &native, &second);
        fund(&env, &token, &second);
        client.add_liquidity(&second, &3_333, &6_666_000);
        client.remove_liquidity(&provider, &4_000_000);

        let info = client.get_pool_info();
        assert_eq!(
            client.shares_of(&provider) + client.shares_of(&second),
            info.total_shares
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #8)")]
    fn test_add_liquidity_without_funds_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, _token, _provider) = setup(&env);

        // Has native but no paired token: the token leg must fail
        let broke = Address::generate(&env);
        fund(&env, &native, &broke);
        client.add_liquidity(&broke, &5_000, &10_000_000);
    }

    // === Remove Liquidity Tests ===

    #[test]
    fn test_remove_all_liquidity_round_trip() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, provider) = setup(&env);

        let native_client = TokenClient::new(&env, &native);
        let token_client = TokenClient::new(&env, &token);

        let shares = client.add_liquidity(&provider, &5_000, &10_000_000);
        let (native_out, token_out) = client.remove_liquidity(&provider, &shares);

        // Sole provider gets the full deposit back
        assert_eq!(native_out, 10_000_000);
        assert_eq!(token_out, 5_000);
        assert_eq!(native_client.balance(&provider), FUNDING);
        assert_eq!(token_client.balance(&provider), FUNDING);

        // Pool is empty again and can be re-seeded
        let info = client.get_pool_info();
        assert_eq!(info, defi_types::Reserves::empty());
        client.add_liquidity(&provider, &100, &200);
        assert_eq!(client.get_pool_info().total_shares, 200);
    }

    #[test]
    fn test_remove_half_liquidity() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        client.add_liquidity(&provider, &5_000, &10_000_000);
        let (native_out, token_out) = client.remove_liquidity(&provider, &5_000_000);

        assert_eq!(native_out, 5_000_000);
        assert_eq!(token_out, 2_500);
        let info = client.get_pool_info();
        assert_eq!(info.native, 5_000_000);
        assert_eq!(info.token, 2_500);
        assert_eq!(info.total_shares, 5_000_000);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #3)")]
    fn test_remove_more_than_owned_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        client.add_liquidity(&provider, &5_000, &10_000_000);
        client.remove_liquidity(&provider, &10_000_001);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #7)")]
    fn test_remove_zero_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);

        client.add_liquidity(&provider, &5_000, &10_000_000);
        client.remove_liquidity(&provider, &0);
    }

    // === Swap Tests ===

    #[test]
    fn test_swap_native_for_token() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, provider) = setup(&env);
        client.add_liquidity(&provider, &10_000_000, &20_000_000);

        let trader = Address::generate(&env);
        fund(&env, &native, &trader);

        let out = client.swap_native_for_token(&trader, &1_000_000);

        // in_after_fee = 1_000_000 * 9970 / 10000 = 997_000
        // out = 10_000_000 * 997_000 / 20_997_000 = 474_829
        assert_eq!(out, 474_829);
        // Strictly below the no-fee estimate 10_000_000 * 1_000_000 / 21_000_000
        assert!(out < 476_190);

        assert_eq!(TokenClient::new(&env, &token).balance(&trader), out);

        // Full pre-fee input joins the reserves; the fee is provider yield
        let info = client.get_pool_info();
        assert_eq!(info.native, 21_000_000);
        assert_eq!(info.token, 10_000_000 - out);
    }

    #[test]
    fn test_swap_token_for_native() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, token, provider) = setup(&env);
        client.add_liquidity(&provider, &10_000_000, &20_000_000);

        let trader = Address::generate(&env);
        fund(&env, &token, &trader);

        let out = client.swap_token_for_native(&trader, &500_000);
        assert!(out > 0);
        assert_eq!(TokenClient::new(&env, &native).balance(&trader), out);

        let info = client.get_pool_info();
        assert_eq!(info.token, 10_500_000);
        assert_eq!(info.native, 20_000_000 - out);
    }

    #[test]
    fn test_swap_grows_constant_product() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, _token, provider) = setup(&env);
        client.add_liquidity(&provider, &10_000_000, &20_000_000);

        let trader = Address::generate(&env);
        fund(&env, &native, &trader);

        let before = client.get_pool_info();
        client.swap_native_for_token(&trader, &1_000_000);
        let after = client.get_pool_info();

        assert!(after.native * after.token > before.native * before.token);
    }

    #[test]
    fn test_get_swap_price_matches_executed_swap() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, _token, provider) = setup(&env);
        client.add_liquidity(&provider, &10_000_000, &20_000_000);

        let trader = Address::generate(&env);
        fund(&env, &native, &trader);

        let quoted = client.get_swap_price(&1_000_000, &true);
        let executed = client.swap_native_for_token(&trader, &1_000_000);
        assert_eq!(quoted, executed);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #5)")]
    fn test_swap_on_empty_pool_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, native, _token, _provider) = setup(&env);

        let trader = Address::generate(&env);
        fund(&env, &native, &trader);
        client.swap_native_for_token(&trader, &1_000_000);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #7)")]
    fn test_swap_zero_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, provider) = setup(&env);
        client.add_liquidity(&provider, &5_000, &10_000_000);

        client.swap_native_for_token(&provider, &0);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #5)")]
    fn test_get_swap_price_on_empty_pool_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _native, _token, _provider) = setup(&env);

        client.get_swap_price(&1_000_000, &true);
    }
}
