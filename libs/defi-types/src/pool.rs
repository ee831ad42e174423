use soroban_sdk::{contracttype, Address};

/// Liquidity pool configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Deployer; recorded for off-chain tooling, carries no special power
    pub admin: Address,
    /// Native-asset side of the pool (the native Stellar Asset Contract)
    pub native_token: Address,
    /// Paired fungible token side of the pool
    pub token: Address,
    /// Swap fee in basis points, kept inside the pool as provider yield
    pub swap_fee_bps: u32,
}

/// Pool reserves and outstanding share supply.
///
/// Either all three fields are zero (empty pool) or all are strictly
/// positive; the sum of per-provider share balances equals `total_shares`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reserves {
    /// Held quantity of the native asset
    pub native: i128,
    /// Held quantity of the paired token
    pub token: i128,
    /// Outstanding provider shares
    pub total_shares: i128,
}

impl Reserves {
    pub fn empty() -> Self {
        Self {
            native: 0,
            token: 0,
            total_shares: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }
}
