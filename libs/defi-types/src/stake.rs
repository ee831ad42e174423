use soroban_sdk::{contracttype, Address, Env, Vec};

/// Vault-wide reward schedule - set at initialization, reward rate
/// adjustable by admins
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Token paid out as staking reward
    pub reward_token: Address,
    /// First ledger sequence at which reward accrues
    pub start_block: u32,
    /// Ledger sequence after which no further reward accrues
    pub end_block: u32,
    /// Reward emitted per ledger, split across pools by weight
    pub reward_per_block: i128,
}

/// One staking pool. Pools are indexed by insertion order; pool 0 is
/// conventionally the native-asset pool.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StakePool {
    /// Asset staked into this pool
    pub staked_token: Address,
    /// Share of the per-block reward relative to the sum of all weights
    pub weight: i128,
    /// Smallest accepted deposit
    pub min_deposit: i128,
    /// Ledgers a queued withdrawal stays locked after an unstake request
    pub unstake_lock_blocks: u32,
    /// Cumulative reward per staked unit, scaled by REWARD_PRECISION.
    /// Monotonically non-decreasing.
    pub acc_reward_per_share: i128,
    /// Ledger sequence of the last accrual checkpoint
    pub last_reward_block: u32,
    /// Total currently staked (excludes amounts queued for withdrawal)
    pub total_staked: i128,
}

/// A queued withdrawal. Claimable once `unlock_block` is reached; never
/// expires.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRequest {
    pub amount: i128,
    pub unlock_block: u32,
}

/// Per-(pool, principal) staking state. `reward_debt` is the accumulator
/// checkpoint from the user's last settlement, scaled like
/// `acc_reward_per_share`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct UserStakeInfo {
    pub staked_amount: i128,
    pub reward_debt: i128,
    pub pending_withdrawals: Vec<WithdrawRequest>,
}

impl UserStakeInfo {
    pub fn new(env: &Env) -> Self {
        Self {
            staked_amount: 0,
            reward_debt: 0,
            pending_withdrawals: Vec::new(env),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staked_amount == 0 && self.pending_withdrawals.is_empty()
    }
}
