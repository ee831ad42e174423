use soroban_sdk::contracterror;

/// Shared error taxonomy for every contract in the workspace.
///
/// All failures are terminal for the triggering operation: the host rolls
/// back every tentative state change and surfaces the specific code to the
/// caller. Nothing is retried internally.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Sender balance is smaller than the requested amount
    InsufficientBalance = 1,
    /// Live allowance is smaller than the requested amount
    InsufficientAllowance = 2,
    /// Provider owns fewer pool shares than requested
    InsufficientShares = 3,
    /// Staked amount is smaller than the requested unstake
    InsufficientStake = 4,
    /// A swap was attempted against an empty reserve
    InsufficientLiquidity = 5,
    /// Deposit is below the pool's minimum
    BelowMinimum = 6,
    /// Amount is zero (or rounds to zero) where a positive amount is required
    ZeroAmount = 7,
    /// An inner token transfer leg failed
    TransferFailed = 8,
    /// Caller lacks the required role
    Unauthorized = 9,
    /// No queued withdrawal has matured yet
    NothingToWithdraw = 10,
    /// Contract was already initialized
    AlreadyInitialized = 11,
    /// Contract has not been initialized
    NotInitialized = 12,
    /// Arithmetic result does not fit the target width
    Overflow = 13,
    /// Division by zero
    DivisionByZero = 14,
    /// Negative amount where only non-negative values are meaningful
    NegativeAmount = 15,
    /// Allowance expiration ledger is in the past
    InvalidExpiration = 16,
    /// Construction parameter out of range
    InvalidConfig = 17,
    /// Operation is paused by an admin
    Paused = 18,
    /// No pool exists at the given id
    PoolNotFound = 19,
}
