#![no_std]

mod error;
mod pool;
mod stake;

pub use error::*;
pub use pool::*;
pub use stake::*;

/// Basis-point denominator: 10_000 bps == 100%
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Scale factor for the reward-per-share accumulator (1e18 fixed point)
pub const REWARD_PRECISION: i128 = 1_000_000_000_000_000_000;
