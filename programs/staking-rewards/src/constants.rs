// =============================================================================
// Staking Rewards Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Precision for reward_per_token (18 decimals)
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Default length of a reward period
pub const DEFAULT_REWARDS_DURATION: u64 = 604_800; // 7 days

// =============================================================================
// Arithmetic bounds
// =============================================================================
// Stake and reward amounts are u64. A notification is rejected unless the
// reward vault covers reward_rate * rewards_duration, so within one period
//   elapsed * reward_rate <= u64::MAX
// and the accumulator step
//   elapsed * reward_rate * REWARD_PRECISION <= u64::MAX * 10^18 ~ 1.8e37
// stays below u128::MAX (~3.4e38). Everything is still checked.
