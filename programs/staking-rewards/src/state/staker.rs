use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::rewards;

/// Per-user staking position
/// PDA: ["staker", staking_pool, owner]
#[account]
#[derive(Default)]
pub struct Staker {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position
    pub owner: Pubkey,

    /// Amount of stake tokens locked
    pub staked_amount: u64,

    /// Pool reward_per_token at this position's last settlement
    /// pending = staked_amount * (pool.reward_per_token - reward_per_token_paid) / PRECISION
    pub reward_per_token_paid: u128,

    /// Settled rewards not yet paid out
    pub rewards_owed: u64,

    /// Total rewards claimed (lifetime)
    pub rewards_claimed: u64,

    /// Timestamp of first stake
    pub first_stake_time: i64,

    /// Timestamp of last stake or withdraw
    pub last_stake_time: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // staked_amount
        16 + // reward_per_token_paid (u128)
        8 +  // rewards_owed
        8 +  // rewards_claimed
        8 +  // first_stake_time
        8 +  // last_stake_time
        1 +  // bump
        32;  // padding for future fields

    /// Pending reward since the last checkpoint, not yet moved into rewards_owed
    pub fn earned(&self, pool_reward_per_token: u128) -> Result<u64> {
        rewards::earned(
            self.staked_amount,
            pool_reward_per_token,
            self.reward_per_token_paid,
            0,
        )
    }

    /// Everything a claim at `pool_reward_per_token` would pay: owed plus pending
    pub fn claimable(&self, pool_reward_per_token: u128) -> Result<u64> {
        rewards::earned(
            self.staked_amount,
            pool_reward_per_token,
            self.reward_per_token_paid,
            self.rewards_owed,
        )
    }

    /// Move pending rewards into rewards_owed and checkpoint the accumulator
    ///
    /// Must run before staked_amount changes: the pending amount is priced
    /// at the stake held over the interval being closed.
    pub fn settle(&mut self, pool_reward_per_token: u128) -> Result<()> {
        self.rewards_owed = self.claimable(pool_reward_per_token)?;
        self.reward_per_token_paid = pool_reward_per_token;
        Ok(())
    }

    /// Record a stake action
    pub fn record_stake(&mut self, amount: u64, now: i64) -> Result<()> {
        if self.staked_amount == 0 && self.first_stake_time == 0 {
            self.first_stake_time = now;
        }

        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.last_stake_time = now;

        Ok(())
    }

    /// Record a withdraw action
    pub fn record_withdraw(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(
            self.staked_amount >= amount,
            StakingError::ExceedsStakedAmount
        );

        self.staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        self.last_stake_time = now;

        Ok(())
    }

    /// Zero rewards_owed and return it for payout
    pub fn take_rewards(&mut self) -> Result<u64> {
        let owed = self.rewards_owed;
        self.rewards_owed = 0;

        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(owed)
            .ok_or(StakingError::MathOverflow)?;

        Ok(owed)
    }

    /// No stake and nothing owed; safe to close
    pub fn is_empty(&self) -> bool {
        self.staked_amount == 0 && self.rewards_owed == 0
    }
}
