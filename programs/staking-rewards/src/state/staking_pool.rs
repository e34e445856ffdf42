use anchor_lang::prelude::*;

use crate::constants::DEFAULT_REWARDS_DURATION;
use crate::error::StakingError;
use crate::rewards;

/// Where the pool sits in its reward schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodStatus {
    /// No reward has ever been notified
    Uninitialized,
    /// Emitting at `reward_rate` until `period_finish`
    Active,
    /// Past `period_finish`; accrued rewards remain claimable
    Expired,
}

/// Global staking pool state
/// PDA: ["staking_pool", stake_mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Only identity allowed to notify new rewards (fixed at initialization)
    pub rewards_distribution: Pubkey,

    /// Token staked by participants
    pub stake_mint: Pubkey,

    /// Token paid out as reward
    pub reward_mint: Pubkey,

    /// Vault holding staked tokens
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Vault holding funded rewards
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Sum of every staker's staked_amount
    pub total_staked: u64,

    /// Reward units emitted per second during the current period
    pub reward_rate: u64,

    /// Accumulated rewards per staked unit (scaled by REWARD_PRECISION)
    pub reward_per_token_stored: u128,

    /// Last time reward_per_token_stored was brought current
    pub last_update_time: i64,

    /// End of the current emission window
    pub period_finish: i64,

    /// Length of each emission window in seconds
    pub rewards_duration: u64,

    /// Total rewards notified (lifetime)
    pub total_rewards_funded: u64,

    /// Total rewards paid out (lifetime)
    pub total_rewards_paid: u64,

    /// Number of accounts with a non-zero stake
    pub staker_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // rewards_distribution
        32 + // stake_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_staked
        8 +  // reward_rate
        16 + // reward_per_token_stored (u128)
        8 +  // last_update_time
        8 +  // period_finish
        8 +  // rewards_duration
        8 +  // total_rewards_funded
        8 +  // total_rewards_paid
        8 +  // staker_count
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        rewards::last_time_reward_applicable(now, self.period_finish)
    }

    /// reward_per_token as of `now`, without writing it back
    pub fn reward_per_token(&self, now: i64) -> Result<u128> {
        rewards::reward_per_token(
            self.reward_per_token_stored,
            self.total_staked,
            self.reward_rate,
            self.last_update_time,
            self.last_time_reward_applicable(now),
        )
    }

    /// Bring the accumulator current and return the new reward_per_token
    ///
    /// Must run before total_staked or reward_rate change, so the interval
    /// that just ended is credited at the old values.
    pub fn update_reward(&mut self, now: i64) -> Result<u128> {
        self.reward_per_token_stored = self.reward_per_token(now)?;
        self.last_update_time = self.last_time_reward_applicable(now);
        Ok(self.reward_per_token_stored)
    }

    pub fn add_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;
        Ok(())
    }

    /// Start a new reward period of `rewards_duration` seconds at `now`
    ///
    /// `funded_balance` is what the reward vault will hold once `reward` has
    /// been pulled in. The resulting rate must be payable from it.
    pub fn notify_reward_amount(&mut self, reward: u64, now: i64, funded_balance: u64) -> Result<()> {
        self.update_reward(now)?;

        let reward_rate = rewards::next_reward_rate(
            reward,
            now,
            self.period_finish,
            self.reward_rate,
            self.rewards_duration,
        )?;

        require!(
            reward_rate <= funded_balance / self.rewards_duration,
            StakingError::InsufficientRewardFunding
        );

        self.reward_rate = reward_rate;
        self.last_update_time = now;
        self.period_finish = now
            .checked_add(
                i64::try_from(self.rewards_duration).map_err(|_| error!(StakingError::MathOverflow))?,
            )
            .ok_or(StakingError::MathOverflow)?;

        self.total_rewards_funded = self
            .total_rewards_funded
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;

        Ok(())
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.total_rewards_paid = self
            .total_rewards_paid
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    /// Period length for a new pool; `None` falls back to one week
    pub fn resolve_rewards_duration(requested: Option<u64>) -> Result<u64> {
        let duration = requested.unwrap_or(DEFAULT_REWARDS_DURATION);
        require!(duration > 0, StakingError::InvalidRewardsDuration);
        require!(
            i64::try_from(duration).is_ok(),
            StakingError::InvalidRewardsDuration
        );
        Ok(duration)
    }

    /// reward_rate * rewards_duration
    pub fn reward_for_duration(&self) -> Result<u64> {
        rewards::reward_for_duration(self.reward_rate, self.rewards_duration)
    }

    pub fn period_status(&self, now: i64) -> PeriodStatus {
        if self.period_finish == 0 {
            PeriodStatus::Uninitialized
        } else if now < self.period_finish {
            PeriodStatus::Active
        } else {
            PeriodStatus::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REWARD_PRECISION;

    #[test]
    fn rewards_duration_defaults_to_one_week() {
        assert_eq!(StakingPool::resolve_rewards_duration(None).unwrap(), 604_800);
        assert_eq!(StakingPool::resolve_rewards_duration(Some(60)).unwrap(), 60);
    }

    #[test]
    fn rewards_duration_must_be_positive_and_fit_i64() {
        for bad in [0, u64::MAX] {
            let err = StakingPool::resolve_rewards_duration(Some(bad)).unwrap_err();
            assert_eq!(err, StakingError::InvalidRewardsDuration.into());
        }
    }

    fn pool(duration: u64) -> StakingPool {
        StakingPool {
            rewards_duration: duration,
            ..Default::default()
        }
    }

    #[test]
    fn accumulator_frozen_before_first_notification() {
        let mut p = pool(100);
        p.total_staked = 10;
        assert_eq!(p.update_reward(1_000).unwrap(), 0);
        assert_eq!(p.last_update_time, 0);
        assert_eq!(p.period_status(1_000), PeriodStatus::Uninitialized);
    }

    #[test]
    fn notify_starts_period() {
        let mut p = pool(100);
        p.notify_reward_amount(1_000, 50, 1_000).unwrap();
        assert_eq!(p.reward_rate, 10);
        assert_eq!(p.last_update_time, 50);
        assert_eq!(p.period_finish, 150);
        assert_eq!(p.total_rewards_funded, 1_000);
        assert_eq!(p.period_status(100), PeriodStatus::Active);
        assert_eq!(p.period_status(150), PeriodStatus::Expired);
    }

    #[test]
    fn notify_rejects_underfunded_rate() {
        let mut p = pool(100);
        let err = p.notify_reward_amount(1_000, 0, 999).unwrap_err();
        assert_eq!(err, StakingError::InsufficientRewardFunding.into());
    }

    #[test]
    fn notify_settles_before_changing_rate() {
        let mut p = pool(100);
        p.total_staked = 10;
        p.notify_reward_amount(1_000, 0, 1_000).unwrap();

        // 40s at 10/s over 10 staked = 40 per unit
        p.notify_reward_amount(600, 40, 1_600).unwrap();
        assert_eq!(p.reward_per_token_stored, 40 * REWARD_PRECISION);
        // 60s * 10 left over + 600 new over 100s
        assert_eq!(p.reward_rate, 12);
        assert_eq!(p.period_finish, 140);
    }

    #[test]
    fn accrual_stops_at_period_finish() {
        let mut p = pool(100);
        p.total_staked = 1;
        p.notify_reward_amount(1_000, 0, 1_000).unwrap();
        p.update_reward(500).unwrap();
        assert_eq!(p.reward_per_token_stored, 1_000 * REWARD_PRECISION);
        assert_eq!(p.last_update_time, 100);

        let again = p.update_reward(900).unwrap();
        assert_eq!(again, 1_000 * REWARD_PRECISION);
    }

    #[test]
    fn remove_stake_cannot_underflow() {
        let mut p = pool(100);
        p.add_stake(5).unwrap();
        let err = p.remove_stake(6).unwrap_err();
        assert_eq!(err, StakingError::MathUnderflow.into());
        assert_eq!(p.total_staked, 5);
    }
}
