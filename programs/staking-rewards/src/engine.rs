// =============================================================================
// Rewards Engine
// =============================================================================
// Composes the pool accumulator, the per-staker ledger, and the reward
// schedule into the public operations. Every operation:
//
// 1. settles the accumulator (and the caller's position) up to `now`
// 2. commits its own effects to pool and staker state
// 3. only then calls out to the token gateway
//
// If any step fails, pool and staker are restored to their state before the
// call, so a failed operation leaves nothing half-applied.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::gateway::TokenGateway;
use crate::state::{Staker, StakingPool};

/// Bring the pool accumulator current and, if given, settle one staker
pub fn settle(pool: &mut StakingPool, staker: Option<&mut Staker>, now: i64) -> Result<u128> {
    let reward_per_token = pool.update_reward(now)?;
    if let Some(staker) = staker {
        staker.settle(reward_per_token)?;
    }
    Ok(reward_per_token)
}

fn atomically<T>(
    pool: &mut StakingPool,
    staker: &mut Staker,
    op: impl FnOnce(&mut StakingPool, &mut Staker) -> Result<T>,
) -> Result<T> {
    let pool_before = pool.clone();
    let staker_before = staker.clone();

    match op(&mut *pool, &mut *staker) {
        Ok(value) => Ok(value),
        Err(err) => {
            *pool = pool_before;
            *staker = staker_before;
            Err(err)
        }
    }
}

fn commit_stake(pool: &mut StakingPool, staker: &mut Staker, amount: u64, now: i64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let is_new_position = staker.staked_amount == 0;

    settle(pool, Some(&mut *staker), now)?;
    staker.record_stake(amount, now)?;
    pool.add_stake(amount)?;

    if is_new_position {
        pool.staker_count = pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    Ok(())
}

fn commit_withdraw(
    pool: &mut StakingPool,
    staker: &mut Staker,
    amount: u64,
    now: i64,
) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);
    require!(
        amount <= staker.staked_amount,
        StakingError::ExceedsStakedAmount
    );

    settle(pool, Some(&mut *staker), now)?;
    staker.record_withdraw(amount, now)?;
    pool.remove_stake(amount)?;

    if staker.staked_amount == 0 {
        pool.staker_count = pool
            .staker_count
            .checked_sub(1)
            .ok_or(StakingError::MathUnderflow)?;
    }

    Ok(())
}

/// Settle and zero the staker's owed rewards. Returns the amount to pay.
fn commit_reward(pool: &mut StakingPool, staker: &mut Staker, now: i64) -> Result<u64> {
    settle(pool, Some(&mut *staker), now)?;

    let reward = staker.take_rewards()?;
    if reward > 0 {
        pool.record_payout(reward)?;
    }
    Ok(reward)
}

fn pay_reward<G: TokenGateway>(reward_token: &mut G, reward: u64) -> Result<()> {
    if reward == 0 {
        return Ok(());
    }
    reward_token.transfer(reward)
}

/// Public operations over one staking pool at a fixed point in time
pub struct RewardsEngine<'a> {
    pool: &'a mut StakingPool,
    now: i64,
}

impl<'a> RewardsEngine<'a> {
    pub fn new(pool: &'a mut StakingPool, now: i64) -> Self {
        Self { pool, now }
    }

    /// Lock `amount` of the stake token for `staker`
    pub fn stake<G: TokenGateway>(
        &mut self,
        staker: &mut Staker,
        amount: u64,
        stake_token: &mut G,
    ) -> Result<()> {
        let now = self.now;
        atomically(self.pool, staker, |pool, staker| {
            commit_stake(pool, staker, amount, now)?;
            stake_token.transfer_from(amount)
        })
    }

    /// Return `amount` of locked stake to `staker`
    pub fn withdraw<G: TokenGateway>(
        &mut self,
        staker: &mut Staker,
        amount: u64,
        stake_token: &mut G,
    ) -> Result<()> {
        let now = self.now;
        atomically(self.pool, staker, |pool, staker| {
            commit_withdraw(pool, staker, amount, now)?;
            stake_token.transfer(amount)
        })
    }

    /// Pay out everything owed to `staker`. Returns the amount paid; zero is a no-op.
    pub fn get_reward<G: TokenGateway>(
        &mut self,
        staker: &mut Staker,
        reward_token: &mut G,
    ) -> Result<u64> {
        let now = self.now;
        atomically(self.pool, staker, |pool, staker| {
            let reward = commit_reward(pool, staker, now)?;
            pay_reward(reward_token, reward)?;
            Ok(reward)
        })
    }

    /// Withdraw the whole stake and claim all rewards in one step.
    /// Returns `(withdrawn, reward)`.
    pub fn exit<S: TokenGateway, R: TokenGateway>(
        &mut self,
        staker: &mut Staker,
        stake_token: &mut S,
        reward_token: &mut R,
    ) -> Result<(u64, u64)> {
        let now = self.now;
        atomically(self.pool, staker, |pool, staker| {
            let amount = staker.staked_amount;
            commit_withdraw(pool, staker, amount, now)?;
            let reward = commit_reward(pool, staker, now)?;

            // Both commits land before either transfer; custody for the
            // stake return is checked before anything moves
            require!(
                stake_token.custody_balance() >= amount,
                StakingError::InsufficientBalance
            );
            pay_reward(reward_token, reward)?;
            stake_token.transfer(amount)?;
            Ok((amount, reward))
        })
    }

    /// Fund a new reward period with `reward`, pulled from `caller`
    pub fn notify_reward_amount<G: TokenGateway>(
        &mut self,
        caller: &Pubkey,
        reward: u64,
        reward_token: &mut G,
    ) -> Result<()> {
        require_keys_eq!(
            *caller,
            self.pool.rewards_distribution,
            StakingError::Unauthorized
        );

        let funded_balance = reward_token
            .custody_balance()
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;

        let pool_before = self.pool.clone();
        let result = self
            .pool
            .notify_reward_amount(reward, self.now, funded_balance)
            .and_then(|_| {
                if reward > 0 {
                    reward_token.transfer_from(reward)
                } else {
                    Ok(())
                }
            });

        if result.is_err() {
            *self.pool = pool_before;
        }
        result
    }

    /// Settle only the pool accumulator
    pub fn update_reward(&mut self) -> Result<u128> {
        settle(self.pool, None, self.now)
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn balance_of(&self, staker: &Staker) -> u64 {
        staker.staked_amount
    }

    pub fn total_supply(&self) -> u64 {
        self.pool.total_staked
    }

    pub fn reward_rate(&self) -> u64 {
        self.pool.reward_rate
    }

    pub fn last_time_reward_applicable(&self) -> i64 {
        self.pool.last_time_reward_applicable(self.now)
    }

    pub fn reward_per_token(&self) -> Result<u128> {
        self.pool.reward_per_token(self.now)
    }

    /// Reward accrued since the staker's last settlement, excluding `rewards_owed`
    pub fn earned(&self, staker: &Staker) -> Result<u64> {
        staker.earned(self.pool.reward_per_token(self.now)?)
    }

    /// What `get_reward` would pay `staker` right now
    pub fn claimable(&self, staker: &Staker) -> Result<u64> {
        staker.claimable(self.pool.reward_per_token(self.now)?)
    }

    pub fn reward_for_duration(&self) -> Result<u64> {
        self.pool.reward_for_duration()
    }
}
