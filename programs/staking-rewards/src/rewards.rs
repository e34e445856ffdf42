// =============================================================================
// Reward Math
// =============================================================================
// Pure fixed-point helpers behind the reward accumulator. Nothing here reads
// the clock or touches accounts; callers pass `now` and the pool's counters.
//
//   reward_per_token += elapsed * reward_rate * PRECISION / total_staked
//   earned            = staked * (reward_per_token - paid) / PRECISION + owed
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Latest moment rewards are still being emitted: `min(now, period_finish)`
pub fn last_time_reward_applicable(now: i64, period_finish: i64) -> i64 {
    now.min(period_finish)
}

/// Seconds of emission between `last_update_time` and `applicable_time`.
/// Zero when the pool is already caught up or no period has started.
pub fn elapsed_seconds(last_update_time: i64, applicable_time: i64) -> u64 {
    applicable_time
        .saturating_sub(last_update_time)
        .max(0) as u64
}

/// Advance the cumulative reward per staked unit
///
/// Returns `stored` unchanged while nothing is staked: the interval's
/// emission has nobody to go to and is left in the reward vault.
pub fn reward_per_token(
    stored: u128,
    total_staked: u64,
    reward_rate: u64,
    last_update_time: i64,
    applicable_time: i64,
) -> Result<u128> {
    if total_staked == 0 {
        return Ok(stored);
    }

    let elapsed = elapsed_seconds(last_update_time, applicable_time);
    if elapsed == 0 || reward_rate == 0 {
        return Ok(stored);
    }

    let increase = (elapsed as u128)
        .checked_mul(reward_rate as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(REWARD_PRECISION)
        .ok_or(StakingError::MathOverflow)?
        .checked_div(total_staked as u128)
        .ok_or(StakingError::DivisionByZero)?;

    Ok(stored
        .checked_add(increase)
        .ok_or(StakingError::MathOverflow)?)
}

/// Reward accrued by `staked` since the `paid` checkpoint, on top of `owed`
pub fn earned(staked: u64, reward_per_token: u128, paid: u128, owed: u64) -> Result<u64> {
    let delta = reward_per_token
        .checked_sub(paid)
        .ok_or(StakingError::MathUnderflow)?;

    let accrued = (staked as u128)
        .checked_mul(delta)
        .ok_or(StakingError::MathOverflow)?
        / REWARD_PRECISION;

    let total = accrued
        .checked_add(owed as u128)
        .ok_or(StakingError::MathOverflow)?;

    u64::try_from(total).map_err(|_| error!(StakingError::MathOverflow))
}

/// Rate for a new period of `duration` seconds starting at `now`
///
/// If the current period is still running, whatever it has not emitted yet
/// is folded into the new rate. Integer division truncates toward zero.
pub fn next_reward_rate(
    reward: u64,
    now: i64,
    period_finish: i64,
    current_rate: u64,
    duration: u64,
) -> Result<u64> {
    require!(duration > 0, StakingError::InvalidRewardsDuration);

    let mut budget = reward as u128;
    if now < period_finish {
        let remaining = elapsed_seconds(now, period_finish) as u128;
        let leftover = remaining
            .checked_mul(current_rate as u128)
            .ok_or(StakingError::MathOverflow)?;
        budget = budget
            .checked_add(leftover)
            .ok_or(StakingError::MathOverflow)?;
    }

    let rate = budget / duration as u128;
    u64::try_from(rate).map_err(|_| error!(StakingError::MathOverflow))
}

/// Total emission of one full period at `reward_rate`
pub fn reward_for_duration(reward_rate: u64, duration: u64) -> Result<u64> {
    reward_rate
        .checked_mul(duration)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}
