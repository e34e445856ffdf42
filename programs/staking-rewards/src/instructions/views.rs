// =============================================================================
// Read-only views
// =============================================================================
// Returned to the caller as instruction return data. None of these write
// to the pool or staker accounts.
// =============================================================================

use anchor_lang::prelude::*;

use crate::constants::{STAKER_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::state::{Staker, StakingPool};

#[derive(Accounts)]
pub struct ViewPool<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

#[derive(Accounts)]
pub struct ViewStaker<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), staker.owner.as_ref()],
        bump = staker.bump
    )]
    pub staker: Account<'info, Staker>,
}

/// Runs `view` against a scratch copy of the pool so nothing is written back
fn with_engine<T>(pool: &StakingPool, view: impl FnOnce(&RewardsEngine) -> Result<T>) -> Result<T> {
    let now = Clock::get()?.unix_timestamp;
    let mut scratch = pool.clone();
    let engine = RewardsEngine::new(&mut scratch, now);
    view(&engine)
}

pub fn handler_balance_of(ctx: Context<ViewStaker>) -> Result<u64> {
    Ok(ctx.accounts.staker.staked_amount)
}

pub fn handler_total_supply(ctx: Context<ViewPool>) -> Result<u64> {
    Ok(ctx.accounts.staking_pool.total_staked)
}

pub fn handler_reward_rate(ctx: Context<ViewPool>) -> Result<u64> {
    Ok(ctx.accounts.staking_pool.reward_rate)
}

pub fn handler_last_time_reward_applicable(ctx: Context<ViewPool>) -> Result<i64> {
    with_engine(&ctx.accounts.staking_pool, |engine| {
        Ok(engine.last_time_reward_applicable())
    })
}

pub fn handler_reward_per_token(ctx: Context<ViewPool>) -> Result<u128> {
    with_engine(&ctx.accounts.staking_pool, |engine| engine.reward_per_token())
}

pub fn handler_earned(ctx: Context<ViewStaker>) -> Result<u64> {
    let staker = &ctx.accounts.staker;
    with_engine(&ctx.accounts.staking_pool, |engine| engine.earned(staker))
}

pub fn handler_claimable(ctx: Context<ViewStaker>) -> Result<u64> {
    let staker = &ctx.accounts.staker;
    with_engine(&ctx.accounts.staking_pool, |engine| engine.claimable(staker))
}

pub fn handler_get_reward_for_duration(ctx: Context<ViewPool>) -> Result<u64> {
    with_engine(&ctx.accounts.staking_pool, |engine| {
        engine.reward_for_duration()
    })
}
