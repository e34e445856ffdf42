use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::error::StakingError;
use crate::events::RewardAdded;
use crate::gateway::SplTokenGateway;
use crate::state::StakingPool;

/// Fund a new reward period
///
/// Called by the rewards distributor. Pulls `amount` of the reward token
/// into the reward vault and restarts the period at a rate that spreads
/// `amount` plus anything left over from the running period across
/// `rewards_duration` seconds.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of reward tokens to add
///
/// # Flow
/// 1. Settle the pool accumulator at the old rate
/// 2. Compute the new rate and check the reward vault can cover it
/// 3. Restart the period at now
/// 4. Pull the reward into the reward vault (pool PDA as delegate)
///
#[derive(Accounts)]
pub struct NotifyRewardAmount<'info> {
    /// Rewards distributor
    #[account(mut)]
    pub distributor: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Source of rewards; must be owned by the distributor
    #[account(
        mut,
        token::mint = reward_mint,
        constraint = reward_source.owner == distributor.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub reward_source: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_notify_reward_amount(mut ctx: Context<NotifyRewardAmount>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let stake_mint = accounts.staking_pool.stake_mint;
    let pool_bump = [accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, stake_mint.as_ref(), &pool_bump];
    let signer_seeds = &[seeds];

    let mut reward_token = SplTokenGateway::new(
        accounts.token_program.to_account_info(),
        &accounts.reward_vault,
        &accounts.reward_source,
        accounts.staking_pool.to_account_info(),
        signer_seeds,
    );

    let status_before = accounts.staking_pool.period_status(now);

    RewardsEngine::new(&mut accounts.staking_pool, now).notify_reward_amount(
        &accounts.distributor.key(),
        amount,
        &mut reward_token,
    )?;

    let staking_pool = &accounts.staking_pool;
    emit!(RewardAdded {
        reward: amount,
        reward_rate: staking_pool.reward_rate,
        period_finish: staking_pool.period_finish,
    });

    msg!(
        "Reward added: {} (period was {:?}). Rate: {}/s until {}. Total funded: {}",
        amount,
        status_before,
        staking_pool.reward_rate,
        staking_pool.period_finish,
        staking_pool.total_rewards_funded
    );

    Ok(())
}
