use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::error::StakingError;
use crate::events::RewardPaid;
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Claim accrued rewards
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Flow
/// 1. Settle pool and staker rewards up to now
/// 2. Zero the staker's owed rewards
/// 3. Transfer the owed amount from the reward vault to the user
///
/// Nothing is transferred when nothing is owed.
#[derive(Accounts)]
pub struct GetReward<'info> {
    /// User claiming their rewards
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's staker account
    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

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

pub fn handler_get_reward(mut ctx: Context<GetReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let stake_mint = accounts.staking_pool.stake_mint;
    let pool_bump = [accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, stake_mint.as_ref(), &pool_bump];
    let signer_seeds = &[seeds];

    let mut reward_token = SplTokenGateway::new(
        accounts.token_program.to_account_info(),
        &accounts.reward_vault,
        &accounts.user_reward_account,
        accounts.staking_pool.to_account_info(),
        signer_seeds,
    );

    let reward = RewardsEngine::new(&mut accounts.staking_pool, now)
        .get_reward(&mut accounts.staker, &mut reward_token)?;

    if reward == 0 {
        msg!("No rewards owed");
        return Ok(());
    }

    emit!(RewardPaid {
        user: accounts.user.key(),
        reward,
    });

    msg!(
        "Paid {} reward. Total claimed: {}",
        reward,
        accounts.staker.rewards_claimed
    );

    Ok(())
}
