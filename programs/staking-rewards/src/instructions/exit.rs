use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::error::StakingError;
use crate::events::{RewardPaid, Withdrawn};
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Withdraw the entire stake and claim all rewards
#[derive(Accounts)]
pub struct Exit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        constraint = stake_mint.key() == staking_pool.stake_mint @ StakingError::InvalidStakeMint
    )]
    pub stake_mint: Box<Account<'info, Mint>>,

    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user
    )]
    pub user_stake_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_exit(mut ctx: Context<Exit>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let stake_mint = accounts.staking_pool.stake_mint;
    let pool_bump = [accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, stake_mint.as_ref(), &pool_bump];
    let signer_seeds = &[seeds];

    let pool_authority = accounts.staking_pool.to_account_info();
    let mut stake_token = SplTokenGateway::new(
        accounts.token_program.to_account_info(),
        &accounts.stake_vault,
        &accounts.user_stake_account,
        pool_authority.clone(),
        signer_seeds,
    );
    let mut reward_token = SplTokenGateway::new(
        accounts.token_program.to_account_info(),
        &accounts.reward_vault,
        &accounts.user_reward_account,
        pool_authority,
        signer_seeds,
    );

    let (amount, reward) = RewardsEngine::new(&mut accounts.staking_pool, now).exit(
        &mut accounts.staker,
        &mut stake_token,
        &mut reward_token,
    )?;

    let user = accounts.user.key();
    emit!(Withdrawn {
        user,
        amount,
        total_staked: accounts.staking_pool.total_staked,
    });
    if reward > 0 {
        emit!(RewardPaid { user, reward });
    }

    msg!(
        "Exited: withdrew {}, paid {} reward. Pool total: {}",
        amount,
        reward,
        accounts.staking_pool.total_staked
    );

    if accounts.staker.is_empty() {
        msg!("Staker {} has no stake and nothing owed", accounts.staker.key());
    }

    Ok(())
}
