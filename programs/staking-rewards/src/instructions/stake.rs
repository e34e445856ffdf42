use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::error::StakingError;
use crate::events::Staked;
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Stake tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of stake tokens to lock
///
/// # Flow
/// 1. Settle pool and staker rewards up to now
/// 2. Update staker position and pool totals
/// 3. Pull tokens from the user into the stake vault (pool PDA as delegate)
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User staking their tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's staker account (created if first time)
    #[account(
        init_if_needed,
        payer = user,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        constraint = stake_mint.key() == staking_pool.stake_mint @ StakingError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// User's stake token account; must approve the pool PDA as delegate
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user
    )]
    pub user_stake_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(mut ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staker_bump = ctx.bumps.staker;
    let accounts = &mut ctx.accounts;

    // New position
    if accounts.staker.pool == Pubkey::default() {
        accounts.staker.pool = accounts.staking_pool.key();
        accounts.staker.owner = accounts.user.key();
        accounts.staker.bump = staker_bump;
    }

    let stake_mint = accounts.staking_pool.stake_mint;
    let pool_bump = [accounts.staking_pool.bump];
    let seeds: &[&[u8]] = &[STAKING_POOL_SEED, stake_mint.as_ref(), &pool_bump];
    let signer_seeds = &[seeds];

    let mut stake_token = SplTokenGateway::new(
        accounts.token_program.to_account_info(),
        &accounts.stake_vault,
        &accounts.user_stake_account,
        accounts.staking_pool.to_account_info(),
        signer_seeds,
    );

    RewardsEngine::new(&mut accounts.staking_pool, now).stake(
        &mut accounts.staker,
        amount,
        &mut stake_token,
    )?;

    emit!(Staked {
        user: accounts.user.key(),
        amount,
        total_staked: accounts.staking_pool.total_staked,
    });

    msg!(
        "Staked {}. User total: {}, Pool total: {}",
        amount,
        accounts.staker.staked_amount,
        accounts.staking_pool.total_staked
    );

    Ok(())
}
