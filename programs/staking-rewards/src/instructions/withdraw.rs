use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::engine::RewardsEngine;
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::gateway::SplTokenGateway;
use crate::state::{Staker, StakingPool};

/// Withdraw staked tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of stake tokens to withdraw
///
/// # Flow
/// 1. Validate amount against the staker's position
/// 2. Settle pool and staker rewards up to now
/// 3. Update staker position and pool totals
/// 4. Transfer tokens from the stake vault back to the user
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User withdrawing their tokens
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
        constraint = stake_mint.key() == staking_pool.stake_mint @ StakingError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// User's stake token account
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

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(mut ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    // Pool PDA signs as vault authority
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

    RewardsEngine::new(&mut accounts.staking_pool, now).withdraw(
        &mut accounts.staker,
        amount,
        &mut stake_token,
    )?;

    emit!(Withdrawn {
        user: accounts.user.key(),
        amount,
        total_staked: accounts.staking_pool.total_staked,
    });

    msg!(
        "Withdrew {}. User remaining: {}, Pool total: {}",
        amount,
        accounts.staker.staked_amount,
        accounts.staking_pool.total_staked
    );

    if accounts.staker.is_empty() {
        msg!("Staker {} has no stake and nothing owed", accounts.staker.key());
    }

    Ok(())
}
