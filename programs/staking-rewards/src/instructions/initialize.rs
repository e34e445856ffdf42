use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `rewards_distribution` - Identity allowed to notify rewards (fixed for the pool's life)
/// * `rewards_duration` - Length of each reward period in seconds
///
/// # Accounts
/// * `payer` - Pays for the new accounts (signer)
/// * `staking_pool` - The staking pool PDA to create
/// * `stake_mint` - The token participants stake
/// * `reward_mint` - The token paid out as reward
/// * `stake_vault` - The vault to hold staked tokens
/// * `reward_vault` - The vault to hold funded rewards
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = payer,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub stake_mint: Account<'info, Mint>,

    pub reward_mint: Account<'info, Mint>,

    /// Vault to hold staked tokens
    #[account(
        init,
        payer = payer,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold funded rewards
    #[account(
        init,
        payer = payer,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(
    ctx: Context<Initialize>,
    rewards_distribution: Pubkey,
    rewards_duration: Option<u64>,
) -> Result<()> {
    let rewards_duration = StakingPool::resolve_rewards_duration(rewards_duration)?;
    require_keys_neq!(
        rewards_distribution,
        Pubkey::default(),
        StakingError::InvalidAuthority
    );

    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.rewards_distribution = rewards_distribution;
    staking_pool.stake_mint = ctx.accounts.stake_mint.key();
    staking_pool.reward_mint = ctx.accounts.reward_mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    // Uninitialized schedule: no rate, no period
    staking_pool.total_staked = 0;
    staking_pool.reward_rate = 0;
    staking_pool.reward_per_token_stored = 0;
    staking_pool.last_update_time = 0;
    staking_pool.period_finish = 0;
    staking_pool.rewards_duration = rewards_duration;

    staking_pool.total_rewards_funded = 0;
    staking_pool.total_rewards_paid = 0;
    staking_pool.staker_count = 0;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: stake_mint={}, reward_mint={}, distributor={}, duration={}s",
        staking_pool.stake_mint,
        staking_pool.reward_mint,
        staking_pool.rewards_distribution,
        staking_pool.rewards_duration
    );

    Ok(())
}
