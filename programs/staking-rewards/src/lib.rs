use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod rewards;
pub mod state;


use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("EPha1uYwjLBLU6Uih4Gp7WnrJqiAEwsvnB2mjGHb4fjB");

#[program]
pub mod staking_rewards {
    use super::*;

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `rewards_distribution` - Identity allowed to call `notify_reward_amount`
    /// * `rewards_duration` - Length of each reward period in seconds (one week if omitted)
    ///
    pub fn initialize(
        ctx: Context<Initialize>,
        rewards_distribution: Pubkey,
        rewards_duration: Option<u64>,
    ) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, rewards_distribution, rewards_duration)
    }

    /// Stake tokens
    ///
    /// The user must first approve the staking pool PDA as delegate on
    /// their stake token account for at least `amount`.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount to stake
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Withdraw staked tokens
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount to withdraw
    ///
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Claim accrued rewards
    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        instructions::get_reward::handler_get_reward(ctx)
    }

    /// Withdraw the whole stake and claim all rewards
    pub fn exit(ctx: Context<Exit>) -> Result<()> {
        instructions::exit::handler_exit(ctx)
    }

    /// Fund a new reward period (rewards distributor only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of reward tokens to add
    ///
    pub fn notify_reward_amount(ctx: Context<NotifyRewardAmount>, amount: u64) -> Result<()> {
        instructions::notify_reward_amount::handler_notify_reward_amount(ctx, amount)
    }

    /// Staked amount of one staker
    pub fn balance_of(ctx: Context<ViewStaker>) -> Result<u64> {
        instructions::views::handler_balance_of(ctx)
    }

    /// Total staked across the pool
    pub fn total_supply(ctx: Context<ViewPool>) -> Result<u64> {
        instructions::views::handler_total_supply(ctx)
    }

    pub fn reward_rate(ctx: Context<ViewPool>) -> Result<u64> {
        instructions::views::handler_reward_rate(ctx)
    }

    pub fn last_time_reward_applicable(ctx: Context<ViewPool>) -> Result<i64> {
        instructions::views::handler_last_time_reward_applicable(ctx)
    }

    pub fn reward_per_token(ctx: Context<ViewPool>) -> Result<u128> {
        instructions::views::handler_reward_per_token(ctx)
    }

    /// Rewards accrued since the staker's last settlement
    pub fn earned(ctx: Context<ViewStaker>) -> Result<u64> {
        instructions::views::handler_earned(ctx)
    }

    /// Rewards a `get_reward` would pay the staker right now
    pub fn claimable(ctx: Context<ViewStaker>) -> Result<u64> {
        instructions::views::handler_claimable(ctx)
    }

    /// Total emission of one full period at the current rate
    pub fn get_reward_for_duration(ctx: Context<ViewPool>) -> Result<u64> {
        instructions::views::handler_get_reward_for_duration(ctx)
    }
}
