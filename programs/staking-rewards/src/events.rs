use anchor_lang::prelude::*;

#[event]
pub struct RewardAdded {
    pub reward: u64,
    pub reward_rate: u64,
    pub period_finish: i64,
}

#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct RewardPaid {
    pub user: Pubkey,
    pub reward: u64,
}
