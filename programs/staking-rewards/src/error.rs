use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Amount Errors (6000-6009)
    #[msg("Cannot stake or withdraw 0")]
    ZeroAmount,

    #[msg("Exceeding staked amount")]
    ExceedsStakedAmount,

    #[msg("Transfer amount exceeds balance")]
    InsufficientBalance,

    #[msg("Transfer amount exceeds allowance")]
    InsufficientAllowance,

    // Reward Errors (6010-6019)
    #[msg("Provided reward too high for the funded balance")]
    InsufficientRewardFunding,

    #[msg("Rewards duration must be greater than zero")]
    InvalidRewardsDuration,

    // Authorization Errors (6020-6029)
    #[msg("Caller is not the rewards distributor")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Math Errors (6030-6039)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors (6040-6049)
    #[msg("Invalid stake mint")]
    InvalidStakeMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}
