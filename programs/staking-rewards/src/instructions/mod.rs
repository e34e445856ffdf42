// =============================================================================
// Instructions Module - Staking Rewards
// =============================================================================

pub mod exit;
pub mod get_reward;
pub mod initialize;
pub mod notify_reward_amount;
pub mod stake;
pub mod views;
pub mod withdraw;

pub use exit::*;
pub use get_reward::*;
pub use initialize::*;
pub use notify_reward_amount::*;
pub use stake::*;
pub use views::*;
pub use withdraw::*;
