// =============================================================================
// Token Gateway
// =============================================================================
// The pool never mutates token balances itself. Every movement of the stake
// or reward token goes through a TokenGateway bound to one custody vault and
// one participant token account.
//
// Pulls follow approve/transferFrom semantics: the participant approves the
// pool PDA as delegate, then the pool signs the transfer out of the
// participant's account.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::StakingError;

pub trait TokenGateway {
    /// Balance of the participant's token account
    fn balance_of(&self) -> u64;

    /// Balance held in the pool's custody vault
    fn custody_balance(&self) -> u64;

    /// Pull `amount` from the participant into custody
    fn transfer_from(&mut self, amount: u64) -> Result<()>;

    /// Push `amount` out of custody to the participant
    fn transfer(&mut self, amount: u64) -> Result<()>;
}

/// TokenGateway over SPL Token accounts, signed by the staking pool PDA
pub struct SplTokenGateway<'a, 'info> {
    token_program: AccountInfo<'info>,
    custody: &'a Account<'info, TokenAccount>,
    participant: &'a Account<'info, TokenAccount>,
    pool_authority: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> SplTokenGateway<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        custody: &'a Account<'info, TokenAccount>,
        participant: &'a Account<'info, TokenAccount>,
        pool_authority: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program,
            custody,
            participant,
            pool_authority,
            signer_seeds,
        }
    }
}

impl<'a, 'info> TokenGateway for SplTokenGateway<'a, 'info> {
    fn balance_of(&self) -> u64 {
        self.participant.amount
    }

    fn custody_balance(&self) -> u64 {
        self.custody.amount
    }

    fn transfer_from(&mut self, amount: u64) -> Result<()> {
        require!(
            self.participant.amount >= amount,
            StakingError::InsufficientBalance
        );
        require!(
            self.participant.delegate == COption::Some(*self.pool_authority.key)
                && self.participant.delegated_amount >= amount,
            StakingError::InsufficientAllowance
        );

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.participant.to_account_info(),
                    to: self.custody.to_account_info(),
                    authority: self.pool_authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )
    }

    fn transfer(&mut self, amount: u64) -> Result<()> {
        require!(
            self.custody.amount >= amount,
            StakingError::InsufficientBalance
        );

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.custody.to_account_info(),
                    to: self.participant.to_account_info(),
                    authority: self.pool_authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )
    }
}
