use anchor_lang::prelude::*;

use crate::state::{Lottery, LOTTERY_ACCOUNT_SIZE, LOTTERY_SEED};

/// Event emitted when a lottery is opened
#[event]
pub struct LotteryInitialized {
    /// The pubkey of the lottery account
    pub lottery: Pubkey,
    /// The admin who may draw winners
    pub admin: Pubkey,
    /// Price per ticket in lamports
    pub ticket_price: u64,
    /// Length of every round in seconds
    pub round_duration: i64,
    /// When the first round stops accepting purchases
    pub expires_at: i64,
}

/// Instruction to create the lottery ledger for the signing admin
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `ticket_price` - Price per ticket in lamports (must be > 0)
/// * `round_duration` - Seconds each round accepts purchases (must be > 0)
///
/// # Security Considerations
/// 1. The lottery is a PDA bound to the admin key, so nobody else can
///    initialize or replace it
/// 2. A second call on the same PDA fails with `AlreadyInitialized` instead of
///    resetting the ledger
/// 3. Price and duration are immutable after this call
pub fn initialize_lottery(
    ctx: Context<InitializeLottery>,
    ticket_price: u64,
    round_duration: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let lottery = &mut ctx.accounts.lottery;
    lottery.initialize(
        ctx.accounts.admin.key(),
        ticket_price,
        round_duration,
        now,
        ctx.bumps.lottery,
    )?;

    msg!(
        "lottery initialized: price={} duration={} expires_at={}",
        ticket_price,
        round_duration,
        lottery.expires_at
    );

    emit!(LotteryInitialized {
        lottery: lottery.key(),
        admin: lottery.admin,
        ticket_price,
        round_duration,
        expires_at: lottery.expires_at,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    /// The lottery ledger, created on first use
    /// PDA with seeds ["lottery", admin_key]
    #[account(
        init_if_needed,
        payer = admin,
        space = LOTTERY_ACCOUNT_SIZE,
        seeds = [LOTTERY_SEED, admin.key().as_ref()],
        bump,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
