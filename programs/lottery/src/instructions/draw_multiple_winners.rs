use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    randomness::SlotHashEntropy,
    state::{DrawResult, Lottery, LOTTERY_SEED},
    transfer::{pay_from_pool, resolve_slate},
};

/// Event emitted once per winning place
#[event]
pub struct WinnerDrawn {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// Round the prize belongs to
    pub round: u64,
    /// 1 for first place, 2 for second, 3 for third
    pub place: u8,
    /// The winner's address
    pub winner: Pubkey,
    /// Prize paid in lamports
    pub prize_amount: u64,
}

/// Event emitted after all prizes are paid and the next round is open
#[event]
pub struct RoundSettled {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The round that was drawn
    pub round: u64,
    /// Lamports paid out across all places
    pub pool: u64,
    /// The round now accepting purchases
    pub next_round: u64,
    /// When the next round stops accepting purchases
    pub expires_at: i64,
}

/// Draws three ticket-weighted winners, pays out the pool and opens the next
/// round, all in one transaction.
///
/// Execution requirements:
/// 1. The signer must be the lottery admin
/// 2. At least `MIN_PARTICIPANTS` distinct buyers and `MIN_TICKETS` tickets
/// 3. Every participant of the round has a writable wallet in the remaining
///    accounts (the winner slate). This is checked before any winner is drawn
///    so the admin cannot abort draws that land on the wrong buyer
///
/// Randomness comes from the latest SlotHashes entry mixed with the clock
/// timestamp. Places are drawn with replacement, so a buyer can win more than
/// once. Prizes are split 50/30/20 with integer dust going to first place.
///
/// After execution:
/// - Each winner has been paid from the pool
/// - Ticket and fund counters are zero and the participant list is empty
/// - `current_round` is incremented and `expires_at` restarts from now
///
/// # Errors
/// - `Unauthorized` if the signer is not the admin
/// - `NotEnoughParticipants` if the minimums are not met
/// - `InvalidSlotHashesAccount` if the SlotHashes account is wrong
/// - `WinnerAccountMissing` if any participant is absent from the slate
/// - `TransferFailed` if the pool cannot cover a prize
pub fn draw_multiple_winners<'info>(
    ctx: Context<'_, '_, 'info, 'info, DrawMultipleWinners<'info>>,
) -> Result<DrawResult> {
    let clock = Clock::get()?;

    // Every participant must be payable before the outcome is known
    let slate = resolve_slate(&ctx.accounts.lottery.participants, ctx.remaining_accounts)?;

    let mut entropy = SlotHashEntropy::from_sysvar(
        &ctx.accounts.recent_slothashes.to_account_info(),
        clock.unix_timestamp,
    )?;
    let draw = ctx
        .accounts
        .lottery
        .plan_draw(&ctx.accounts.admin.key(), &mut entropy)?;

    let pool_info = ctx.accounts.lottery.to_account_info();
    for payout in draw.winners.iter() {
        let winner_info = slate
            .iter()
            .find(|account| account.key() == payout.winner)
            .ok_or(LotteryError::WinnerAccountMissing)?;
        pay_from_pool(&pool_info, winner_info, payout.amount)?;
    }

    let lottery_key = ctx.accounts.lottery.key();
    let lottery = &mut ctx.accounts.lottery;
    lottery.settle(&draw, clock.unix_timestamp)?;

    msg!(
        "round {} drawn: pool={} next_round={}",
        draw.round,
        draw.pool,
        lottery.current_round
    );

    for (place, payout) in (1u8..).zip(draw.winners.iter()) {
        emit!(WinnerDrawn {
            lottery: lottery_key,
            round: draw.round,
            place,
            winner: payout.winner,
            prize_amount: payout.amount,
        });
    }

    emit!(RoundSettled {
        lottery: lottery_key,
        round: draw.round,
        pool: draw.pool,
        next_round: lottery.current_round,
        expires_at: lottery.expires_at,
    });

    Ok(draw)
}

/// Accounts required for the draw_multiple_winners instruction
///
/// Remaining accounts: the winner slate, writable wallets of the round's
/// participants.
#[derive(Accounts)]
pub struct DrawMultipleWinners<'info> {
    /// The lottery ledger; pays the prizes from its balance
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.admin.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    pub admin: Signer<'info>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// This is used as a source of randomness
    /// CHECK: Using UncheckedAccount because the sysvar address is validated
    /// manually; Anchor cannot deserialize SlotHashes.
    pub recent_slothashes: UncheckedAccount<'info>,
}
