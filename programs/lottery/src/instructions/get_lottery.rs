use anchor_lang::prelude::*;

use crate::state::{Lottery, LotterySnapshot, LOTTERY_SEED};

/// Read-only view of the ledger, returned through transaction return data so
/// clients can simulate it without decoding the account.
pub fn get_lottery(ctx: Context<GetLottery>) -> Result<LotterySnapshot> {
    Ok(ctx.accounts.lottery.snapshot())
}

#[derive(Accounts)]
pub struct GetLottery<'info> {
    #[account(
        seeds = [LOTTERY_SEED, lottery.admin.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}
