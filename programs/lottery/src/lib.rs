//! Multi-winner round lottery.
//!
//! One PDA per admin holds the ledger for the running round and the pooled
//! lamports. Buyers purchase tickets (bulk orders are discounted), and the
//! admin draws three ticket-weighted winners who split the pool 50/30/20,
//! which resets the ledger and opens the next round.

use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod payout;
pub mod pricing;
pub mod randomness;
pub mod state;
pub mod transfer;

use state::{DrawResult, LotterySnapshot, PurchaseReceipt};

declare_id!("9MW5Uvnrp5nZCoxs1kTYdmkucTBoMQ7CYQpqauw4qVj7");

#[program]
pub mod lottery {
    use super::*;

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        ticket_price: u64,
        round_duration: i64,
    ) -> Result<()> {
        instructions::initialize_lottery::initialize_lottery(ctx, ticket_price, round_duration)
    }

    pub fn buy_ticket(ctx: Context<BuyTicket>, payment_amount: u64) -> Result<PurchaseReceipt> {
        instructions::buy_ticket::buy_ticket(ctx, payment_amount)
    }

    pub fn buy_multiple_tickets(
        ctx: Context<BuyTicket>,
        ticket_count: u64,
        payment_amount: u64,
    ) -> Result<PurchaseReceipt> {
        instructions::buy_multiple_tickets::buy_multiple_tickets(ctx, ticket_count, payment_amount)
    }

    pub fn draw_multiple_winners<'info>(
        ctx: Context<'_, '_, 'info, 'info, DrawMultipleWinners<'info>>,
    ) -> Result<DrawResult> {
        instructions::draw_multiple_winners::draw_multiple_winners(ctx)
    }

    pub fn get_lottery(ctx: Context<GetLottery>) -> Result<LotterySnapshot> {
        instructions::get_lottery::get_lottery(ctx)
    }
}
