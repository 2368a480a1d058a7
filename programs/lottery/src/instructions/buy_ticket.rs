use anchor_lang::prelude::*;

use crate::{
    state::{Lottery, PurchaseReceipt, LOTTERY_SEED},
    transfer::collect_payment,
};

/// Event emitted when tickets are purchased
#[event]
pub struct TicketPurchased {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The buyer's address
    pub buyer: Pubkey,
    /// Round the tickets were bought in
    pub round: u64,
    /// Number of tickets purchased
    pub ticket_count: u64,
    /// Amount paid in lamports, after any bulk discount
    pub amount_paid: u64,
    /// Tickets the buyer holds this round including this purchase
    pub buyer_tickets: u64,
    /// Tickets sold this round including this purchase
    pub total_tickets: u64,
}

/// Instruction to purchase one ticket at the lottery's ticket price
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `payment_amount` - Lamports the buyer agrees to pay; must equal the ticket price
///
/// # Security Considerations
/// 1. Rejects purchases at or after the round expiry
/// 2. Rejects any payment other than the exact price
/// 3. Updates the ledger and moves the lamports in the same transaction,
///    verifying the pool balance afterwards
pub fn buy_ticket(ctx: Context<BuyTicket>, payment_amount: u64) -> Result<PurchaseReceipt> {
    purchase(ctx, 1, payment_amount)
}

/// Shared by `buy_ticket` and `buy_multiple_tickets`.
pub(crate) fn purchase(
    ctx: Context<BuyTicket>,
    ticket_count: u64,
    payment_amount: u64,
) -> Result<PurchaseReceipt> {
    let now = Clock::get()?.unix_timestamp;

    let receipt = ctx.accounts.lottery.record_purchase(
        ctx.accounts.buyer.key(),
        ticket_count,
        payment_amount,
        now,
    )?;

    collect_payment(
        &ctx.accounts.buyer.to_account_info(),
        &ctx.accounts.lottery.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        receipt.amount_paid,
    )?;

    msg!(
        "round {}: {} ticket(s) for {} lamports, total_tickets={}",
        receipt.round,
        ticket_count,
        receipt.amount_paid,
        receipt.total_tickets
    );

    emit!(TicketPurchased {
        lottery: ctx.accounts.lottery.key(),
        buyer: receipt.buyer,
        round: receipt.round,
        ticket_count,
        amount_paid: receipt.amount_paid,
        buyer_tickets: ctx.accounts.lottery.tickets_of(&receipt.buyer),
        total_tickets: receipt.total_tickets,
    });

    Ok(receipt)
}

/// Accounts required for both purchase instructions
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The lottery ledger; also receives the payment
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.admin.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    /// The account purchasing tickets
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Required for the payment transfer
    pub system_program: Program<'info, System>,
}
