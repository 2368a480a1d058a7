use anchor_lang::prelude::*;

use super::buy_ticket::{purchase, BuyTicket};
use crate::state::PurchaseReceipt;

/// Instruction to purchase several tickets in one transaction
///
/// Orders of `BULK_THRESHOLD` tickets or more are priced with
/// `BULK_DISCOUNT_BPS` off the list price; the buyer must pass that exact
/// discounted amount as `payment_amount`.
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `ticket_count` - Number of tickets to buy (must be > 0)
/// * `payment_amount` - Lamports the buyer agrees to pay
pub fn buy_multiple_tickets(
    ctx: Context<BuyTicket>,
    ticket_count: u64,
    payment_amount: u64,
) -> Result<PurchaseReceipt> {
    purchase(ctx, ticket_count, payment_amount)
}
