use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Purchases of at least this many tickets receive the bulk discount.
pub const BULK_THRESHOLD: u64 = 6;

/// Bulk discount in basis points off the list price (10%).
pub const BULK_DISCOUNT_BPS: u64 = 1_000;

const BPS_DENOMINATOR: u64 = 10_000;

/// Price breakdown for a single purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub ticket_count: u64,
    /// `ticket_count * ticket_price`
    pub list_price: u64,
    /// What the buyer must pay, after any discount
    pub amount_due: u64,
}

impl Quote {
    #[cfg(test)]
    fn is_discounted(&self) -> bool {
        self.amount_due < self.list_price
    }
}

/// Computes the exact amount owed for `ticket_count` tickets.
///
/// Below [`BULK_THRESHOLD`] the buyer pays the linear list price. At or above
/// it, [`BULK_DISCOUNT_BPS`] is taken off the list price and the result is
/// floored, so a discounted quote is always strictly cheaper than the list
/// price.
///
/// # Errors
/// - `InvalidTicketCount` if `ticket_count` is zero
/// - `Overflow` if the list price does not fit in a `u64`
pub fn quote_purchase(ticket_price: u64, ticket_count: u64) -> Result<Quote> {
    require!(ticket_count > 0, LotteryError::InvalidTicketCount);

    let list_price = ticket_price
        .checked_mul(ticket_count)
        .ok_or(LotteryError::Overflow)?;

    let amount_due = if ticket_count >= BULK_THRESHOLD {
        // u128 keeps the intermediate product from overflowing for large pools
        let discounted = (list_price as u128)
            .checked_mul((BPS_DENOMINATOR - BULK_DISCOUNT_BPS) as u128)
            .ok_or(LotteryError::Overflow)?
            / BPS_DENOMINATOR as u128;
        u64::try_from(discounted).map_err(|_| LotteryError::Overflow)?
    } else {
        list_price
    };

    Ok(Quote {
        ticket_count,
        list_price,
        amount_due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const ONE_SOL: u64 = 1_000_000_000;

    #[test]
    fn single_ticket_pays_list_price() {
        let quote = quote_purchase(ONE_SOL, 1).unwrap();
        assert_eq!(quote.amount_due, ONE_SOL);
        assert!(!quote.is_discounted());
    }

    #[test]
    fn below_threshold_is_linear() {
        let quote = quote_purchase(ONE_SOL, BULK_THRESHOLD - 1).unwrap();
        assert_eq!(quote.list_price, 5 * ONE_SOL);
        assert_eq!(quote.amount_due, 5 * ONE_SOL);
    }

    #[test]
    fn six_tickets_are_discounted() {
        let quote = quote_purchase(ONE_SOL, 6).unwrap();
        assert_eq!(quote.list_price, 6_000_000_000);
        assert_eq!(quote.amount_due, 5_400_000_000);
        assert!(quote.amount_due < 6 * ONE_SOL);
    }

    #[test]
    fn discount_is_strict_even_for_tiny_prices() {
        // 6 * 9000 / 10000 = 5.4, floored to 5
        let quote = quote_purchase(1, 6).unwrap();
        assert_eq!(quote.amount_due, 5);
        assert!(quote.is_discounted());
    }

    #[test]
    fn zero_tickets_rejected() {
        assert_eq!(
            quote_purchase(ONE_SOL, 0).unwrap_err(),
            Error::from(LotteryError::InvalidTicketCount)
        );
    }

    #[test]
    fn list_price_overflow_rejected() {
        assert_eq!(
            quote_purchase(u64::MAX, 2).unwrap_err(),
            Error::from(LotteryError::Overflow)
        );
    }

    #[test]
    fn large_discounted_quote_does_not_overflow() {
        let quote = quote_purchase(u64::MAX / 10, 10).unwrap();
        assert!(quote.amount_due < quote.list_price);
    }
}
