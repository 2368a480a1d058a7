use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    payout::{split_pool, WINNER_COUNT},
    pricing::quote_purchase,
    randomness::{select_weighted, EntropySource},
    state::{Participant, PARTICIPANT_SIZE},
};

pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Distinct buyers required before a round can be drawn.
pub const MIN_PARTICIPANTS: usize = 3;
/// Tickets required before a round can be drawn.
pub const MIN_TICKETS: u64 = 3;
/// Distinct buyers a single round can hold.
///
/// The draw must carry every participant's wallet, so this is bounded by what
/// one legacy transaction (1232 bytes) can hold next to the lottery, admin,
/// SlotHashes, program and compute-budget keys. Larger rounds could never be
/// drawn and their pool would stay locked.
pub const MAX_PARTICIPANTS: usize = 24;
/// Winners kept in the cross-round history, oldest dropped first.
pub const MAX_PREVIOUS_WINNERS: usize = 30;

// Space calculation:
// 8 (discriminator) +
// 32 (admin) +
// 8 (ticket_price) +
// 8 (round_duration) +
// 8 (expires_at) +
// 8 (total_tickets) +
// 8 (total_funds) +
// 8 (current_round) +
// 4 + 24 * 40 (participants) +
// 4 + 30 * 32 (previous_winners) +
// 1 (bump) =
// 2017 total bytes
pub const LOTTERY_ACCOUNT_SIZE: usize = 8
    + 32
    + 8
    + 8
    + 8
    + 8
    + 8
    + 8
    + 4
    + MAX_PARTICIPANTS * PARTICIPANT_SIZE
    + 4
    + MAX_PREVIOUS_WINNERS * 32
    + 1;

/// The shared ledger for one admin's lottery. PDA with seeds
/// ["lottery", admin]. The account also holds the pooled lamports, so
/// `total_funds` is always backed by its balance above rent.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct Lottery {
    pub admin: Pubkey,
    pub ticket_price: u64,
    pub round_duration: i64,
    pub expires_at: i64,
    pub total_tickets: u64,
    pub total_funds: u64,
    /// Zero until initialized, then 1 and counting
    pub current_round: u64,
    pub participants: Vec<Participant>,
    pub previous_winners: Vec<Pubkey>,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub buyer: Pubkey,
    pub round: u64,
    pub ticket_count: u64,
    pub list_price: u64,
    pub amount_paid: u64,
    pub total_tickets: u64,
    pub total_funds: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinnerPayout {
    pub winner: Pubkey,
    pub amount: u64,
}

/// Outcome of a draw, in place order. The same buyer may hold several places.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    pub round: u64,
    pub pool: u64,
    pub winners: [WinnerPayout; 3],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotterySnapshot {
    pub admin: Pubkey,
    pub ticket_price: u64,
    pub round_duration: i64,
    pub total_tickets: u64,
    pub total_funds: u64,
    pub expires_at: i64,
    pub current_round: u64,
    pub participant_count: u32,
}

impl Lottery {
    pub fn is_initialized(&self) -> bool {
        self.current_round != 0
    }

    /// Purchases are accepted strictly before `expires_at`.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn initialize(
        &mut self,
        admin: Pubkey,
        ticket_price: u64,
        round_duration: i64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), LotteryError::AlreadyInitialized);
        require!(
            ticket_price > 0 && round_duration > 0,
            LotteryError::InvalidConfig
        );
        let expires_at = now
            .checked_add(round_duration)
            .ok_or(LotteryError::Overflow)?;

        *self = Lottery {
            admin,
            ticket_price,
            round_duration,
            expires_at,
            total_tickets: 0,
            total_funds: 0,
            current_round: 1,
            participants: Vec::new(),
            previous_winners: Vec::new(),
            bump,
        };

        Ok(())
    }

    /// Credits `ticket_count` tickets to `buyer` for `payment_amount`.
    ///
    /// The payment must equal the quoted price exactly; neither shortfalls nor
    /// overpayments are absorbed. Every check runs before any field is
    /// written, so an error leaves the ledger untouched.
    ///
    /// # Errors
    /// - `RoundExpired` if `now >= expires_at`
    /// - `InvalidTicketCount` if `ticket_count` is zero
    /// - `IncorrectPayment` if `payment_amount` differs from the quote
    /// - `LotteryFull` if a new buyer arrives with no participant slot left
    /// - `Overflow` on counter overflow
    pub fn record_purchase(
        &mut self,
        buyer: Pubkey,
        ticket_count: u64,
        payment_amount: u64,
        now: i64,
    ) -> Result<PurchaseReceipt> {
        require!(!self.is_expired(now), LotteryError::RoundExpired);

        let quote = quote_purchase(self.ticket_price, ticket_count)?;
        require!(
            payment_amount == quote.amount_due,
            LotteryError::IncorrectPayment
        );

        let total_tickets = self
            .total_tickets
            .checked_add(ticket_count)
            .ok_or(LotteryError::Overflow)?;
        let total_funds = self
            .total_funds
            .checked_add(quote.amount_due)
            .ok_or(LotteryError::Overflow)?;

        let existing = self.participants.iter().position(|p| p.buyer == buyer);
        let merged = match existing {
            Some(idx) => Some((
                idx,
                self.participants[idx]
                    .tickets
                    .checked_add(ticket_count)
                    .ok_or(LotteryError::Overflow)?,
            )),
            None => {
                require!(
                    self.participants.len() < MAX_PARTICIPANTS,
                    LotteryError::LotteryFull
                );
                None
            }
        };

        match merged {
            Some((idx, tickets)) => self.participants[idx].tickets = tickets,
            None => self.participants.push(Participant {
                buyer,
                tickets: ticket_count,
            }),
        }
        self.total_tickets = total_tickets;
        self.total_funds = total_funds;

        Ok(PurchaseReceipt {
            buyer,
            round: self.current_round,
            ticket_count,
            list_price: quote.list_price,
            amount_paid: quote.amount_due,
            total_tickets,
            total_funds,
        })
    }

    /// Selects this round's winners and their prizes without touching state.
    ///
    /// Each place is drawn independently with probability proportional to
    /// ticket count, so one buyer can take several places. Prizes follow
    /// [`crate::payout::PRIZE_SPLIT_BPS`] and sum to `total_funds`.
    ///
    /// Expiry does not gate the draw; the admin may settle early once the
    /// participant minimums are met.
    pub fn plan_draw(
        &self,
        caller: &Pubkey,
        entropy: &mut impl EntropySource,
    ) -> Result<DrawResult> {
        require_keys_eq!(*caller, self.admin, LotteryError::Unauthorized);
        require!(
            self.participants.len() >= MIN_PARTICIPANTS && self.total_tickets >= MIN_TICKETS,
            LotteryError::NotEnoughParticipants
        );

        let prizes = split_pool(self.total_funds)?;
        let mut winners = [WinnerPayout::default(); WINNER_COUNT];
        for (slot, amount) in winners.iter_mut().zip(prizes) {
            *slot = WinnerPayout {
                winner: select_weighted(&self.participants, self.total_tickets, entropy)?,
                amount,
            };
        }

        Ok(DrawResult {
            round: self.current_round,
            pool: self.total_funds,
            winners,
        })
    }

    /// Closes the round described by `draw` and opens the next one.
    ///
    /// Must run in the same transaction as the payouts of `draw`.
    pub fn settle(&mut self, draw: &DrawResult, now: i64) -> Result<()> {
        require!(
            draw.round == self.current_round && draw.pool == self.total_funds,
            LotteryError::DrawMismatch
        );
        let next_round = self
            .current_round
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;
        let expires_at = now
            .checked_add(self.round_duration)
            .ok_or(LotteryError::Overflow)?;

        self.previous_winners
            .extend(draw.winners.iter().map(|w| w.winner));
        let overflow = self
            .previous_winners
            .len()
            .saturating_sub(MAX_PREVIOUS_WINNERS);
        self.previous_winners.drain(..overflow);

        self.total_tickets = 0;
        self.total_funds = 0;
        self.participants.clear();
        self.current_round = next_round;
        self.expires_at = expires_at;

        Ok(())
    }

    pub fn snapshot(&self) -> LotterySnapshot {
        LotterySnapshot {
            admin: self.admin,
            ticket_price: self.ticket_price,
            round_duration: self.round_duration,
            total_tickets: self.total_tickets,
            total_funds: self.total_funds,
            expires_at: self.expires_at,
            current_round: self.current_round,
            participant_count: self.participants.len() as u32,
        }
    }

    /// Tickets `buyer` holds in the current round.
    pub fn tickets_of(&self, buyer: &Pubkey) -> u64 {
        self.participants
            .iter()
            .find(|p| p.buyer == *buyer)
            .map_or(0, |p| p.tickets)
    }
}
