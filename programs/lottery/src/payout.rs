use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Number of winner slots filled by every draw.
pub const WINNER_COUNT: usize = 3;

/// First, second and third place shares of the pool in basis points.
pub const PRIZE_SPLIT_BPS: [u64; WINNER_COUNT] = [5_000, 3_000, 2_000];

const BPS_DENOMINATOR: u64 = 10_000;

/// Splits `pool` into the three place prizes.
///
/// Each share is floored; whatever integer-division dust remains is added to
/// first place so the returned amounts always sum to `pool`.
pub fn split_pool(pool: u64) -> Result<[u64; WINNER_COUNT]> {
    let mut prizes = [0u64; WINNER_COUNT];
    for (prize, bps) in prizes.iter_mut().zip(PRIZE_SPLIT_BPS) {
        let share = (pool as u128) * (bps as u128) / BPS_DENOMINATOR as u128;
        *prize = u64::try_from(share).map_err(|_| LotteryError::Overflow)?;
    }

    let distributed = prizes
        .iter()
        .try_fold(0u64, |acc, &p| acc.checked_add(p))
        .ok_or(LotteryError::Overflow)?;
    let remainder = pool
        .checked_sub(distributed)
        .ok_or(LotteryError::Overflow)?;
    prizes[0] = prizes[0]
        .checked_add(remainder)
        .ok_or(LotteryError::Overflow)?;

    Ok(prizes)
}
