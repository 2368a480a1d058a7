use anchor_lang::{prelude::*, solana_program::sysvar::slot_hashes};
use arrayref::array_ref;

use crate::{error::LotteryError, state::Participant};

/// Supplies the random words consumed by a draw.
///
/// The program builds one source per draw transaction from on-chain data. Tests
/// substitute a deterministic implementation.
pub trait EntropySource {
    fn next_u64(&mut self) -> u64;
}

/// Entropy derived from the most recent entry of the SlotHashes sysvar mixed
/// with the transaction's clock timestamp, expanded as a splitmix64 stream.
///
/// Slot hashes are known to validators before the transaction lands, so this
/// is only as strong as the assumption that the draw caller cannot choose the
/// slot their transaction executes in.
pub struct SlotHashEntropy {
    state: u64,
}

const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;

// 8 (entry count) + 8 (slot) + 32 (hash)
const SLOT_HASHES_MIN_LEN: usize = 8 + 8 + 32;

impl SlotHashEntropy {
    pub fn new(slot_hash: &[u8; 32], timestamp: i64) -> Self {
        let mut state = mix(timestamp as u64, GOLDEN_GAMMA);
        for chunk in slot_hash.chunks_exact(8) {
            state = mix(state, u64::from_le_bytes(*array_ref![chunk, 0, 8]));
        }
        Self { state }
    }

    /// Reads the latest slot hash out of the SlotHashes sysvar account.
    ///
    /// The account is checked by address because Anchor cannot deserialize the
    /// SlotHashes sysvar.
    pub fn from_sysvar(recent_slothashes: &AccountInfo, timestamp: i64) -> Result<Self> {
        require_keys_eq!(
            recent_slothashes.key(),
            slot_hashes::ID,
            LotteryError::InvalidSlotHashesAccount
        );

        let data = recent_slothashes.try_borrow_data()?;
        require!(
            data.len() >= SLOT_HASHES_MIN_LEN,
            LotteryError::InvalidSlotHashesAccount
        );
        let latest_hash = array_ref![data, 16, 32];

        Ok(Self::new(latest_hash, timestamp))
    }
}

impl EntropySource for SlotHashEntropy {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix(self.state, 0)
    }
}

/// Cryptographic mixing function with strong avalanche properties
/// Each bit in the output has a ~50% chance of flipping when any input bit changes.
/// Based on the splitmix64 finalizer, applied to `a + b`.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Maps entropy into `0..range`.
///
/// Uses a mask for powers of two and rejection sampling otherwise. Rejection
/// is capped so compute stays bounded; the residual bias after the cap is
/// below 2^-60 for any range a lottery can reach.
pub fn unbiased_range(entropy: &mut impl EntropySource, range: u64) -> Result<u64> {
    require!(range > 0, LotteryError::NotEnoughParticipants);

    if range.is_power_of_two() {
        return Ok(entropy.next_u64() & (range - 1));
    }

    let threshold = u64::MAX - (u64::MAX % range);

    const MAX_ATTEMPTS: u8 = 4;

    let mut value = entropy.next_u64();
    for _ in 1..MAX_ATTEMPTS {
        if value < threshold {
            break;
        }
        value = entropy.next_u64();
    }

    Ok(value % range)
}

/// Picks one participant with probability proportional to their ticket count.
///
/// A ticket index is drawn uniformly from `0..total_tickets` and resolved by
/// walking the participants' cumulative ticket ranges in purchase order.
pub fn select_weighted(
    participants: &[Participant],
    total_tickets: u64,
    entropy: &mut impl EntropySource,
) -> Result<Pubkey> {
    let ticket = unbiased_range(entropy, total_tickets)?;

    let mut upper = 0u64;
    for participant in participants {
        upper = upper
            .checked_add(participant.tickets)
            .ok_or(LotteryError::Overflow)?;
        if ticket < upper {
            return Ok(participant.buyer);
        }
    }

    // total_tickets is always the sum of participant tickets
    err!(LotteryError::Overflow)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anchor_lang::error::Error;

    /// Replays a fixed list of words, then repeats the last one.
    pub(crate) struct ScriptedEntropy {
        words: Vec<u64>,
        next: usize,
    }

    impl ScriptedEntropy {
        pub(crate) fn new(words: &[u64]) -> Self {
            Self {
                words: words.to_vec(),
                next: 0,
            }
        }
    }

    impl EntropySource for ScriptedEntropy {
        fn next_u64(&mut self) -> u64 {
            let word = self.words[self.next.min(self.words.len() - 1)];
            self.next += 1;
            word
        }
    }

    fn participants(weights: &[u64]) -> Vec<Participant> {
        weights
            .iter()
            .map(|&tickets| Participant {
                buyer: Pubkey::new_unique(),
                tickets,
            })
            .collect()
    }

    #[test]
    fn ticket_index_maps_to_owner() {
        let entries = participants(&[1, 6, 1]);
        // ticket 0 -> first buyer, 1..=6 -> second, 7 -> third
        for (ticket, expected) in [(0, 0), (1, 1), (6, 1), (7, 2)] {
            let mut entropy = ScriptedEntropy::new(&[ticket]);
            let winner = select_weighted(&entries, 8, &mut entropy).unwrap();
            assert_eq!(winner, entries[expected].buyer, "ticket {ticket}");
        }
    }

    #[test]
    fn non_power_of_two_range_uses_modulo() {
        let entries = participants(&[2, 1]);
        let mut entropy = ScriptedEntropy::new(&[5]);
        // 5 % 3 = 2 -> second buyer
        assert_eq!(
            select_weighted(&entries, 3, &mut entropy).unwrap(),
            entries[1].buyer
        );
    }

    #[test]
    fn rejection_discards_biased_words() {
        let mut entropy = ScriptedEntropy::new(&[u64::MAX, 4]);
        assert_eq!(unbiased_range(&mut entropy, 3).unwrap(), 1);
    }

    #[test]
    fn empty_range_rejected() {
        let mut entropy = ScriptedEntropy::new(&[0]);
        assert_eq!(
            unbiased_range(&mut entropy, 0).unwrap_err(),
            Error::from(LotteryError::NotEnoughParticipants)
        );
    }

    #[test]
    fn slot_hash_stream_is_deterministic_per_seed() {
        let hash = [7u8; 32];
        let mut a = SlotHashEntropy::new(&hash, 1_700_000_000);
        let mut b = SlotHashEntropy::new(&hash, 1_700_000_000);
        let mut c = SlotHashEntropy::new(&hash, 1_700_000_001);

        let first = a.next_u64();
        assert_eq!(first, b.next_u64());
        assert_ne!(first, c.next_u64());
        assert_ne!(first, a.next_u64());
    }

    #[test]
    fn selection_tracks_ticket_weight() {
        let entries = participants(&[1, 6, 1]);
        let mut entropy = SlotHashEntropy::new(&[42u8; 32], 0);
        let mut wins = [0u32; 3];
        for _ in 0..8_000 {
            let winner = select_weighted(&entries, 8, &mut entropy).unwrap();
            let idx = entries.iter().position(|p| p.buyer == winner).unwrap();
            wins[idx] += 1;
        }
        // expected 1000 / 6000 / 1000
        assert!((5_600..6_400).contains(&wins[1]), "{wins:?}");
        assert!((800..1_200).contains(&wins[0]), "{wins:?}");
        assert!((800..1_200).contains(&wins[2]), "{wins:?}");
    }

    #[test]
    fn mismatched_total_is_an_error() {
        let entries = participants(&[1, 1]);
        let mut entropy = ScriptedEntropy::new(&[3]);
        assert!(select_weighted(&entries, 4, &mut entropy).is_err());
    }
}
