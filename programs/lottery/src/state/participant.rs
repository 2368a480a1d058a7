use anchor_lang::prelude::*;

// 32 buyer + 8 tickets
pub const PARTICIPANT_SIZE: usize = 32 + 8;

/// One buyer's stake in the current round. Repeat purchases by the same buyer
/// are merged into a single entry, which keeps its original position.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Participant {
    pub buyer: Pubkey,
    pub tickets: u64,
}
