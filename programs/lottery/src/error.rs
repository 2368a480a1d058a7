use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    #[msg("Lottery account is already initialized")]
    AlreadyInitialized,
    #[msg("Ticket price and round duration must be positive")]
    InvalidConfig,
    #[msg("Ticket count must be at least 1")]
    InvalidTicketCount,
    #[msg("The current round has expired, only a draw can proceed")]
    RoundExpired,
    #[msg("Payment does not match the price for the requested tickets")]
    IncorrectPayment,
    #[msg("Insufficient funds to buy tickets")]
    InsufficientFunds,
    #[msg("The participant list for this round is full")]
    LotteryFull,
    #[msg("Only the lottery admin may perform this action")]
    Unauthorized,
    #[msg("Not enough participants to draw winners")]
    NotEnoughParticipants,
    #[msg("Draw result does not match the current round")]
    DrawMismatch,
    #[msg("Value transfer failed")]
    TransferFailed,
    #[msg("A drawn winner's account was not supplied as writable")]
    WinnerAccountMissing,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
}
