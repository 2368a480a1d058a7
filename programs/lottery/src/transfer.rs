use anchor_lang::{
    prelude::*,
    solana_program::{program::invoke, system_instruction},
};

use crate::{error::LotteryError, state::Participant};

/// Moves `amount` lamports from the buyer into the pool account through the
/// system program, then verifies the pool grew by exactly that amount.
pub fn collect_payment<'info>(
    buyer: &AccountInfo<'info>,
    pool: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(buyer.lamports() >= amount, LotteryError::InsufficientFunds);

    let pre_transfer_balance = pool.lamports();

    invoke(
        &system_instruction::transfer(buyer.key, pool.key, amount),
        &[buyer.clone(), pool.clone(), system_program.clone()],
    )?;

    let post_transfer_balance = pool.lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    Ok(())
}

/// Pays `amount` lamports out of the program-owned pool account.
///
/// Direct lamport arithmetic is only valid because the pool is owned by this
/// program. The pool never dips below its rent-exempt minimum.
pub fn pay_from_pool(pool: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let rent_floor = Rent::get()?.minimum_balance(pool.data_len());
    ensure_spendable(pool.lamports(), rent_floor, amount)?;

    pool.sub_lamports(amount)?;
    to.add_lamports(amount)?;

    Ok(())
}

/// Fails with `TransferFailed` unless `amount` can leave a pool holding
/// `balance` lamports without taking it below `rent_floor`.
pub fn ensure_spendable(balance: u64, rent_floor: u64, amount: u64) -> Result<()> {
    let spendable = balance.saturating_sub(rent_floor);
    require!(spendable >= amount, LotteryError::TransferFailed);
    Ok(())
}

/// Matches every participant of the round to a writable wallet in `slate`.
///
/// The whole participant list is checked before any winner is drawn, so
/// whether a draw can complete never depends on who wins. The returned
/// accounts follow participant order.
pub fn resolve_slate<'a, 'info>(
    participants: &[Participant],
    slate: &'a [AccountInfo<'info>],
) -> Result<Vec<&'a AccountInfo<'info>>> {
    participants
        .iter()
        .map(|participant| {
            slate
                .iter()
                .find(|account| account.key() == participant.buyer && account.is_writable)
                .ok_or_else(|| error!(LotteryError::WinnerAccountMissing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    struct Wallet {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl Wallet {
        fn new(key: Pubkey) -> Self {
            Self {
                key,
                owner: Pubkey::default(),
                lamports: 1_000_000,
                data: Vec::new(),
            }
        }

        fn info(&mut self, is_writable: bool) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                is_writable,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn participant(buyer: Pubkey) -> Participant {
        Participant { buyer, tickets: 1 }
    }

    #[test]
    fn full_slate_resolves_in_participant_order() {
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let participants = [participant(a), participant(b), participant(c)];
        let mut wallets = [Wallet::new(c), Wallet::new(a), Wallet::new(b)];
        let slate: Vec<AccountInfo> = wallets.iter_mut().map(|w| w.info(true)).collect();

        let resolved = resolve_slate(&participants, &slate).unwrap();
        let keys: Vec<Pubkey> = resolved.iter().map(|account| account.key()).collect();
        assert_eq!(keys, vec![a, b, c]);
    }

    #[test]
    fn slate_missing_a_participant_is_rejected() {
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let participants = [participant(a), participant(b), participant(c)];
        // only one wallet supplied: the draw must fail whoever would win
        let mut wallets = [Wallet::new(b)];
        let slate: Vec<AccountInfo> = wallets.iter_mut().map(|w| w.info(true)).collect();

        assert_eq!(
            resolve_slate(&participants, &slate).unwrap_err(),
            Error::from(LotteryError::WinnerAccountMissing)
        );
    }

    #[test]
    fn read_only_wallet_does_not_count() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let participants = [participant(a), participant(b)];
        let mut writable = Wallet::new(a);
        let mut read_only = Wallet::new(b);
        let slate = vec![writable.info(true), read_only.info(false)];

        assert_eq!(
            resolve_slate(&participants, &slate).unwrap_err(),
            Error::from(LotteryError::WinnerAccountMissing)
        );
    }

    #[test]
    fn extra_wallets_are_ignored() {
        let a = Pubkey::new_unique();
        let mut wallets = [Wallet::new(Pubkey::new_unique()), Wallet::new(a)];
        let slate: Vec<AccountInfo> = wallets.iter_mut().map(|w| w.info(true)).collect();

        let resolved = resolve_slate(&[participant(a)], &slate).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].key(), a);
    }

    #[test]
    fn pool_at_rent_floor_cannot_pay() {
        let rent_floor = 2_000_000;
        assert_eq!(
            ensure_spendable(rent_floor, rent_floor, 1).unwrap_err(),
            Error::from(LotteryError::TransferFailed)
        );
        assert!(ensure_spendable(rent_floor, rent_floor, 0).is_ok());
    }

    #[test]
    fn pool_pays_exactly_down_to_rent_floor() {
        let rent_floor = 2_000_000;
        assert!(ensure_spendable(rent_floor + 500, rent_floor, 500).is_ok());
        assert!(ensure_spendable(rent_floor + 500, rent_floor, 501).is_err());
        // below the floor nothing is spendable
        assert!(ensure_spendable(rent_floor - 1, rent_floor, 1).is_err());
    }
}
