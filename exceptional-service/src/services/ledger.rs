//! Shared in-memory ledger with transfer and withdraw operations.
//!
//! One mutex guards the whole balance map. `transfer` holds it for its
//! entire read-modify-write. `withdraw` takes it twice, once to check and
//! once to deduct, and sleeps in between with the lock released. That gap
//! is the time-of-check-to-time-of-use window this service exists to show;
//! concurrent withdrawals can all pass the check and overdraw the account.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::models::{seed_accounts, Account};
use crate::services::error::LedgerError;

/// Delay between the balance check and the deduction in `withdraw`.
pub const DEFAULT_WITHDRAW_DELAY: Duration = Duration::from_millis(100);

/// Post-transfer balances of both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub from: Account,
    pub to: Account,
    pub amount: Decimal,
}

/// Result of a withdrawal. `previous_balance` is the value seen by the check
/// phase, not necessarily the balance right before the deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawOutcome {
    pub account: String,
    pub amount: Decimal,
    pub previous_balance: Decimal,
    pub new_balance: Decimal,
}

/// Process-wide account balances. Cloning shares the same underlying map.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    balances: Arc<Mutex<HashMap<String, Decimal>>>,
    withdraw_delay: Duration,
}

impl LedgerStore {
    pub fn new(accounts: impl IntoIterator<Item = Account>, withdraw_delay: Duration) -> Self {
        let balances = accounts
            .into_iter()
            .map(|account| (account.name, account.balance))
            .collect();

        Self {
            balances: Arc::new(Mutex::new(balances)),
            withdraw_delay,
        }
    }

    /// Ledger populated with the fixed seed accounts.
    pub fn seeded(withdraw_delay: Duration) -> Self {
        Self::new(seed_accounts(), withdraw_delay)
    }

    pub fn withdraw_delay(&self) -> Duration {
        self.withdraw_delay
    }

    pub async fn get(&self, name: &str) -> Result<Decimal, LedgerError> {
        let balances = self.balances.lock().await;
        balances
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))
    }

    /// Add `delta` to the account under the lock and return the new balance.
    pub async fn mutate(&self, name: &str, delta: Decimal) -> Result<Decimal, LedgerError> {
        let mut balances = self.balances.lock().await;
        let balance = balances
            .get_mut(name)
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))?;
        *balance = balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::Overflow(name.to_string()))?;
        Ok(*balance)
    }

    /// All accounts ordered by name.
    pub async fn snapshot(&self) -> Vec<Account> {
        let balances = self.balances.lock().await;
        let mut accounts: Vec<Account> = balances
            .iter()
            .map(|(name, balance)| Account::new(name.clone(), *balance))
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }

    /// Sum of every balance, or `None` if it does not fit in a `Decimal`.
    pub async fn total(&self) -> Option<Decimal> {
        self.balances
            .lock()
            .await
            .values()
            .try_fold(Decimal::ZERO, |sum, balance| sum.checked_add(*balance))
    }

    /// Move `amount` from one account to another.
    ///
    /// Atomic, but unvalidated: negative amounts reverse the direction, zero
    /// is accepted, self-transfers succeed, and overdrafts are allowed. Only a
    /// result outside the `Decimal` range is refused, with nothing written.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        let mut balances = self.balances.lock().await;

        if !balances.contains_key(from) {
            return Err(LedgerError::NotFound(from.to_string()));
        }
        if !balances.contains_key(to) {
            return Err(LedgerError::NotFound(to.to_string()));
        }

        // Both balances are computed before either is written.
        let debited = balances[from]
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::Overflow(from.to_string()))?;
        let credit_base = if from == to { debited } else { balances[to] };
        let credited = credit_base
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;

        balances.insert(from.to_string(), debited);
        balances.insert(to.to_string(), credited);

        let from_balance = balances[from];
        let to_balance = balances[to];

        tracing::info!(
            from = %from,
            to = %to,
            amount = %amount,
            from_balance = %from_balance,
            to_balance = %to_balance,
            "Transfer applied"
        );

        Ok(TransferOutcome {
            from: Account::new(from, from_balance),
            to: Account::new(to, to_balance),
            amount,
        })
    }

    /// Debit `amount` after checking the balance, with the lock released
    /// across the processing delay between check and deduction.
    pub async fn withdraw(
        &self,
        account: &str,
        amount: Decimal,
    ) -> Result<WithdrawOutcome, LedgerError> {
        let balance = self.get(account).await?;

        if balance < amount {
            tracing::info!(
                account = %account,
                balance = %balance,
                requested = %amount,
                "Withdrawal rejected: insufficient funds"
            );
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        tracing::debug!(
            account = %account,
            balance = %balance,
            delay_ms = self.withdraw_delay.as_millis() as u64,
            "Balance check passed, processing withdrawal"
        );

        // No lock is held here.
        tokio::time::sleep(self.withdraw_delay).await;

        let new_balance = self.mutate(account, -amount).await?;

        tracing::info!(
            account = %account,
            amount = %amount,
            previous_balance = %balance,
            new_balance = %new_balance,
            "Withdrawal applied"
        );

        Ok(WithdrawOutcome {
            account: account.to_string(),
            amount,
            previous_balance: balance,
            new_balance,
        })
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::seeded(DEFAULT_WITHDRAW_DELAY)
    }
}
