use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AccountsError, Result};

/// Per-user credit balance
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Current balance, opening the account on first sight
    async fn balance(&self, user_id: &str) -> Result<u32>;

    /// Remove `amount` credits and return the remaining balance
    ///
    /// Fails with `InsufficientCredits` and leaves the balance untouched
    /// when it does not cover `amount`.
    async fn debit(&self, user_id: &str, amount: u32) -> Result<u32>;

    /// Return previously debited credits and give back the new balance
    async fn refund(&self, user_id: &str, amount: u32) -> Result<u32>;
}

/// Process-local ledger that grants a fixed number of credits to new users
pub struct MemoryLedger {
    balances: DashMap<String, u32>,
    initial_credits: u32,
}

impl MemoryLedger {
    pub fn new(initial_credits: u32) -> Self {
        Self {
            balances: DashMap::new(),
            initial_credits,
        }
    }
}

#[async_trait]
impl CreditLedger for MemoryLedger {
    async fn balance(&self, user_id: &str) -> Result<u32> {
        let balance = *self
            .balances
            .entry(user_id.to_owned())
            .or_insert(self.initial_credits);

        Ok(balance)
    }

    async fn debit(&self, user_id: &str, amount: u32) -> Result<u32> {
        let mut balance = self
            .balances
            .entry(user_id.to_owned())
            .or_insert(self.initial_credits);

        let remaining = balance
            .checked_sub(amount)
            .ok_or(AccountsError::InsufficientCredits {
                balance: *balance,
                required: amount,
            })?;

        *balance = remaining;
        tracing::debug!(user_id, amount, remaining, "credits debited");

        Ok(remaining)
    }

    async fn refund(&self, user_id: &str, amount: u32) -> Result<u32> {
        let mut balance = self
            .balances
            .entry(user_id.to_owned())
            .or_insert(self.initial_credits);

        *balance = balance.saturating_add(amount);
        tracing::debug!(user_id, amount, balance = *balance, "credits refunded");

        Ok(*balance)
    }
}
