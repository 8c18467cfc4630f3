//! Account model for the in-memory ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named balance. Accounts are seeded at startup and never created or
/// removed by requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

/// Starting balances, restored every time the process starts.
///
/// | account | balance |
/// |---------|---------|
/// | alice   | 1000.00 |
/// | bob     |  500.00 |
/// | admin   | 9999.99 |
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account::new("alice", Decimal::new(100_000, 2)),
        Account::new("bob", Decimal::new(50_000, 2)),
        Account::new("admin", Decimal::new(999_999, 2)),
    ]
}
