//! Finance ledger entries shown in the finance panel

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Income versus expense
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    /// Accepts any casing and surrounding whitespace
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Unsupported transaction type: {value}")),
        }
    }
}

/// Ledger entry with free-form metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub transaction_type: TransactionType,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub occurred_on: NaiveDate,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Income and expenses as returned by the backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    #[serde(default)]
    pub income: Vec<Transaction>,
    #[serde(default)]
    pub expenses: Vec<Transaction>,
}

impl FinanceSnapshot {
    /// Find a transaction by id in either list
    pub fn find(&self, transaction_id: &str) -> Option<&Transaction> {
        self.income
            .iter()
            .chain(self.expenses.iter())
            .find(|transaction| transaction.transaction_id == transaction_id)
    }
}

/// Body returned after duplicating a transaction
#[derive(Clone, Debug, Deserialize)]
pub struct DuplicateOutcome {
    pub transaction: Transaction,
    pub snapshot: FinanceSnapshot,
}
