use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionKind};

/// Income and expense ledger, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceLedger {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl FinanceLedger {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Records a transaction at the top of the ledger. Negative amounts are
    /// stored as their absolute value; the sign comes from `kind`.
    pub fn add(
        &mut self,
        amount: f64,
        description: String,
        kind: TransactionKind,
        now: DateTime<FixedOffset>,
    ) -> u64 {
        let id = self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.transactions.insert(
            0,
            Transaction { id, amount: amount.abs(), description, kind, date: now },
        );
        id
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() != len_before
    }

    /// Total income minus total expenses.
    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00+00:00").unwrap()
    }

    #[test]
    fn balance_nets_income_against_expenses() {
        let mut l = FinanceLedger::default();
        l.add(1000.0, "Salary".into(), TransactionKind::Income, now());
        l.add(250.5, "Groceries".into(), TransactionKind::Expense, now());
        let fee = l.add(-20.0, "Fee".into(), TransactionKind::Expense, now());
        assert_eq!(l.balance(), 729.5);
        assert_eq!(l.total(TransactionKind::Expense), 270.5);
        // newest first
        assert_eq!(l.transactions()[0].id, fee);
        assert!(l.delete(fee));
        assert_eq!(l.balance(), 749.5);
    }
}
