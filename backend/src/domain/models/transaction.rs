//! Domain model for a transaction.

use serde::{Deserialize, Serialize};
use shared::TransactionKind;

use crate::domain::trend::TrendTransaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ID of the user this transaction belongs to
    pub user_id: String,
    pub category_id: String,
    pub kind: TransactionKind,
    /// Amount as a decimal string (always positive; the kind carries the sign)
    pub amount: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub description: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl Transaction {
    pub fn to_dto(&self) -> shared::Transaction {
        shared::Transaction {
            id: self.id.clone(),
            category_id: self.category_id.clone(),
            kind: self.kind,
            amount: self.amount.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            created_at: self.created_at.clone(),
        }
    }

    /// The view of this transaction the trend pipeline consumes.
    pub fn to_trend_input(&self) -> TrendTransaction {
        TrendTransaction {
            kind: self.kind,
            amount: self.amount.clone(),
            date: Some(self.date.clone()),
            transaction_date: None,
        }
    }

    /// Amount as a number; non-numeric amounts count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.trim().parse::<f64>().unwrap_or(0.0)
    }
}
