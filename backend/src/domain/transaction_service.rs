//! Transaction service domain logic for the finance tracker.

use chrono::{Local, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Transaction;
use shared::{
    CreateTransactionRequest, PaginationInfo, TransactionListRequest, TransactionListResponse,
    UpdateTransactionRequest,
};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;
const MAX_DESCRIPTION_LEN: usize = 256;

#[derive(Clone)]
pub struct TransactionService {
    db: DbConnection,
}

impl TransactionService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_transaction(
        &self,
        user_id: &str,
        request: CreateTransactionRequest,
    ) -> DomainResult<Transaction> {
        if request.description.is_empty() || request.description.len() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation(format!(
                "Description must be between 1 and {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        let amount = parse_amount(&request.amount)?;

        let category = self
            .db
            .get_category(user_id, &request.category_id)
            .await?
            .ok_or(DomainError::NotFound("category"))?;
        if category.kind != request.kind {
            return Err(DomainError::Validation(format!(
                "Category '{}' is for {} transactions",
                category.name, category.kind
            )));
        }

        let date = match &request.date {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category_id: category.id,
            kind: request.kind,
            amount: format!("{:.2}", amount),
            date: date.format("%Y-%m-%d").to_string(),
            description: request.description,
            created_at: Utc::now().to_rfc3339(),
        };
        self.db.store_transaction(&transaction).await?;
        info!(
            "Recorded {} of {} on {} for user {}",
            transaction.kind, transaction.amount, transaction.date, user_id
        );
        Ok(transaction)
    }

    /// List transactions newest first with cursor pagination and optional
    /// date filtering.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        request: TransactionListRequest,
    ) -> DomainResult<TransactionListResponse> {
        let limit = request.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        // Query one extra record to determine if there are more results
        let query_limit = limit + 1;

        let mut transactions = self
            .db
            .list_transactions(
                user_id,
                query_limit,
                request.after.as_deref(),
                request.start_date.as_deref(),
                request.end_date.as_deref(),
            )
            .await?;

        let has_more = transactions.len() > limit as usize;
        if has_more {
            transactions.truncate(limit as usize);
        }
        let next_cursor = if has_more {
            transactions.last().map(|t| t.id.clone())
        } else {
            None
        };

        Ok(TransactionListResponse {
            transactions: transactions.iter().map(Transaction::to_dto).collect(),
            pagination: PaginationInfo {
                has_more,
                next_cursor,
            },
        })
    }

    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        request: UpdateTransactionRequest,
    ) -> DomainResult<Transaction> {
        let mut transaction = self
            .db
            .get_transaction(user_id, transaction_id)
            .await?
            .ok_or(DomainError::NotFound("transaction"))?;

        if let Some(category_id) = request.category_id {
            let category = self
                .db
                .get_category(user_id, &category_id)
                .await?
                .ok_or(DomainError::NotFound("category"))?;
            if category.kind != transaction.kind {
                return Err(DomainError::Validation(format!(
                    "Category '{}' is for {} transactions",
                    category.name, category.kind
                )));
            }
            transaction.category_id = category.id;
        }
        if let Some(amount) = request.amount {
            transaction.amount = format!("{:.2}", parse_amount(&amount)?);
        }
        if let Some(date) = request.date {
            transaction.date = parse_date(&date)?.format("%Y-%m-%d").to_string();
        }
        if let Some(description) = request.description {
            if description.is_empty() || description.len() > MAX_DESCRIPTION_LEN {
                return Err(DomainError::Validation(format!(
                    "Description must be between 1 and {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
            transaction.description = description;
        }

        self.db.update_transaction(&transaction).await?;
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> DomainResult<()> {
        if !self.db.delete_transaction(user_id, transaction_id).await? {
            return Err(DomainError::NotFound("transaction"));
        }
        Ok(())
    }

    /// All transactions oldest first, for export and for the trend pipeline.
    pub async fn all_transactions(&self, user_id: &str) -> DomainResult<Vec<Transaction>> {
        Ok(self.db.list_transactions_chronological(user_id).await?)
    }
}

fn parse_amount(raw: &str) -> DomainResult<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("'{}' is not a valid amount", raw)))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("'{}' is not a valid date (YYYY-MM-DD)", raw)))
}
