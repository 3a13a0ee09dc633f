//! CSV export of a user's transaction history.

use anyhow::Context;
use chrono::Utc;
use tracing::info;

use crate::db::DbConnection;
use crate::domain::errors::DomainResult;

/// Generated export: the CSV payload plus a suggested download filename.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub transaction_count: usize,
}

#[derive(Clone)]
pub struct ExportService {
    db: DbConnection,
}

impl ExportService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Export all of a user's transactions, oldest first.
    pub async fn export_transactions_csv(&self, user_id: &str) -> DomainResult<CsvExport> {
        let transactions = self.db.list_transactions_chronological(user_id).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["date", "kind", "category_id", "amount", "description"])
            .context("writing CSV header")?;
        for transaction in &transactions {
            let kind = transaction.kind.to_string();
            writer
                .write_record([
                    transaction.date.as_str(),
                    kind.as_str(),
                    transaction.category_id.as_str(),
                    transaction.amount.as_str(),
                    transaction.description.as_str(),
                ])
                .context("writing CSV row")?;
        }
        let bytes = writer.into_inner().context("flushing CSV writer")?;
        let content = String::from_utf8(bytes).context("CSV output was not UTF-8")?;

        let filename = format!("transactions_{}.csv", Utc::now().format("%Y%m%d"));
        info!(
            "Exported {} transactions for user {} ({} bytes)",
            transactions.len(),
            user_id,
            content.len()
        );

        Ok(CsvExport {
            filename,
            transaction_count: transactions.len(),
            content,
        })
    }
}
