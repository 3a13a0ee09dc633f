//! Dashboard orchestration: monthly summary and the trend report.
//!
//! Nothing here caches between requests; the wall clock is read once per
//! request and handed down to the pure computations.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::errors::DomainResult;
use crate::domain::models::Transaction;
use crate::domain::settings_service::SettingsService;
use crate::domain::trend::{
    aggregation::aggregate_months, compute_trend, JitterSource, TrendTransaction, UniformJitter,
};
use shared::{DashboardSummaryResponse, MonthSummary, Perspective, TrendReportResponse};

#[derive(Clone)]
pub struct DashboardService {
    db: DbConnection,
    settings_service: SettingsService,
}

impl DashboardService {
    pub fn new(db: DbConnection, settings_service: SettingsService) -> Self {
        Self {
            db,
            settings_service,
        }
    }

    /// Current-month totals plus the trailing six months.
    pub async fn summary(&self, user_id: &str) -> DomainResult<DashboardSummaryResponse> {
        let today = Local::now().date_naive();
        self.summary_at(user_id, today).await
    }

    pub async fn summary_at(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> DomainResult<DashboardSummaryResponse> {
        let inputs = self.trend_inputs(user_id).await?;
        let buckets = aggregate_months(&inputs, today);

        let months: Vec<MonthSummary> = buckets
            .iter()
            .map(|b| MonthSummary {
                month_key: b.month_key.clone(),
                label: b.label.clone(),
                income: b.income,
                expenses: b.expenses,
                balance: b.balance,
            })
            .collect();
        // The aggregation always ends at the current month.
        let current = months.last().cloned().unwrap_or(MonthSummary {
            month_key: String::new(),
            label: String::new(),
            income: 0.0,
            expenses: 0.0,
            balance: 0.0,
        });

        Ok(DashboardSummaryResponse {
            month_income: current.income,
            month_expenses: current.expenses,
            month_balance: current.balance,
            months,
        })
    }

    /// Run the trend pipeline for a user. A `perspective` query override
    /// wins over the stored preference.
    pub async fn trend_report(
        &self,
        user_id: &str,
        perspective_override: Option<Perspective>,
    ) -> DomainResult<TrendReportResponse> {
        let today = Local::now().date_naive();
        let mut jitter = UniformJitter;
        self.trend_report_at(user_id, perspective_override, today, &mut jitter)
            .await
    }

    pub async fn trend_report_at(
        &self,
        user_id: &str,
        perspective_override: Option<Perspective>,
        today: NaiveDate,
        jitter: &mut (dyn JitterSource + Send),
    ) -> DomainResult<TrendReportResponse> {
        let perspective = match perspective_override {
            Some(perspective) => perspective,
            None => self.settings_service.get_settings(user_id).await?.perspective,
        };

        let inputs = self.trend_inputs(user_id).await?;
        let report = compute_trend(&inputs, perspective, today, jitter);
        info!(
            "Trend report for user {}: perspective={}, has_minimum_data={}",
            user_id, perspective, report.has_minimum_data
        );

        Ok(TrendReportResponse {
            has_minimum_data: report.has_minimum_data,
            perspective,
            analysis: report.analysis,
            series: report.series,
        })
    }

    async fn trend_inputs(&self, user_id: &str) -> DomainResult<Vec<TrendTransaction>> {
        let transactions = self.db.list_transactions_chronological(user_id).await?;
        Ok(transactions
            .iter()
            .map(Transaction::to_trend_input)
            .collect())
    }
}
