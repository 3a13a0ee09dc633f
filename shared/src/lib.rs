use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kind as stored and exposed over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out (rent, groceries, ...)
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded transaction as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ID of the category this transaction is booked against
    pub category_id: String,
    pub kind: TransactionKind,
    /// Amount as a decimal string (always positive; the kind carries the sign)
    pub amount: String,
    /// Calendar date of the transaction (YYYY-MM-DD).
    /// Older clients sent this field as `transaction_date`.
    #[serde(alias = "transaction_date")]
    pub date: String,
    /// Free-text description (max 256 characters)
    pub description: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub category_id: String,
    pub kind: TransactionKind,
    /// Amount as a decimal string (must parse as a positive number)
    pub amount: String,
    /// Optional date override (YYYY-MM-DD) - uses today if not provided
    #[serde(alias = "transaction_date")]
    pub date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    pub category_id: Option<String>,
    pub amount: Option<String>,
    #[serde(alias = "transaction_date")]
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    /// Cursor for pagination - transaction ID to start after
    pub after: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<u32>,
    /// Start date for filtering (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// End date for filtering (YYYY-MM-DD)
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// A spending/income category owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
}

/// Returned by register/login; the token goes into the Authorization header
/// as `Bearer <token>` on subsequent requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Viewpoint applied to the trend analysis and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Pessimistic,
    #[default]
    Realistic,
    Optimistic,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Pessimistic => "pessimistic",
            Perspective::Realistic => "realistic",
            Perspective::Optimistic => "optimistic",
        }
    }

    /// Parse from the stored/query string form, falling back to realistic.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "pessimistic" => Perspective::Pessimistic,
            "optimistic" => Perspective::Optimistic,
            _ => Perspective::Realistic,
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub perspective: Perspective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub perspective: Perspective,
}

/// Direction of a metric over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Trend summary for the dashboard cards, already adjusted for the
/// selected perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub income_direction: TrendDirection,
    pub expense_direction: TrendDirection,
    pub balance_direction: TrendDirection,
    /// Perspective-adjusted change percentages over the trailing window
    pub income_change_pct: f64,
    pub expense_change_pct: f64,
    pub balance_change_pct: f64,
    /// Perspective-adjusted monthly averages
    pub avg_monthly_income: f64,
    pub avg_monthly_expenses: f64,
    pub avg_monthly_balance: f64,
}

/// One point of the combined historical + projected chart series.
///
/// Historical points carry the plain triple, projected points carry the
/// `*_projected` triple, and the single connection point (the most recent
/// historical month) carries both so the two rendered line segments join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSeriesPoint {
    /// Human-readable month label (e.g. "Mar 2026")
    pub month: String,
    /// Sortable month key ("YYYY-MM")
    pub month_key: String,
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    pub balance: Option<f64>,
    pub income_projected: Option<f64>,
    pub expenses_projected: Option<f64>,
    pub balance_projected: Option<f64>,
    pub is_projected: bool,
}

/// Full trend report for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReportResponse {
    /// False when fewer than 3 of the trailing 6 months have any activity;
    /// analysis and series are absent/empty in that case.
    pub has_minimum_data: bool,
    pub perspective: Perspective,
    pub analysis: Option<TrendAnalysis>,
    pub series: Vec<CombinedSeriesPoint>,
}

/// Aggregated totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Sortable month key ("YYYY-MM")
    pub month_key: String,
    /// Human-readable month label (e.g. "Mar 2026")
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// Current-month totals plus the trailing six months for the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    pub month_income: f64,
    pub month_expenses: f64,
    pub month_balance: f64,
    pub months: Vec<MonthSummary>,
}
