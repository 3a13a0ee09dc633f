//! Trend analysis and forecasting for the dashboard.
//!
//! The whole pipeline is a pure function of its inputs: the transaction set,
//! the selected perspective, a reference date captured once by the caller,
//! and a jitter source for the projection's bounded randomness. Nothing is
//! persisted between runs; the dashboard recomputes on every request.
//!
//! Stages: aggregate into monthly buckets, estimate direction and percent
//! change over the trailing window, reshape for the perspective, project
//! three future months, and compose the combined chart series.

pub mod aggregation;
pub mod estimator;
pub mod perspective;
pub mod projector;
pub mod series;

use chrono::NaiveDate;
use rand::Rng;

use shared::{Perspective, TrendAnalysis, CombinedSeriesPoint, TransactionKind};

use aggregation::aggregate_months;
use estimator::{estimate, has_minimum_data, trailing_window, window_averages};
use perspective::build_analysis;
use projector::project;
use series::compose_series;

/// Raw transaction record fed into the pipeline.
///
/// The upstream transaction store has historically exposed the date under
/// two different field names; both are tolerated and the first present one
/// wins. Amounts arrive as decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTransaction {
    pub kind: TransactionKind,
    pub amount: String,
    pub date: Option<String>,
    pub transaction_date: Option<String>,
}

impl TrendTransaction {
    /// The transaction's date under whichever field name it arrived.
    pub fn recorded_date(&self) -> Option<&str> {
        self.date.as_deref().or(self.transaction_date.as_deref())
    }
}

/// Source of the per-month multiplicative growth jitter.
///
/// The single nondeterministic operation in the pipeline; injected so tests
/// can pin it and assert exact numbers.
pub trait JitterSource {
    /// Next jitter factor, uniform in [0.97, 1.03] for the real source.
    fn next_factor(&mut self) -> f64;
}

/// Production jitter source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct UniformJitter;

impl JitterSource for UniformJitter {
    fn next_factor(&mut self) -> f64 {
        rand::thread_rng().gen_range(0.97..=1.03)
    }
}

/// Constant jitter factor, for deterministic runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_factor(&mut self) -> f64 {
        self.0
    }
}

/// Result of one pipeline run.
///
/// When fewer than three of the trailing six months have any activity the
/// run terminates in the insufficient-data state: `has_minimum_data` is
/// false, `analysis` is absent and `series` is empty. That state is not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub has_minimum_data: bool,
    pub analysis: Option<TrendAnalysis>,
    pub series: Vec<CombinedSeriesPoint>,
}

impl TrendReport {
    fn insufficient_data() -> Self {
        Self {
            has_minimum_data: false,
            analysis: None,
            series: Vec::new(),
        }
    }
}

/// Run the full pipeline once.
///
/// `today` is the wall-clock date, read once by the caller and threaded
/// through every stage; the pipeline itself never touches the clock.
pub fn compute_trend(
    transactions: &[TrendTransaction],
    perspective: Perspective,
    today: NaiveDate,
    jitter: &mut dyn JitterSource,
) -> TrendReport {
    let buckets = aggregate_months(transactions, today);
    if !has_minimum_data(&buckets) {
        return TrendReport::insufficient_data();
    }

    let window = trailing_window(&buckets);
    let trends = estimate(window);
    let averages = window_averages(window);

    let analysis = build_analysis(&trends, &averages, perspective);
    let projected = project(&trends, &averages, perspective, today, jitter);
    let series = compose_series(window, &projected);

    TrendReport {
        has_minimum_data: true,
        analysis: Some(analysis),
        series,
    }
}
