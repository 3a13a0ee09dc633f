//! Projection of the next three months from the trailing-window trend.

use chrono::NaiveDate;

use shared::Perspective;

use super::aggregation::{month_key, month_label, shift_month};
use super::estimator::{WindowAverages, WindowTrends};
use super::perspective::{adjust_changes, factors};
use super::JitterSource;

/// Number of future months projected per run.
pub const PROJECTION_MONTHS: usize = 3;

/// Damping never reduces growth below this floor.
const DAMPING_FLOOR: f64 = 0.3;

/// One projected future month.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMonth {
    /// Sortable month key ("YYYY-MM")
    pub month_key: String,
    /// Human-readable month label (e.g. "Apr 2026")
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub is_projected: bool,
}

/// Project months +1..+3 relative to `today`'s month.
///
/// Growth per month combines the perspective-adjusted trend (re-derived from
/// the raw trend each month, capped at the perspective's growth limit) with
/// step-wise damping and one jitter draw shared by income and expenses.
/// Projected values never go negative.
pub fn project(
    trends: &WindowTrends,
    averages: &WindowAverages,
    perspective: Perspective,
    today: NaiveDate,
    jitter: &mut dyn JitterSource,
) -> Vec<ProjectedMonth> {
    let f = factors(perspective);
    let cap = f.max_growth_fraction * 100.0;
    let (income_multiplier, expense_multiplier) = match perspective {
        Perspective::Pessimistic => (0.9, 1.1),
        Perspective::Realistic => (1.0, 1.0),
        Perspective::Optimistic => (1.1, 0.9),
    };

    (1..=PROJECTION_MONTHS)
        .map(|step| {
            let damping = (1.0 - step as f64 * f.damping_per_step).max(DAMPING_FLOOR);

            let adjusted = adjust_changes(trends, perspective);
            let income_change = adjusted.income.clamp(-cap, cap);
            let expense_change = adjusted.expense.clamp(-cap, cap);

            let income_growth = averages.income * income_change * damping * 0.01;
            let expense_growth = averages.expenses * expense_change * damping * 0.01;

            // One draw per month, applied to both metrics.
            let wobble = jitter.next_factor();

            let income = ((averages.income + income_growth * wobble) * income_multiplier).max(0.0);
            let expenses =
                ((averages.expenses + expense_growth * wobble) * expense_multiplier).max(0.0);

            let month = shift_month(today, step as i32);
            ProjectedMonth {
                month_key: month_key(month),
                label: month_label(month),
                income,
                expenses,
                balance: income - expenses,
                is_projected: true,
            }
        })
        .collect()
}
