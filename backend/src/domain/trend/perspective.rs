//! Perspective factor table and trend reshaping.
//!
//! A perspective biases the raw trend percentages before they are shown on
//! the dashboard or fed into the projection. The factor table is fixed;
//! there is exactly one row per perspective.

use shared::{Perspective, TrendAnalysis};

use super::estimator::{WindowAverages, WindowTrends};

/// Tuning constants for one perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveFactors {
    /// Multiplier applied to every raw percent change
    pub trend_factor: f64,
    /// Cap on projected growth, as a fraction (0.05 = +/-5%)
    pub max_growth_fraction: f64,
    /// Per-step damping of projected growth
    pub damping_per_step: f64,
    /// Amplifier for unfavourable movement (realistic reshaping only)
    pub negative_boost: f64,
}

const PESSIMISTIC: PerspectiveFactors = PerspectiveFactors {
    trend_factor: 0.4,
    max_growth_fraction: 0.08,
    damping_per_step: 0.15,
    negative_boost: 2.2,
};

const REALISTIC: PerspectiveFactors = PerspectiveFactors {
    trend_factor: 0.3,
    max_growth_fraction: 0.05,
    damping_per_step: 0.20,
    negative_boost: 1.0,
};

const OPTIMISTIC: PerspectiveFactors = PerspectiveFactors {
    trend_factor: 0.8,
    max_growth_fraction: 0.15,
    damping_per_step: 0.05,
    negative_boost: 0.5,
};

pub fn factors(perspective: Perspective) -> &'static PerspectiveFactors {
    match perspective {
        Perspective::Pessimistic => &PESSIMISTIC,
        Perspective::Realistic => &REALISTIC,
        Perspective::Optimistic => &OPTIMISTIC,
    }
}

/// Perspective-adjusted change percentages for the trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedChanges {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Reshape the raw trend percentages for the selected perspective.
///
/// Pessimistic and optimistic dampen momentum of the "wrong" sign and then
/// apply a fixed penalty/bonus to income and expense; the realistic branch
/// instead amplifies unfavourable movement by `negative_boost`. Balance is
/// only touched by the realistic branch.
pub fn adjust_changes(trends: &WindowTrends, perspective: Perspective) -> AdjustedChanges {
    let f = factors(perspective);
    let mut income = trends.income.percent_change * f.trend_factor;
    let mut expense = trends.expense.percent_change * f.trend_factor;
    let mut balance = trends.balance.percent_change * f.trend_factor;

    match perspective {
        Perspective::Pessimistic => {
            if income > 0.0 {
                income *= 0.3;
            }
            if expense < 0.0 {
                expense *= 0.3;
            }
            income -= 5.0;
            expense += 8.0;
        }
        Perspective::Optimistic => {
            if income < 0.0 {
                income *= 0.3;
            }
            if expense > 0.0 {
                expense *= 0.3;
            }
            income += 8.0;
            expense -= 5.0;
        }
        Perspective::Realistic => {
            if income < 0.0 {
                income *= f.negative_boost;
            }
            if expense > 0.0 {
                expense *= f.negative_boost;
            }
            if balance < 0.0 {
                balance *= f.negative_boost;
            }
        }
    }

    AdjustedChanges {
        income,
        expense,
        balance,
    }
}

/// Combine estimator directions with adjusted percentages and averages into
/// the dashboard analysis record.
pub fn build_analysis(
    trends: &WindowTrends,
    averages: &WindowAverages,
    perspective: Perspective,
) -> TrendAnalysis {
    let adjusted = adjust_changes(trends, perspective);
    let avg_income = averages.income * (1.0 + adjusted.income * 0.01);
    let avg_expenses = averages.expenses * (1.0 + adjusted.expense * 0.01);

    TrendAnalysis {
        income_direction: trends.income.direction,
        expense_direction: trends.expense.direction,
        balance_direction: trends.balance.direction,
        income_change_pct: adjusted.income,
        expense_change_pct: adjusted.expense,
        balance_change_pct: adjusted.balance,
        avg_monthly_income: avg_income,
        avg_monthly_expenses: avg_expenses,
        avg_monthly_balance: avg_income - avg_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trend::estimator::TrendResult;
    use shared::TrendDirection;

    fn trends(income_pct: f64, expense_pct: f64, balance_pct: f64) -> WindowTrends {
        let result = |percent_change| TrendResult {
            direction: TrendDirection::Up,
            percent_change,
        };
        WindowTrends {
            income: result(income_pct),
            expense: result(expense_pct),
            balance: result(balance_pct),
        }
    }

    #[test]
    fn factor_table_matches_tuning() {
        assert_eq!(factors(Perspective::Pessimistic).trend_factor, 0.4);
        assert_eq!(factors(Perspective::Realistic).max_growth_fraction, 0.05);
        assert_eq!(factors(Perspective::Optimistic).damping_per_step, 0.05);
    }

    #[test]
    fn perspectives_order_adjusted_income_change() {
        // Raw income change of +10%:
        //   pessimistic: 10 * 0.4 = 4, positive so * 0.3 = 1.2, - 5 = -3.8
        //   realistic:   10 * 0.3 = 3, no reshaping
        //   optimistic:  10 * 0.8 = 8, not negative, + 8 = 16
        let t = trends(10.0, 0.0, 0.0);
        let pessimistic = adjust_changes(&t, Perspective::Pessimistic).income;
        let realistic = adjust_changes(&t, Perspective::Realistic).income;
        let optimistic = adjust_changes(&t, Perspective::Optimistic).income;

        assert!((pessimistic - -3.8).abs() < 1e-9);
        assert!((realistic - 3.0).abs() < 1e-9);
        assert!((optimistic - 16.0).abs() < 1e-9);
        assert!(pessimistic < realistic && realistic < optimistic);
    }

    #[test]
    fn pessimistic_penalizes_expense_improvement() {
        // Falling expenses (-10%) get dampened then pushed up by the penalty:
        // -10 * 0.4 = -4, negative so * 0.3 = -1.2, + 8 = 6.8
        let t = trends(0.0, -10.0, 0.0);
        let adjusted = adjust_changes(&t, Perspective::Pessimistic);
        assert!((adjusted.expense - 6.8).abs() < 1e-9);
    }

    #[test]
    fn optimistic_softens_rising_expenses() {
        // +10% expenses: 10 * 0.8 = 8, positive so * 0.3 = 2.4, - 5 = -2.6
        let t = trends(0.0, 10.0, 0.0);
        let adjusted = adjust_changes(&t, Perspective::Optimistic);
        assert!((adjusted.expense - -2.6).abs() < 1e-9);
    }

    #[test]
    fn realistic_boost_is_identity_at_current_tuning() {
        let t = trends(-10.0, 10.0, -10.0);
        let adjusted = adjust_changes(&t, Perspective::Realistic);
        assert!((adjusted.income - -3.0).abs() < 1e-9);
        assert!((adjusted.expense - 3.0).abs() < 1e-9);
        assert!((adjusted.balance - -3.0).abs() < 1e-9);
    }

    #[test]
    fn realistic_leaves_balance_sign_dependent() {
        // Positive balance trend is untouched by the boost step.
        let t = trends(0.0, 0.0, 20.0);
        let adjusted = adjust_changes(&t, Perspective::Realistic);
        assert!((adjusted.balance - 6.0).abs() < 1e-9);
    }

    #[test]
    fn analysis_adjusts_averages_and_recomputes_balance() {
        let t = trends(10.0, 10.0, 0.0);
        let averages = WindowAverages {
            income: 1000.0,
            expenses: 600.0,
            balance: 400.0,
        };
        let analysis = build_analysis(&t, &averages, Perspective::Realistic);
        // +3% on both metrics at realistic tuning
        assert!((analysis.avg_monthly_income - 1030.0).abs() < 1e-9);
        assert!((analysis.avg_monthly_expenses - 618.0).abs() < 1e-9);
        assert!((analysis.avg_monthly_balance - 412.0).abs() < 1e-9);
        assert_eq!(analysis.income_direction, TrendDirection::Up);
    }
}
