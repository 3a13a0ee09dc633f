//! Merging of historical and projected months into one chart series.

use shared::CombinedSeriesPoint;

use super::aggregation::MonthBucket;
use super::projector::ProjectedMonth;

/// Merge the trailing historical window and the projected months into one
/// chronological series.
///
/// Historical points carry the plain triple; projected points carry the
/// `*_projected` triple. The last historical point additionally repeats its
/// own values in the projected fields so the dashed projection line starts
/// where the solid historical line ends. No arithmetic happens here.
pub fn compose_series(
    window: &[MonthBucket],
    projected: &[ProjectedMonth],
) -> Vec<CombinedSeriesPoint> {
    let mut series = Vec::with_capacity(window.len() + projected.len());

    for (index, bucket) in window.iter().enumerate() {
        let is_connection = index == window.len() - 1;
        series.push(CombinedSeriesPoint {
            month: bucket.label.clone(),
            month_key: bucket.month_key.clone(),
            income: Some(bucket.income),
            expenses: Some(bucket.expenses),
            balance: Some(bucket.balance),
            income_projected: is_connection.then_some(bucket.income),
            expenses_projected: is_connection.then_some(bucket.expenses),
            balance_projected: is_connection.then_some(bucket.balance),
            is_projected: false,
        });
    }

    for month in projected {
        series.push(CombinedSeriesPoint {
            month: month.label.clone(),
            month_key: month.month_key.clone(),
            income: None,
            expenses: None,
            balance: None,
            income_projected: Some(month.income),
            expenses_projected: Some(month.expenses),
            balance_projected: Some(month.balance),
            is_projected: month.is_projected,
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(month_key: &str, income: f64) -> MonthBucket {
        MonthBucket {
            month_key: month_key.to_string(),
            label: month_key.to_string(),
            income,
            expenses: income / 2.0,
            balance: income / 2.0,
        }
    }

    fn projected(month_key: &str, income: f64) -> ProjectedMonth {
        ProjectedMonth {
            month_key: month_key.to_string(),
            label: month_key.to_string(),
            income,
            expenses: income / 2.0,
            balance: income / 2.0,
            is_projected: true,
        }
    }

    #[test]
    fn composes_six_points_in_order() {
        let window = vec![bucket("2026-01", 100.0), bucket("2026-02", 200.0), bucket("2026-03", 300.0)];
        let future = vec![projected("2026-04", 310.0), projected("2026-05", 320.0), projected("2026-06", 330.0)];
        let series = compose_series(&window, &future);

        assert_eq!(series.len(), 6);
        let keys: Vec<&str> = series.iter().map(|p| p.month_key.as_str()).collect();
        assert_eq!(keys, vec!["2026-01", "2026-02", "2026-03", "2026-04", "2026-05", "2026-06"]);
    }

    #[test]
    fn connection_point_is_unique_and_last_historical() {
        let window = vec![bucket("2026-01", 100.0), bucket("2026-02", 200.0), bucket("2026-03", 300.0)];
        let future = vec![projected("2026-04", 310.0)];
        let series = compose_series(&window, &future);

        let both: Vec<usize> = series
            .iter()
            .enumerate()
            .filter(|(_, p)| p.income.is_some() && p.income_projected.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(both, vec![2]);

        let connection = &series[2];
        assert_eq!(connection.income_projected, connection.income);
        assert_eq!(connection.expenses_projected, connection.expenses);
        assert_eq!(connection.balance_projected, connection.balance);
        assert!(!connection.is_projected);

        // The first projected-only point follows immediately.
        assert!(series[3].income.is_none());
        assert!(series[3].income_projected.is_some());
        assert!(series[3].is_projected);
    }

    #[test]
    fn every_point_has_one_populated_triple() {
        let window = vec![bucket("2026-01", 100.0), bucket("2026-02", 200.0), bucket("2026-03", 300.0)];
        let future = vec![projected("2026-04", 310.0), projected("2026-05", 320.0)];
        for point in compose_series(&window, &future) {
            assert!(point.income.is_some() || point.income_projected.is_some());
        }
    }
}
