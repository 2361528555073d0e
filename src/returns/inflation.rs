//! Restate a cashflow series in today's purchasing power

use super::cashflows::CashflowSeries;

/// Rescale a series into real terms at an annual `inflation` rate (fraction).
///
/// Outflows grow by `(1 + inflation)^years` and inflows shrink by the same
/// factor, measured from the first date. Dates are unchanged, so the result
/// feeds straight back into [`super::xirr`].
pub fn to_real_terms(series: &CashflowSeries, inflation: f64) -> CashflowSeries {
    series.map_amounts(|amount, years| {
        let factor = (1.0 + inflation).powf(years);
        if amount < 0.0 {
            amount * factor
        } else {
            amount / factor
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::cashflows::Cashflow;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_inflates_outflows_and_deflates_inflows() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let later = start + Duration::days(731); // 2 years at 365.25 days, truncated
        let series = CashflowSeries::new(vec![
            Cashflow::new(-1000.0, start),
            Cashflow::new(-1000.0, later),
            Cashflow::new(5000.0, later),
        ])
        .unwrap();

        let real = to_real_terms(&series, 0.05);
        let factor = 1.05_f64.powf(731.0 / 365.25);

        // Entries at the start date are untouched
        assert_eq!(real.flows()[0].amount, -1000.0);
        assert_abs_diff_eq!(real.flows()[1].amount, -1000.0 * factor, epsilon = 1e-9);
        assert_abs_diff_eq!(real.flows()[2].amount, 5000.0 / factor, epsilon = 1e-9);
        assert_eq!(real.flows()[2].date, later);
    }

    #[test]
    fn test_zero_inflation_is_identity() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let series = CashflowSeries::from_monthly_plan(start, 100.0, &[50.0; 24], 1500.0);
        assert_eq!(to_real_terms(&series, 0.0), series);
    }
}
