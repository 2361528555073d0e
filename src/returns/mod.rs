//! Annualized return (XIRR) of dated cashflows, nominal and inflation-adjusted

mod cashflows;
mod inflation;
mod solver;

pub use cashflows::{Cashflow, CashflowSeries, AVERAGE_MONTH_SECONDS, DAYS_PER_YEAR};
pub use inflation::to_real_terms;
pub use solver::{Bisection, Bracket, Root, RootFinder, SolveMethod};

/// Initial rate guess when the series spans no time
const FALLBACK_GUESS: f64 = 0.1;

/// Annualized internal rate of return of `series`, as a percentage.
///
/// Returns 0.0 when the series has no outflow or no inflow. Non-convergence
/// is not an error; the best estimate is returned.
pub fn xirr(series: &CashflowSeries) -> f64 {
    xirr_with(series, &RootFinder::default()).value * 100.0
}

/// XIRR after restating the series in today's money at `inflation` (fraction),
/// as a percentage
pub fn real_xirr(series: &CashflowSeries, inflation: f64) -> f64 {
    xirr(&to_real_terms(series, inflation))
}

/// XIRR as a fraction, with the solver's convergence details
pub fn xirr_with(series: &CashflowSeries, finder: &RootFinder) -> Root {
    let invested = series.total_outflow();
    let received = series.total_inflow();

    if invested == 0.0 || received == 0.0 {
        return Root { value: 0.0, converged: true, method: SolveMethod::Newton };
    }

    let years = series.span_years();
    let guess = if years > 0.0 {
        (received / invested.abs()).powf(1.0 / years) - 1.0
    } else {
        FALLBACK_GUESS
    };

    let root = finder.solve(|rate| series.npv(rate), guess);
    if !root.converged {
        log::debug!(
            "xirr did not reach precision {:e}; best estimate {:.6}",
            finder.precision,
            root.value
        );
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn day0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn one_year_series() -> CashflowSeries {
        CashflowSeries::new(vec![
            Cashflow::new(-1000.0, day0()),
            Cashflow::new(1100.0, day0() + Duration::days(365)),
        ])
        .unwrap()
    }

    #[test]
    fn test_simple_xirr() {
        // 365 days is slightly short of a 365.25-day year, so ~10.007%
        let rate = xirr(&one_year_series());
        assert!((rate - 10.0).abs() < 0.5, "Expected ~10% XIRR, got {}", rate);
        assert_abs_diff_eq!(rate, 10.0072, epsilon = 1e-3);
    }

    #[test]
    fn test_no_inflow_is_zero() {
        let series = CashflowSeries::new(vec![
            Cashflow::new(-1000.0, day0()),
            Cashflow::new(-500.0, day0() + Duration::days(30)),
        ])
        .unwrap();
        assert_eq!(xirr(&series), 0.0);
    }

    #[test]
    fn test_no_outflow_is_zero() {
        let series = CashflowSeries::new(vec![Cashflow::new(1000.0, day0())]).unwrap();
        assert_eq!(xirr(&series), 0.0);
        assert_eq!(xirr(&CashflowSeries::new(Vec::new()).unwrap()), 0.0);
    }

    #[test]
    fn test_same_day_series_uses_fallback_guess() {
        let series = CashflowSeries::new(vec![
            Cashflow::new(-1000.0, day0()),
            Cashflow::new(1000.0, day0()),
        ])
        .unwrap();

        // NPV is zero at every rate, so the fallback guess is accepted as-is
        let root = xirr_with(&series, &RootFinder::default());
        assert!(root.converged);
        assert_abs_diff_eq!(root.value, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_real_xirr_matches_nominal_at_zero_inflation() {
        let series = CashflowSeries::from_monthly_plan(day0(), 50_000.0, &[10_000.0; 60], 900_000.0);
        assert_abs_diff_eq!(real_xirr(&series, 0.0), xirr(&series), epsilon = 1e-9);
    }

    #[test]
    fn test_real_xirr_single_period() {
        // Only the inflow is deflated: 1100 / 1.06^(365/365.25)
        let real = real_xirr(&one_year_series(), 0.06);
        let expected = ((1100.0 / 1.06_f64.powf(365.0 / 365.25)) / 1000.0)
            .powf(365.25 / 365.0)
            - 1.0;
        assert_abs_diff_eq!(real, expected * 100.0, epsilon = 1e-3);
        assert!(real < xirr(&one_year_series()));
    }
}
