//! Running state of one compounding simulation

/// Balance and bookkeeping threaded through the monthly loop.
///
/// Owned by a single [`super::ProjectionEngine`] run and dropped once the
/// snapshots have been extracted.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub projection_month: u32,

    /// Investment year (1-indexed)
    pub year: u32,

    /// Month within the investment year (1-12)
    pub month_in_year: u32,

    /// Current balance
    pub balance: f64,

    /// Lumpsum plus every contribution made so far
    pub total_invested: f64,

    /// Amount contributed each month until the next step-up
    pub contribution: f64,

    /// Interest earned so far
    pub cumulative_gains: f64,

    /// Sum of yearly step-up increments (`contribution × step-up × 12`)
    pub total_step_up: f64,
}

impl ProjectionState {
    /// State before the first month: only the lumpsum is invested
    pub fn new(lumpsum: f64, monthly_contribution: f64) -> Self {
        Self {
            projection_month: 0,
            year: 1,
            month_in_year: 0,
            balance: lumpsum,
            total_invested: lumpsum,
            contribution: monthly_contribution,
            cumulative_gains: 0.0,
            total_step_up: 0.0,
        }
    }

    /// Advance the clock to the next month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.year = (self.projection_month - 1) / 12 + 1;
        self.month_in_year = (self.projection_month - 1) % 12 + 1;
    }

    /// Credit one month of interest to the balance, returning the gain
    pub fn credit_interest(&mut self, monthly_rate: f64) -> f64 {
        let gain = self.balance * monthly_rate;
        self.balance += gain;
        self.cumulative_gains += gain;
        gain
    }

    /// Add this month's contribution to the balance
    pub fn contribute(&mut self) {
        self.balance += self.contribution;
        self.total_invested += self.contribution;
    }

    /// Raise the contribution for the coming year by `step_up` (fraction)
    pub fn step_up(&mut self, step_up: f64) {
        self.total_step_up += self.contribution * step_up * 12.0;
        self.contribution *= 1.0 + step_up;
    }

    /// Whether this month closes an investment year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == 12
    }

    /// Interest earned so far exceeds the money put in
    pub fn gains_exceed_invested(&self) -> bool {
        self.cumulative_gains > self.total_invested
    }
}
