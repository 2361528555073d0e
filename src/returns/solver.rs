//! Scalar root finding: Newton-Raphson with a bisection fallback, and the
//! bisection routine shared with the goal solvers.

/// Which method produced a [`Root`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMethod {
    Newton,
    Bisection,
}

/// Result of a root search.
///
/// `converged` is false when the iteration budget ran out before the
/// objective fell below the precision threshold; `value` is then the best
/// estimate found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub value: f64,
    pub converged: bool,
    pub method: SolveMethod,
}

/// Closed search interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
}

impl Bracket {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Interval halving over a [`Bracket`].
///
/// The objective is oriented so that a negative value means the root lies
/// above the probe: `objective(mid) < 0` moves the lower bound up, anything
/// else moves the upper bound down. With `precision` set, the search stops as
/// soon as `|objective(mid)| < precision`; without it every iteration runs
/// and the final midpoint is returned.
#[derive(Debug, Clone, Copy)]
pub struct Bisection {
    pub bracket: Bracket,
    pub max_iterations: u32,
    pub precision: Option<f64>,
}

impl Bisection {
    /// Bisection that always spends its whole iteration budget
    pub fn fixed(bracket: Bracket, max_iterations: u32) -> Self {
        Self { bracket, max_iterations, precision: None }
    }

    /// Bisection that stops once the objective is within `precision` of zero
    pub fn until(bracket: Bracket, max_iterations: u32, precision: f64) -> Self {
        Self { bracket, max_iterations, precision: Some(precision) }
    }

    pub fn solve<F>(&self, mut objective: F) -> Root
    where
        F: FnMut(f64) -> f64,
    {
        let mut lower = self.bracket.lower;
        let mut upper = self.bracket.upper;
        let mut mid = self.bracket.midpoint();

        for _ in 0..self.max_iterations {
            mid = (lower + upper) / 2.0;
            let value = objective(mid);

            if let Some(precision) = self.precision {
                if value.abs() < precision {
                    return Root { value: mid, converged: true, method: SolveMethod::Bisection };
                }
            }

            if value < 0.0 {
                lower = mid;
            } else {
                upper = mid;
            }
        }

        Root {
            value: mid,
            // A fixed-budget search has no precision target to miss
            converged: self.precision.is_none(),
            method: SolveMethod::Bisection,
        }
    }
}

/// Newton-Raphson root finder with a bisection fallback on the same bracket.
///
/// Used for annualized return discovery, where the objective is the NPV of a
/// dated cashflow series as a function of the rate.
#[derive(Debug, Clone, Copy)]
pub struct RootFinder {
    /// Search interval, also used to clamp the initial guess
    pub bracket: Bracket,

    /// Objective magnitude accepted as a root
    pub precision: f64,

    /// Newton iterations, and separately the bisection iterations
    pub max_iterations: u32,

    /// Forward finite-difference step for the derivative
    pub derivative_step: f64,

    /// Derivative magnitude below which Newton is abandoned
    pub min_derivative: f64,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self {
            bracket: Bracket::new(-0.99, 5.0),
            precision: 1e-6,
            max_iterations: 200,
            derivative_step: 1e-6,
            min_derivative: 1e-10,
        }
    }
}

impl RootFinder {
    pub fn solve<F>(&self, objective: F, initial_guess: f64) -> Root
    where
        F: Fn(f64) -> f64,
    {
        let mut rate = initial_guess.clamp(self.bracket.lower, self.bracket.upper);

        for _ in 0..self.max_iterations {
            let value = objective(rate);
            if !value.is_finite() {
                log::debug!("newton left the valid domain at rate {rate}; bisecting");
                break;
            }
            if value.abs() < self.precision {
                return Root { value: rate, converged: true, method: SolveMethod::Newton };
            }

            let derivative = (objective(rate + self.derivative_step) - value) / self.derivative_step;
            if !derivative.is_finite() || derivative.abs() < self.min_derivative {
                log::debug!("flat derivative at rate {rate}; bisecting");
                break;
            }
            rate -= value / derivative;
        }

        self.bisect(objective)
    }

    fn bisect<F>(&self, objective: F) -> Root
    where
        F: Fn(f64) -> f64,
    {
        // Sign of the objective at the lower bound decides which half keeps
        // the root; it stays fixed because `lower` only ever moves to a point
        // of the same sign.
        let lower_sign = objective(self.bracket.lower).signum();

        Bisection::until(self.bracket, self.max_iterations, self.precision)
            .solve(|rate| -objective(rate) * lower_sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_newton_finds_square_root() {
        let finder = RootFinder::default();
        let root = finder.solve(|x| x * x - 2.0, 1.0);

        assert!(root.converged);
        assert_eq!(root.method, SolveMethod::Newton);
        assert_abs_diff_eq!(root.value, 2.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_flat_derivative_falls_back_to_bisection() {
        // Objective is flat at the starting point, so Newton cannot take a step
        let finder = RootFinder::default();
        let objective = |x: f64| if x < 1.0 { -1.0 } else { x - 1.5 };
        let root = finder.solve(objective, 0.0);

        assert_eq!(root.method, SolveMethod::Bisection);
        assert!(root.converged);
        assert_abs_diff_eq!(root.value, 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_non_finite_objective_falls_back_to_bisection() {
        let finder = RootFinder::default();
        // Starting inside the region where the objective is undefined
        let objective = |x: f64| if x < 0.0 { f64::NAN } else { (x - 0.25) * 1000.0 };
        let root = finder.solve(objective, -0.5);

        assert_eq!(root.method, SolveMethod::Bisection);
    }

    #[test]
    fn test_unreachable_root_returns_best_estimate() {
        let finder = RootFinder::default();
        // Strictly positive everywhere, so neither method can reach zero
        let root = finder.solve(|x| x * x + 1.0, 0.0);

        assert!(!root.converged);
        assert!(root.value >= finder.bracket.lower && root.value <= finder.bracket.upper);
    }

    #[test]
    fn test_fixed_bisection_runs_full_budget() {
        let mut calls = 0;
        let root = Bisection::fixed(Bracket::new(0.0, 100.0), 100).solve(|x| {
            calls += 1;
            x - 42.0
        });

        assert_eq!(calls, 100);
        assert!(root.converged);
        assert_abs_diff_eq!(root.value, 42.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bisection_with_precision_exits_early() {
        let mut calls = 0;
        let root = Bisection::until(Bracket::new(0.0, 8.0), 200, 1e-9).solve(|x| {
            calls += 1;
            x - 4.0
        });

        assert_eq!(calls, 1);
        assert_eq!(root.value, 4.0);
    }

    #[test]
    fn test_zero_iterations_returns_midpoint() {
        let root = Bisection::fixed(Bracket::new(2.0, 6.0), 0).solve(|x| x);
        assert_eq!(root.value, 4.0);
    }
}
