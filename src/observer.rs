//! Checkpoint events raised while a plan is being calculated

use std::fmt;

/// Notable conditions the calculator reports without failing
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// Expected return above 20%
    OptimisticReturn { expected_return_pct: f64 },

    /// Yearly step-up above 25%
    AggressiveStepUp { step_up_pct: f64 },

    /// Fund expense ratio above 2.5%
    HighExpenseRatio { expense_ratio_pct: f64 },

    /// A goal-based run solved for the monthly contribution
    SolvedContribution {
        target: f64,
        years: f64,
        monthly: f64,
        step_up_pct: f64,
    },

    /// A timeline run solved for the horizon
    SolvedDuration {
        target: f64,
        monthly: f64,
        years: f64,
        step_up_pct: f64,
    },
}

impl PlanEvent {
    /// Whether the event flags a questionable input rather than an outcome
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            PlanEvent::OptimisticReturn { .. }
                | PlanEvent::AggressiveStepUp { .. }
                | PlanEvent::HighExpenseRatio { .. }
        )
    }
}

impl fmt::Display for PlanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanEvent::OptimisticReturn { expected_return_pct } => {
                write!(f, "{expected_return_pct}% return is very optimistic")
            }
            PlanEvent::AggressiveStepUp { step_up_pct } => {
                write!(f, "{step_up_pct}% yearly step-up may be unsustainable")
            }
            PlanEvent::HighExpenseRatio { expense_ratio_pct } => {
                write!(f, "{expense_ratio_pct}% expense ratio is high")
            }
            PlanEvent::SolvedContribution { target, years, monthly, step_up_pct } => write!(
                f,
                "to reach {target:.0} in {years} years invest {monthly:.0}/month (with {step_up_pct}% yearly step-up)"
            ),
            PlanEvent::SolvedDuration { target, monthly, years, step_up_pct } => write!(
                f,
                "to reach {target:.0} with {monthly:.0}/month need about {years} years (with {step_up_pct}% yearly step-up)"
            ),
        }
    }
}

/// Receives events at the calculator's checkpoints
pub trait PlanObserver {
    fn on_event(&mut self, event: &PlanEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PlanObserver for LogObserver {
    fn on_event(&mut self, event: &PlanEvent) {
        if event.is_warning() {
            log::warn!("{event}");
        } else {
            log::info!("{event}");
        }
    }
}

/// Collects events for later inspection
impl PlanObserver for Vec<PlanEvent> {
    fn on_event(&mut self, event: &PlanEvent) {
        self.push(event.clone());
    }
}

/// Parameter sanity checks; thresholds are strict
pub(crate) fn sanity_events(
    expected_return_pct: f64,
    step_up_pct: f64,
    expense_ratio_pct: f64,
) -> Vec<PlanEvent> {
    let mut events = Vec::new();
    if expected_return_pct > 20.0 {
        events.push(PlanEvent::OptimisticReturn { expected_return_pct });
    }
    if step_up_pct > 25.0 {
        events.push(PlanEvent::AggressiveStepUp { step_up_pct });
    }
    if expense_ratio_pct > 2.5 {
        events.push(PlanEvent::HighExpenseRatio { expense_ratio_pct });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanity_thresholds_are_strict() {
        assert!(sanity_events(20.0, 25.0, 2.5).is_empty());

        let events = sanity_events(22.0, 30.0, 3.0);
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(PlanEvent::is_warning));
    }

    #[test]
    fn test_vec_collects_events() {
        let mut sink: Vec<PlanEvent> = Vec::new();
        sink.on_event(&PlanEvent::AggressiveStepUp { step_up_pct: 40.0 });
        assert_eq!(sink, vec![PlanEvent::AggressiveStepUp { step_up_pct: 40.0 }]);
    }

    #[test]
    fn test_display() {
        let event = PlanEvent::HighExpenseRatio { expense_ratio_pct: 2.75 };
        assert_eq!(event.to_string(), "2.75% expense ratio is high");
    }
}
