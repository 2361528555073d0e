//! Investment plan parameters and plan loading

mod data;
pub mod loader;

pub use data::{SipPlan, MAX_INVESTMENT_YEARS};
pub(crate) use data::months_in;
pub use loader::{load_plan_json, load_plans, load_plans_from_reader};
