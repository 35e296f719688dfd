//! Formula engine: compound growth, loan amortization, SIP accumulation,
//! annual accrual ledgers and annuity present values

mod schedule;
mod growth;
mod amortization;
mod sip;
mod accrual;
mod present_value;

pub use schedule::{Schedule, SchedulePeriod};
pub use growth::{compound_growth, compound_growth_series, GrowthPoint};
pub use amortization::{compute_amortization, emi, loan_for_payment, AnnuityResult};
pub use sip::{
    plan_goal, project_sip, project_sip_with_timing, sip_schedule, solve_required_sip,
    AnnuityTiming, GoalResult,
};
pub use accrual::{project_annual_accrual, AccrualPlan, AccrualResult};
pub use present_value::present_value_of_annuity;
