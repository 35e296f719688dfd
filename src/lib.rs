//! fincalc - Financial formula engine for personal-finance calculators
//!
//! This library provides:
//! - Lump-sum compound growth (fixed deposits, NSC)
//! - EMI loan amortization with full schedules
//! - SIP future value, required-contribution solving and goal planning
//! - Year-by-year accrual ledgers (PPF, EPF, SSY)
//! - Present value of level payment streams
//! - Progressive slab tax, cess, regime comparison and exemptions
//! - Planning calculators (FIRE, life cover, home affordability, NPS)
//!
//! All functions are pure: they validate their inputs, return freshly built
//! results, and never format currency.

pub mod error;
pub mod rates;
pub mod engine;
pub mod tax;
pub mod planning;
pub mod scenario;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use rates::{CompoundingFrequency, RateSpec};
pub use engine::{
    compound_growth, compute_amortization, plan_goal, present_value_of_annuity, project_annual_accrual,
    project_sip, solve_required_sip, AccrualPlan, AccrualResult, AnnuityResult, GoalResult, Schedule,
    SchedulePeriod,
};
pub use tax::{apply_cess, compute_slab_tax, TaxSlab, TaxSlabTable};
