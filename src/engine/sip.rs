//! Systematic investment plans (SIP): future value, required contribution,
//! and goal planning on top of existing savings
//!
//! Contributions are monthly and compound monthly at `r = rate/12/100`. The
//! default timing is annuity-due (each contribution earns interest for the
//! month it is made in).

use serde::{Deserialize, Serialize};

use crate::error::{
    ensure_finite_result, ensure_non_negative, ensure_positive, ensure_rate_above_total_loss, EngineError, Result,
};
use crate::rates::{is_zero_rate, monthly_rate};

use super::schedule::{Schedule, SchedulePeriod};

/// When in each period a contribution is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnnuityTiming {
    /// Start of period (SIP, goal SIP)
    #[default]
    Due,
    /// End of period (recurring deposit, NPS accumulation)
    Ordinary,
}

/// Required contribution and resulting ledger for a savings goal
#[derive(Debug, Clone, Serialize)]
pub struct GoalResult {
    /// Monthly contribution needed; 0 when existing savings already meet the goal
    pub required_periodic_contribution: f64,
    pub projected_value: f64,
    pub schedule: Schedule,
}

impl GoalResult {
    pub fn goal_already_met(&self) -> bool {
        self.required_periodic_contribution == 0.0
    }
}

/// Future value of one unit contributed every period for `n` periods.
/// Fails when `(1+r)^n` overflows.
fn accumulation_factor(r: f64, n: u32, timing: AnnuityTiming) -> Result<f64> {
    if is_zero_rate(r) {
        return Ok(n as f64);
    }
    let growth = ensure_finite_result("term_months", (1.0 + r).powf(n as f64))?;
    let ordinary = (growth - 1.0) / r;
    let factor = match timing {
        AnnuityTiming::Due => ordinary * (1.0 + r),
        AnnuityTiming::Ordinary => ordinary,
    };
    ensure_finite_result("term_months", factor)
}

/// Future value of a monthly SIP with start-of-month contributions:
/// `C * ((1+r)^n - 1)/r * (1+r)`, or `C * n` at zero rate
pub fn project_sip(monthly_contribution: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    project_sip_with_timing(monthly_contribution, annual_rate_percent, term_months, AnnuityTiming::Due)
}

/// Future value of a monthly contribution series with explicit timing
pub fn project_sip_with_timing(
    monthly_contribution: f64,
    annual_rate_percent: f64,
    term_months: u32,
    timing: AnnuityTiming,
) -> Result<f64> {
    ensure_non_negative("monthly_contribution", monthly_contribution)?;
    ensure_rate_above_total_loss("annual_rate_percent", annual_rate_percent)?;

    let r = monthly_rate(annual_rate_percent);
    ensure_finite_result(
        "term_months",
        monthly_contribution * accumulation_factor(r, term_months, timing)?,
    )
}

/// Monthly contribution that grows to `target_amount` in `term_months`
/// (inverse of [`project_sip`]). Never negative.
pub fn solve_required_sip(target_amount: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    ensure_positive("target_amount", target_amount)?;
    ensure_rate_above_total_loss("annual_rate_percent", annual_rate_percent)?;
    if term_months == 0 {
        return Err(EngineError::invalid("term_months", "must be > 0"));
    }

    let r = monthly_rate(annual_rate_percent);
    let contribution = target_amount / accumulation_factor(r, term_months, AnnuityTiming::Due)?;
    Ok(contribution.max(0.0))
}

/// Month-by-month ledger starting from `opening_balance`
fn contribution_ledger(
    opening_balance: f64,
    contribution: f64,
    r: f64,
    term_months: u32,
    timing: AnnuityTiming,
) -> Schedule {
    let mut schedule = Schedule::with_capacity(term_months as usize);
    let mut balance = opening_balance;

    for period in 1..=term_months {
        let opening = balance;
        let interest = match timing {
            AnnuityTiming::Due => (opening + contribution) * r,
            AnnuityTiming::Ordinary => opening * r,
        };
        balance = opening + contribution + interest;

        schedule.push(SchedulePeriod {
            period,
            opening_balance: opening,
            contribution,
            interest,
            principal: 0.0,
            closing_balance: balance,
        });
    }

    schedule
}

/// Monthly ledger of a SIP; its final closing balance matches [`project_sip`]
pub fn sip_schedule(monthly_contribution: f64, annual_rate_percent: f64, term_months: u32) -> Result<Schedule> {
    ensure_non_negative("monthly_contribution", monthly_contribution)?;
    ensure_rate_above_total_loss("annual_rate_percent", annual_rate_percent)?;

    let r = monthly_rate(annual_rate_percent);
    let schedule = contribution_ledger(0.0, monthly_contribution, r, term_months, AnnuityTiming::Due);
    ensure_finite_result("term_months", schedule.final_closing_balance())?;
    Ok(schedule)
}

/// Plan a monthly SIP that, together with `existing_savings` compounding at the
/// same rate, reaches `target_amount` after `term_months`
pub fn plan_goal(
    target_amount: f64,
    existing_savings: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<GoalResult> {
    ensure_positive("target_amount", target_amount)?;
    ensure_non_negative("existing_savings", existing_savings)?;
    ensure_rate_above_total_loss("annual_rate_percent", annual_rate_percent)?;
    if term_months == 0 {
        return Err(EngineError::invalid("term_months", "must be > 0"));
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = ensure_finite_result("term_months", (1.0 + r).powf(term_months as f64))?;
    let grown_savings = existing_savings * growth;
    let shortfall = target_amount - grown_savings;

    let contribution = if shortfall > 0.0 {
        solve_required_sip(shortfall, annual_rate_percent, term_months)?
    } else {
        0.0
    };

    let schedule = contribution_ledger(existing_savings, contribution, r, term_months, AnnuityTiming::Due);
    let projected_value = ensure_finite_result("term_months", schedule.final_closing_balance())?;

    Ok(GoalResult {
        required_periodic_contribution: contribution,
        projected_value,
        schedule,
    })
}
