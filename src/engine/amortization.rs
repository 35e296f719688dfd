//! Equated monthly installment (EMI) loans
//!
//! Standard amortizing-loan formula with monthly rate `r = rate/12/100`:
//!
//! ```text
//! E = P * r * (1+r)^n / ((1+r)^n - 1)      r > 0
//! E = P / n                                r = 0
//! ```

use serde::Serialize;

use crate::error::{ensure_finite, ensure_finite_result, ensure_non_negative, ensure_positive, EngineError, Result};
use crate::rates::{is_zero_rate, monthly_rate};

use super::schedule::{Schedule, SchedulePeriod};

/// Payment, totals and full schedule for an amortizing loan
#[derive(Debug, Clone, Serialize)]
pub struct AnnuityResult {
    pub periodic_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub schedule: Schedule,
}

fn validate_loan(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<()> {
    ensure_positive("principal", principal)?;
    ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
    if term_months == 0 {
        return Err(EngineError::invalid("term_months", "must be > 0"));
    }
    Ok(())
}

/// Annuity factor `r(1+r)^n / ((1+r)^n - 1)`, or `1/n` at zero rate.
/// Fails when `(1+r)^n` overflows.
fn payment_factor(r: f64, n: u32) -> Result<f64> {
    if is_zero_rate(r) {
        return Ok(1.0 / n as f64);
    }
    let growth = ensure_finite_result("term_months", (1.0 + r).powf(n as f64))?;
    ensure_finite_result("term_months", r * growth / (growth - 1.0))
}

/// Monthly installment for a loan
pub fn emi(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    validate_loan(principal, annual_rate_percent, term_months)?;

    let r = monthly_rate(annual_rate_percent);
    if is_zero_rate(r) {
        return Ok(principal / term_months as f64);
    }
    ensure_finite_result("term_months", principal * payment_factor(r, term_months)?)
}

/// Amortize a loan month by month.
///
/// Interest each month is charged on the outstanding balance; the final month
/// repays whatever balance remains so the schedule closes at exactly zero.
pub fn compute_amortization(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<AnnuityResult> {
    let payment = emi(principal, annual_rate_percent, term_months)?;
    let r = monthly_rate(annual_rate_percent);

    let mut schedule = Schedule::with_capacity(term_months as usize);
    let mut balance = principal;
    let mut total_paid = 0.0;

    for period in 1..=term_months {
        let opening = balance;
        let interest = opening * r;

        let (principal_part, paid) = if period == term_months {
            (opening, opening + interest)
        } else {
            (payment - interest, payment)
        };

        balance = (opening - principal_part).max(0.0);
        total_paid += paid;

        schedule.push(SchedulePeriod {
            period,
            opening_balance: opening,
            contribution: paid,
            interest,
            principal: principal_part,
            closing_balance: balance,
        });
    }

    ensure_finite_result("term_months", total_paid)?;

    Ok(AnnuityResult {
        periodic_payment: payment,
        total_paid,
        total_interest: total_paid - principal,
        schedule,
    })
}

/// Largest principal that a monthly `payment` fully repays over `term_months`.
/// A non-positive payment supports no loan at all.
pub fn loan_for_payment(payment: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    ensure_finite("payment", payment)?;
    ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
    if term_months == 0 {
        return Err(EngineError::invalid("term_months", "must be > 0"));
    }
    if payment <= 0.0 {
        return Ok(0.0);
    }

    let r = monthly_rate(annual_rate_percent);
    ensure_finite_result("term_months", payment / payment_factor(r, term_months)?)
}
