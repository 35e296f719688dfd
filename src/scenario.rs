//! Batch sweeps over rate and horizon grids
//!
//! Every engine call is independent, so grids are evaluated in parallel and
//! returned in input order (chart series, sensitivity tables).

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::{compute_amortization, project_sip};
use crate::error::{ensure_finite, EngineError, Result};
use crate::rates::months_for_years;

/// Upper bound on points produced by [`rate_grid`]
pub const MAX_GRID_POINTS: usize = 10_000;

/// Loan cost at one interest rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanScenario {
    pub annual_rate_percent: f64,
    pub emi: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// SIP outcome at one horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SipScenario {
    pub years: u32,
    pub invested: f64,
    pub future_value: f64,
    pub gains: f64,
}

/// EMI and total cost for each rate in `rates`.
/// Fails on the first invalid rate.
pub fn emi_rate_sweep(principal: f64, rates: &[f64], term_months: u32) -> Result<Vec<LoanScenario>> {
    debug!("emi sweep over {} rates, {} months", rates.len(), term_months);

    rates
        .par_iter()
        .map(|&rate| -> Result<LoanScenario> {
            let loan = compute_amortization(principal, rate, term_months)?;
            Ok(LoanScenario {
                annual_rate_percent: rate,
                emi: loan.periodic_payment,
                total_paid: loan.total_paid,
                total_interest: loan.total_interest,
            })
        })
        .collect()
}

/// SIP future value at each horizon (in years) in `horizons`
pub fn sip_horizon_sweep(
    monthly_contribution: f64,
    annual_rate_percent: f64,
    horizons: &[u32],
) -> Result<Vec<SipScenario>> {
    debug!("sip sweep over {} horizons at {}%", horizons.len(), annual_rate_percent);

    horizons
        .par_iter()
        .map(|&years| -> Result<SipScenario> {
            let months = months_for_years("years", years)?;
            let future_value = project_sip(monthly_contribution, annual_rate_percent, months)?;
            let invested = monthly_contribution * months as f64;
            Ok(SipScenario {
                years,
                invested,
                future_value,
                gains: future_value - invested,
            })
        })
        .collect()
}

/// Evenly spaced grid from `start` to `end` inclusive.
/// A non-positive step or an empty range yields just `start`; grids longer
/// than [`MAX_GRID_POINTS`] are rejected.
pub fn rate_grid(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    ensure_finite("step", step)?;
    if step <= 0.0 || end < start {
        return Ok(vec![start]);
    }

    let intervals = ((end - start) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
        return Err(EngineError::invalid(
            "step",
            format!("grid exceeds {MAX_GRID_POINTS} points"),
        ));
    }
    let count = intervals as usize;
    Ok((0..=count).map(|i| start + step * i as f64).collect())
}
