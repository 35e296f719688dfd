//! Lump-sum compound growth (fixed deposits, NSC, inflation projection)

use serde::Serialize;

use crate::error::{ensure_finite_result, ensure_non_negative, ensure_rate_at_least_total_loss, EngineError, Result};
use crate::rates::{CompoundingFrequency, RateSpec};

/// Balance at one compounding boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    /// Compounding sub-period index, 0 is the initial deposit
    pub period: u32,
    /// Elapsed time in years
    pub years: f64,
    pub balance: f64,
}

/// Future value of a lump sum:
/// `principal * (1 + rate/100/f) ^ (f * years)`
///
/// `years` may be fractional (a 15-month deposit is 1.25 years). A zero rate
/// returns `principal` unchanged.
pub fn compound_growth(
    principal: f64,
    rate_percent: f64,
    years: f64,
    frequency: CompoundingFrequency,
) -> Result<f64> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("years", years)?;
    ensure_rate_at_least_total_loss("rate_percent", rate_percent)?;

    if rate_percent == 0.0 {
        return Ok(principal);
    }

    let f = frequency.periods_per_year() as f64;
    let base = 1.0 + rate_percent / 100.0 / f;
    ensure_finite_result("years", principal * base.powf(f * years))
}

/// Balance after every compounding sub-period over whole years, starting with
/// the deposit itself at period 0
pub fn compound_growth_series(principal: f64, rate: RateSpec, years: u32) -> Result<Vec<GrowthPoint>> {
    ensure_non_negative("principal", principal)?;
    ensure_rate_at_least_total_loss("annual_percent", rate.annual_percent)?;

    let per_year = rate.frequency.periods_per_year();
    let periods = per_year
        .checked_mul(years)
        .ok_or_else(|| EngineError::invalid("years", format!("term too long: {years} years")))?;
    let step = 1.0 + rate.periodic_rate();
    ensure_finite_result("years", principal * step.powf(periods as f64))?;

    let points = (0..=periods)
        .map(|period| GrowthPoint {
            period,
            years: period as f64 / per_year as f64,
            // Each point derives from the principal, not the previous point
            balance: principal * step.powf(period as f64),
        })
        .collect();

    Ok(points)
}
