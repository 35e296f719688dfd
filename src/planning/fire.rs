//! Financial independence / early retirement corpus planning

use serde::{Deserialize, Serialize};

use crate::engine::{compound_growth, solve_required_sip};
use crate::error::{ensure_non_negative, ensure_positive, EngineError, Result};
use crate::rates::{months_for_years, CompoundingFrequency, MONTHS_PER_YEAR};

/// Safe withdrawal rate behind the "25x annual expenses" rule
pub const DEFAULT_WITHDRAWAL_RATE_PERCENT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Today's monthly expenses
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub expected_return_percent: f64,
    pub inflation_percent: f64,
    pub withdrawal_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FirePlan {
    pub years_to_retirement: u32,
    /// Monthly expenses at retirement after inflation
    pub future_monthly_expenses: f64,
    pub required_corpus: f64,
    /// Current savings grown to retirement
    pub projected_savings: f64,
    /// Monthly SIP still needed; 0 when savings alone reach the corpus
    pub required_monthly_sip: f64,
}

pub fn fire_plan(inputs: &FireInputs) -> Result<FirePlan> {
    if inputs.retirement_age <= inputs.current_age {
        return Err(EngineError::invalid(
            "retirement_age",
            format!(
                "must be after current age {}, got {}",
                inputs.current_age, inputs.retirement_age
            ),
        ));
    }
    ensure_positive("withdrawal_rate_percent", inputs.withdrawal_rate_percent)?;
    ensure_non_negative("monthly_expenses", inputs.monthly_expenses)?;

    let years = inputs.retirement_age - inputs.current_age;
    let months = months_for_years("retirement_age", years)?;
    let future_monthly_expenses = compound_growth(
        inputs.monthly_expenses,
        inputs.inflation_percent,
        years as f64,
        CompoundingFrequency::Annual,
    )?;
    let required_corpus =
        future_monthly_expenses * MONTHS_PER_YEAR as f64 / (inputs.withdrawal_rate_percent / 100.0);

    let projected_savings = compound_growth(
        inputs.current_savings,
        inputs.expected_return_percent,
        years as f64,
        CompoundingFrequency::Annual,
    )?;

    let shortfall = required_corpus - projected_savings;
    let required_monthly_sip = if shortfall > 0.0 {
        solve_required_sip(shortfall, inputs.expected_return_percent, months)?
    } else {
        0.0
    };

    Ok(FirePlan {
        years_to_retirement: years,
        future_monthly_expenses,
        required_corpus,
        projected_savings,
        required_monthly_sip,
    })
}
