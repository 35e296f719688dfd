//! National Pension System (NPS) corpus and annuity income

use serde::{Deserialize, Serialize};

use crate::engine::{project_sip_with_timing, AnnuityTiming};
use crate::error::{ensure_non_negative, EngineError, Result};
use crate::rates::{months_for_years, MONTHS_PER_YEAR};

/// Share of the corpus used to buy an annuity at retirement
pub const DEFAULT_ANNUITY_SHARE_PERCENT: f64 = 60.0;

/// Annual annuity rate assumed for pension income
pub const DEFAULT_ANNUITY_RATE_PERCENT: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionInputs {
    pub monthly_contribution: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub expected_return_percent: f64,
    pub annuity_share_percent: f64,
    pub annuity_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PensionProjection {
    pub total_contributed: f64,
    pub corpus: f64,
    pub lump_sum: f64,
    pub annuity_corpus: f64,
    pub monthly_pension: f64,
}

/// Contributions accumulate at month end until retirement; the annuity share
/// then pays `annuity_rate` a year in monthly instalments
pub fn nps_pension(inputs: &PensionInputs) -> Result<PensionProjection> {
    if inputs.retirement_age <= inputs.current_age {
        return Err(EngineError::invalid(
            "retirement_age",
            format!(
                "must be after current age {}, got {}",
                inputs.current_age, inputs.retirement_age
            ),
        ));
    }
    let share = ensure_non_negative("annuity_share_percent", inputs.annuity_share_percent)?;
    if share > 100.0 {
        return Err(EngineError::invalid("annuity_share_percent", "must not exceed 100%"));
    }
    ensure_non_negative("annuity_rate_percent", inputs.annuity_rate_percent)?;

    let months = months_for_years("retirement_age", inputs.retirement_age - inputs.current_age)?;
    let corpus = project_sip_with_timing(
        inputs.monthly_contribution,
        inputs.expected_return_percent,
        months,
        AnnuityTiming::Ordinary,
    )?;

    let annuity_corpus = corpus * share / 100.0;
    Ok(PensionProjection {
        total_contributed: inputs.monthly_contribution * months as f64,
        corpus,
        lump_sum: corpus - annuity_corpus,
        annuity_corpus,
        monthly_pension: annuity_corpus * inputs.annuity_rate_percent / 100.0 / MONTHS_PER_YEAR as f64,
    })
}
