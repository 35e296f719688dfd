//! Life insurance need by income replacement

use serde::{Deserialize, Serialize};

use crate::engine::present_value_of_annuity;
use crate::error::{ensure_non_negative, Result};
use crate::rates::MONTHS_PER_YEAR;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeCoverInputs {
    pub monthly_expenses: f64,
    pub inflation_percent: f64,
    pub return_percent: f64,
    pub years_of_support: u32,
    pub existing_debts: f64,
    /// Education fund per dependent child
    pub education_cost_per_child: f64,
    pub dependents: u32,
    pub existing_investments: f64,
    pub existing_insurance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeCoverNeed {
    /// First year's income requirement, one year of inflation applied
    pub annual_income_needed: f64,
    pub income_replacement: f64,
    pub education_fund: f64,
    pub total_needs: f64,
    pub existing_cover: f64,
    /// Never negative
    pub additional_cover_needed: f64,
}

/// Income replacement is the present value of the inflated annual need,
/// discounted at the real rate (return less inflation)
pub fn life_cover_need(inputs: &LifeCoverInputs) -> Result<LifeCoverNeed> {
    ensure_non_negative("monthly_expenses", inputs.monthly_expenses)?;
    ensure_non_negative("existing_debts", inputs.existing_debts)?;
    ensure_non_negative("education_cost_per_child", inputs.education_cost_per_child)?;
    ensure_non_negative("existing_investments", inputs.existing_investments)?;
    ensure_non_negative("existing_insurance", inputs.existing_insurance)?;

    let annual_income_needed =
        inputs.monthly_expenses * (1.0 + inputs.inflation_percent / 100.0) * MONTHS_PER_YEAR as f64;
    let income_replacement = present_value_of_annuity(
        annual_income_needed,
        inputs.return_percent - inputs.inflation_percent,
        inputs.years_of_support,
    )?;

    let education_fund = inputs.education_cost_per_child * inputs.dependents as f64;
    let total_needs = income_replacement + inputs.existing_debts + education_fund;
    let existing_cover = inputs.existing_investments + inputs.existing_insurance;

    Ok(LifeCoverNeed {
        annual_income_needed,
        income_replacement,
        education_fund,
        total_needs,
        existing_cover,
        additional_cover_needed: (total_needs - existing_cover).max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_real_rate_of_zero() {
        let need = life_cover_need(&LifeCoverInputs {
            monthly_expenses: 50_000.0,
            inflation_percent: 6.0,
            return_percent: 6.0,
            years_of_support: 20,
            existing_debts: 1_000_000.0,
            education_cost_per_child: 1_500_000.0,
            dependents: 2,
            existing_investments: 500_000.0,
            existing_insurance: 2_500_000.0,
        })
        .unwrap();

        assert_relative_eq!(need.annual_income_needed, 636_000.0, max_relative = 1e-12);
        assert_relative_eq!(need.income_replacement, 636_000.0 * 20.0, max_relative = 1e-12);
        assert_relative_eq!(need.total_needs, 12_720_000.0 + 1_000_000.0 + 3_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(need.additional_cover_needed, need.total_needs - 3_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fully_covered() {
        let need = life_cover_need(&LifeCoverInputs {
            monthly_expenses: 10_000.0,
            return_percent: 8.0,
            inflation_percent: 5.0,
            years_of_support: 5,
            existing_insurance: 50_000_000.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(need.additional_cover_needed, 0.0);
    }
}
