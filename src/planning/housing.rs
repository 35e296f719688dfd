//! Home affordability and rent-versus-buy projections

use serde::{Deserialize, Serialize};

use crate::engine::{compute_amortization, loan_for_payment};
use crate::error::{ensure_non_negative, ensure_positive, ensure_rate_above_total_loss, EngineError, Result};
use crate::rates::{months_for_years, MONTHS_PER_YEAR};

/// Share of gross monthly income lenders allow for all debt service
pub const MAX_DEBT_TO_INCOME: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    pub annual_income: f64,
    pub monthly_debts: f64,
    pub monthly_expenses: f64,
    pub interest_rate_percent: f64,
    pub loan_term_years: u32,
    pub down_payment: f64,
    /// Annual property tax as a percent of home price
    pub property_tax_percent: f64,
    /// Annual insurance as a percent of home price
    pub insurance_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affordability {
    pub monthly_income: f64,
    /// Largest EMI within the debt-to-income cap; 0 when none is affordable
    pub max_emi: f64,
    pub max_loan: f64,
    pub max_home_price: f64,
    /// EMI plus monthly property tax and insurance
    pub total_monthly_housing: f64,
    pub debt_to_income: f64,
}

pub fn home_affordability(inputs: &AffordabilityInputs) -> Result<Affordability> {
    ensure_positive("annual_income", inputs.annual_income)?;
    ensure_non_negative("monthly_debts", inputs.monthly_debts)?;
    ensure_non_negative("monthly_expenses", inputs.monthly_expenses)?;
    ensure_non_negative("down_payment", inputs.down_payment)?;
    ensure_non_negative("property_tax_percent", inputs.property_tax_percent)?;
    ensure_non_negative("insurance_percent", inputs.insurance_percent)?;
    if inputs.loan_term_years == 0 {
        return Err(EngineError::invalid("loan_term_years", "must be > 0"));
    }

    let monthly_income = inputs.annual_income / MONTHS_PER_YEAR as f64;
    let committed = inputs.monthly_debts + inputs.monthly_expenses;
    let max_emi = (monthly_income * MAX_DEBT_TO_INCOME - committed).max(0.0);

    let term_months = months_for_years("loan_term_years", inputs.loan_term_years)?;
    let max_loan = loan_for_payment(max_emi, inputs.interest_rate_percent, term_months)?;
    let max_home_price = max_loan + inputs.down_payment;

    let monthly_carrying =
        max_home_price * (inputs.property_tax_percent + inputs.insurance_percent) / 100.0 / MONTHS_PER_YEAR as f64;
    let total_monthly_housing = max_emi + monthly_carrying;

    Ok(Affordability {
        monthly_income,
        max_emi,
        max_loan,
        max_home_price,
        total_monthly_housing,
        debt_to_income: (total_monthly_housing + committed) / monthly_income,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyInputs {
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub interest_rate_percent: f64,
    pub loan_term_years: u32,
    /// Annual property tax, maintenance and insurance, each a percent of price
    pub property_tax_percent: f64,
    pub maintenance_percent: f64,
    pub insurance_percent: f64,
    pub monthly_rent: f64,
    pub rent_increase_percent: f64,
    /// Return the renter earns by investing the down payment
    pub investment_return_percent: f64,
    pub appreciation_percent: f64,
    pub horizon_years: u32,
}

/// Position of each choice at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentVsBuyYear {
    pub year: u32,
    pub cumulative_rent: f64,
    pub renter_investments: f64,
    pub cumulative_owning_cost: f64,
    pub home_value: f64,
    pub loan_balance: f64,
    /// Home value less loan balance
    pub owner_equity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RentVsBuy {
    pub monthly_emi: f64,
    /// EMI plus tax, maintenance and insurance
    pub monthly_owning_cost: f64,
    pub years: Vec<RentVsBuyYear>,
}

pub fn rent_vs_buy(inputs: &RentVsBuyInputs) -> Result<RentVsBuy> {
    ensure_positive("home_price", inputs.home_price)?;
    ensure_non_negative("monthly_rent", inputs.monthly_rent)?;
    ensure_rate_above_total_loss("rent_increase_percent", inputs.rent_increase_percent)?;
    ensure_rate_above_total_loss("investment_return_percent", inputs.investment_return_percent)?;
    ensure_rate_above_total_loss("appreciation_percent", inputs.appreciation_percent)?;
    let down_share = ensure_non_negative("down_payment_percent", inputs.down_payment_percent)?;
    if down_share >= 100.0 {
        return Err(EngineError::invalid("down_payment_percent", "must be below 100%"));
    }

    let term_months = months_for_years("loan_term_years", inputs.loan_term_years)?;
    // Bounds every `year * MONTHS_PER_YEAR` in the ledger loop
    months_for_years("horizon_years", inputs.horizon_years)?;

    let down_payment = inputs.home_price * down_share / 100.0;
    let loan = compute_amortization(inputs.home_price - down_payment, inputs.interest_rate_percent, term_months)?;

    let carrying = inputs.home_price
        * (inputs.property_tax_percent + inputs.maintenance_percent + inputs.insurance_percent)
        / 100.0
        / MONTHS_PER_YEAR as f64;
    let monthly_owning_cost = loan.periodic_payment + carrying;

    let mut years = Vec::with_capacity(inputs.horizon_years as usize);
    let mut rent = inputs.monthly_rent;
    let mut cumulative_rent = 0.0;
    let mut renter_investments = down_payment;
    let mut cumulative_owning_cost = down_payment;
    let mut home_value = inputs.home_price;

    for year in 1..=inputs.horizon_years {
        cumulative_rent += rent * MONTHS_PER_YEAR as f64;
        rent *= 1.0 + inputs.rent_increase_percent / 100.0;
        renter_investments *= 1.0 + inputs.investment_return_percent / 100.0;

        let months_elapsed = (year * MONTHS_PER_YEAR) as usize;
        let rows = loan.schedule.periods();
        let start = (months_elapsed - MONTHS_PER_YEAR as usize).min(rows.len());
        let end = months_elapsed.min(rows.len());
        let emi_paid: f64 = rows[start..end].iter().map(|p| p.contribution).sum();
        cumulative_owning_cost += emi_paid + carrying * MONTHS_PER_YEAR as f64;
        home_value *= 1.0 + inputs.appreciation_percent / 100.0;

        let loan_balance = rows
            .get(months_elapsed - 1)
            .map(|p| p.closing_balance)
            .unwrap_or(0.0);

        years.push(RentVsBuyYear {
            year,
            cumulative_rent,
            renter_investments,
            cumulative_owning_cost,
            home_value,
            loan_balance,
            owner_equity: home_value - loan_balance,
        });
    }

    Ok(RentVsBuy {
        monthly_emi: loan.periodic_payment,
        monthly_owning_cost,
        years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::emi;
    use approx::assert_relative_eq;

    fn affordability_inputs() -> AffordabilityInputs {
        AffordabilityInputs {
            annual_income: 2_400_000.0,
            monthly_debts: 10_000.0,
            monthly_expenses: 30_000.0,
            interest_rate_percent: 8.5,
            loan_term_years: 20,
            down_payment: 1_000_000.0,
            property_tax_percent: 0.0,
            insurance_percent: 0.0,
        }
    }

    #[test]
    fn test_max_loan_services_max_emi() {
        let result = home_affordability(&affordability_inputs()).unwrap();
        assert_relative_eq!(result.monthly_income, 200_000.0);
        assert_relative_eq!(result.max_emi, 40_000.0);
        assert_relative_eq!(emi(result.max_loan, 8.5, 240).unwrap(), 40_000.0, max_relative = 1e-10);
        assert_relative_eq!(result.max_home_price, result.max_loan + 1_000_000.0);
        assert_relative_eq!(result.debt_to_income, 0.40, max_relative = 1e-12);
    }

    #[test]
    fn test_affordability_term_too_long() {
        let result = home_affordability(&AffordabilityInputs {
            loan_term_years: 400_000_000,
            ..affordability_inputs()
        });
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { field: "loan_term_years", .. })
        ));
    }

    #[test]
    fn test_overcommitted_income_affords_nothing() {
        let result = home_affordability(&AffordabilityInputs {
            monthly_expenses: 200_000.0,
            ..affordability_inputs()
        })
        .unwrap();
        assert_eq!(result.max_emi, 0.0);
        assert_eq!(result.max_loan, 0.0);
        assert_eq!(result.max_home_price, 1_000_000.0);
    }

    fn rent_vs_buy_inputs() -> RentVsBuyInputs {
        RentVsBuyInputs {
            home_price: 10_000_000.0,
            down_payment_percent: 20.0,
            interest_rate_percent: 8.5,
            loan_term_years: 20,
            property_tax_percent: 0.1,
            maintenance_percent: 0.5,
            insurance_percent: 0.1,
            monthly_rent: 30_000.0,
            rent_increase_percent: 5.0,
            investment_return_percent: 10.0,
            appreciation_percent: 5.0,
            horizon_years: 25,
        }
    }

    #[test]
    fn test_rent_vs_buy_ledger() {
        let result = rent_vs_buy(&rent_vs_buy_inputs()).unwrap();
        assert_eq!(result.years.len(), 25);

        let first = result.years[0];
        assert_relative_eq!(first.cumulative_rent, 360_000.0);
        assert_relative_eq!(first.renter_investments, 2_200_000.0, max_relative = 1e-12);
        assert!(first.loan_balance < 8_000_000.0);

        // Loan is repaid after 20 years; no more EMI is added afterwards
        let year_20 = result.years[19];
        let year_21 = result.years[20];
        assert!(year_20.loan_balance.abs() < 1e-2);
        assert_eq!(year_21.loan_balance, 0.0);
        let carrying_per_year = 10_000_000.0 * 0.007;
        assert_relative_eq!(
            year_21.cumulative_owning_cost - year_20.cumulative_owning_cost,
            carrying_per_year,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_rent_vs_buy_terms_too_long() {
        assert!(rent_vs_buy(&RentVsBuyInputs {
            loan_term_years: 400_000_000,
            ..rent_vs_buy_inputs()
        })
        .is_err());
        assert!(matches!(
            rent_vs_buy(&RentVsBuyInputs {
                horizon_years: 400_000_000,
                ..rent_vs_buy_inputs()
            }),
            Err(EngineError::InvalidInput { field: "horizon_years", .. })
        ));
    }

    #[test]
    fn test_rent_vs_buy_rejects_full_down_payment() {
        assert!(rent_vs_buy(&RentVsBuyInputs {
            down_payment_percent: 100.0,
            ..rent_vs_buy_inputs()
        })
        .is_err());
    }
}
