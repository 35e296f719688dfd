//! Year-by-year accrual ledgers for PPF, EPF and SSY style accounts
//!
//! Interest is credited once a year on the opening balance plus that year's
//! contribution. This deliberately differs from the monthly-compounding SIP
//! formula.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite_result, ensure_non_negative, ensure_rate_above_total_loss, Result};

use super::schedule::{Schedule, SchedulePeriod};

/// Inputs for an annual-accrual account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualPlan {
    pub opening_balance: f64,
    pub yearly_contribution: f64,
    /// Annual rate in percent, credited once a year
    pub annual_rate_percent: f64,
    pub years: u32,
    /// Contributions stop after this many years (SSY); None means every year
    pub contribution_years: Option<u32>,
}

impl AccrualPlan {
    pub fn new(yearly_contribution: f64, annual_rate_percent: f64, years: u32) -> Self {
        Self {
            opening_balance: 0.0,
            yearly_contribution,
            annual_rate_percent,
            years,
            contribution_years: None,
        }
    }

    pub fn with_opening_balance(mut self, opening_balance: f64) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    pub fn contributing_for(mut self, years: u32) -> Self {
        self.contribution_years = Some(years);
        self
    }

    fn contribution_for_year(&self, year: u32) -> f64 {
        match self.contribution_years {
            Some(limit) if year > limit => 0.0,
            _ => self.yearly_contribution,
        }
    }
}

/// Maturity value and yearly ledger of an accrual account
#[derive(Debug, Clone, Serialize)]
pub struct AccrualResult {
    pub maturity_value: f64,
    /// Opening balance plus every contribution
    pub total_contributed: f64,
    pub total_interest: f64,
    pub schedule: Schedule,
}

/// Run the yearly ledger:
/// `interest = (opening + contribution) * rate`,
/// `closing = opening + contribution + interest`
pub fn project_annual_accrual(plan: &AccrualPlan) -> Result<AccrualResult> {
    ensure_non_negative("opening_balance", plan.opening_balance)?;
    ensure_non_negative("yearly_contribution", plan.yearly_contribution)?;
    ensure_rate_above_total_loss("annual_rate_percent", plan.annual_rate_percent)?;

    let rate = plan.annual_rate_percent / 100.0;
    let mut schedule = Schedule::with_capacity(plan.years as usize);
    let mut balance = plan.opening_balance;

    for year in 1..=plan.years {
        let opening = balance;
        let contribution = plan.contribution_for_year(year);
        let interest = (opening + contribution) * rate;
        balance = opening + contribution + interest;

        schedule.push(SchedulePeriod {
            period: year,
            opening_balance: opening,
            contribution,
            interest,
            principal: 0.0,
            closing_balance: balance,
        });
    }

    ensure_finite_result("years", balance)?;

    Ok(AccrualResult {
        maturity_value: balance,
        total_contributed: plan.opening_balance + schedule.total_contributions(),
        total_interest: schedule.total_interest(),
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sip::project_sip;
    use approx::assert_relative_eq;

    #[test]
    fn test_ppf_fifteen_years() {
        let result = project_annual_accrual(&AccrualPlan::new(150_000.0, 7.1, 15)).unwrap();
        assert_eq!(result.schedule.len(), 15);
        assert_relative_eq!(result.maturity_value, 4_068_209.22, epsilon = 0.01);
        assert_relative_eq!(result.total_contributed, 2_250_000.0);
        assert_relative_eq!(
            result.total_interest,
            result.maturity_value - result.total_contributed,
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_epf_with_existing_balance() {
        let plan = AccrualPlan::new(43_200.0, 8.15, 2).with_opening_balance(100_000.0);
        let result = project_annual_accrual(&plan).unwrap();

        let year1 = (100_000.0 + 43_200.0) * 1.0815;
        let year2 = (year1 + 43_200.0) * 1.0815;
        assert_relative_eq!(result.maturity_value, year2, max_relative = 1e-12);
        assert_relative_eq!(result.schedule.periods()[1].opening_balance, year1, max_relative = 1e-12);
    }

    #[test]
    fn test_contribution_cutoff() {
        let plan = AccrualPlan::new(100_000.0, 8.2, 21).contributing_for(15);
        let result = project_annual_accrual(&plan).unwrap();
        let rows = result.schedule.periods();

        assert_eq!(rows[14].contribution, 100_000.0);
        assert_eq!(rows[15].contribution, 0.0);
        assert_relative_eq!(result.total_contributed, 1_500_000.0);
        // Balance keeps compounding after contributions stop
        assert!(rows[20].closing_balance > rows[14].closing_balance);
    }

    #[test]
    fn test_differs_from_monthly_sip() {
        let annual = project_annual_accrual(&AccrualPlan::new(120_000.0, 8.0, 10)).unwrap();
        let monthly = project_sip(10_000.0, 8.0, 120).unwrap();
        assert!((annual.maturity_value - monthly).abs() > 1_000.0);
    }

    #[test]
    fn test_zero_years_and_invalid() {
        let result = project_annual_accrual(&AccrualPlan::new(1_000.0, 7.0, 0).with_opening_balance(500.0)).unwrap();
        assert!(result.schedule.is_empty());
        assert_eq!(result.maturity_value, 500.0);

        assert!(project_annual_accrual(&AccrualPlan::new(-1.0, 7.0, 5)).is_err());
        assert!(project_annual_accrual(&AccrualPlan::new(1.0, -150.0, 5)).is_err());
        assert!(project_annual_accrual(&AccrualPlan::new(1.0, 900.0, 400)).is_err());
    }
}
