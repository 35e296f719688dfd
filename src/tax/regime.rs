//! Old vs new regime comparison for Indian individual income tax

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, Result};

use super::slabs::{apply_cess, compute_slab_tax, TaxSlabTable};

/// Standard deduction available under both regimes
pub const STANDARD_DEDUCTION: f64 = 50_000.0;

/// Section 80C ceiling
pub const SECTION_80C_LIMIT: f64 = 150_000.0;

/// Health and education cess
pub const DEFAULT_CESS_PERCENT: f64 = 4.0;

/// Deductions claimable only under the old regime
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    pub section_80c: f64,
    pub section_80d: f64,
    pub hra_exemption: f64,
    pub lta_exemption: f64,
}

impl Deductions {
    /// Sum of old-regime deductions, with 80C capped at its limit
    pub fn total(&self) -> Result<f64> {
        let section_80c = ensure_non_negative("section_80c", self.section_80c)?;
        let section_80d = ensure_non_negative("section_80d", self.section_80d)?;
        let hra = ensure_non_negative("hra_exemption", self.hra_exemption)?;
        let lta = ensure_non_negative("lta_exemption", self.lta_exemption)?;
        Ok(section_80c.min(SECTION_80C_LIMIT) + section_80d + hra + lta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    Old,
    New,
    /// Both regimes produce the same tax
    Either,
}

/// Taxable income and tax (cess included) under one regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeTax {
    pub taxable_income: f64,
    pub slab_tax: f64,
    pub total_tax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeComparison {
    pub old: RegimeTax,
    pub new: RegimeTax,
    pub better: Regime,
    /// Tax saved by choosing the better regime
    pub savings: f64,
}

fn regime_tax(taxable_income: f64, table: &TaxSlabTable, cess_percent: f64) -> Result<RegimeTax> {
    let taxable_income = taxable_income.max(0.0);
    let slab_tax = compute_slab_tax(taxable_income, table)?;
    Ok(RegimeTax {
        taxable_income,
        slab_tax,
        total_tax: apply_cess(slab_tax, cess_percent)?,
    })
}

/// Compare the two regimes using the built-in slab tables and 4% cess
pub fn compare_regimes(gross_income: f64, deductions: &Deductions) -> Result<RegimeComparison> {
    compare_regimes_with(
        gross_income,
        deductions,
        &TaxSlabTable::old_regime(),
        &TaxSlabTable::new_regime_2024(),
        DEFAULT_CESS_PERCENT,
    )
}

/// Compare regimes with caller-supplied tables. The old regime subtracts the
/// standard deduction plus `deductions`; the new regime only the standard
/// deduction.
pub fn compare_regimes_with(
    gross_income: f64,
    deductions: &Deductions,
    old_table: &TaxSlabTable,
    new_table: &TaxSlabTable,
    cess_percent: f64,
) -> Result<RegimeComparison> {
    ensure_non_negative("gross_income", gross_income)?;
    let claimed = deductions.total()?;

    let old = regime_tax(gross_income - STANDARD_DEDUCTION - claimed, old_table, cess_percent)?;
    let new = regime_tax(gross_income - STANDARD_DEDUCTION, new_table, cess_percent)?;

    let difference = old.total_tax - new.total_tax;
    let better = if difference.abs() < 0.005 {
        Regime::Either
    } else if difference > 0.0 {
        Regime::New
    } else {
        Regime::Old
    };

    Ok(RegimeComparison {
        old,
        new,
        better,
        savings: difference.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_deductions_favours_new_regime() {
        let comparison = compare_regimes(1_050_000.0, &Deductions::default()).unwrap();

        assert_relative_eq!(comparison.new.taxable_income, 1_000_000.0);
        assert_relative_eq!(comparison.new.total_tax, 62_400.0, max_relative = 1e-12);
        // Old: 12,500 + 100,000 on 10 lakh taxable
        assert_relative_eq!(comparison.old.slab_tax, 112_500.0);
        assert_eq!(comparison.better, Regime::New);
        assert_relative_eq!(comparison.savings, 117_000.0 - 62_400.0, max_relative = 1e-12);
    }

    #[test]
    fn test_heavy_deductions_can_favour_old_regime() {
        let deductions = Deductions {
            section_80c: 150_000.0,
            section_80d: 50_000.0,
            hra_exemption: 300_000.0,
            lta_exemption: 50_000.0,
        };
        let comparison = compare_regimes(1_200_000.0, &deductions).unwrap();
        assert_relative_eq!(comparison.old.taxable_income, 600_000.0);
        assert_eq!(comparison.better, Regime::Old);
    }

    #[test]
    fn test_80c_is_capped() {
        let capped = Deductions {
            section_80c: 400_000.0,
            ..Default::default()
        };
        assert_relative_eq!(capped.total().unwrap(), SECTION_80C_LIMIT);
    }

    #[test]
    fn test_low_income_pays_nothing_either_way() {
        let comparison = compare_regimes(200_000.0, &Deductions::default()).unwrap();
        assert_eq!(comparison.old.total_tax, 0.0);
        assert_eq!(comparison.new.total_tax, 0.0);
        assert_eq!(comparison.better, Regime::Either);
        assert_eq!(comparison.savings, 0.0);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert!(compare_regimes(-1.0, &Deductions::default()).is_err());
        let bad = Deductions {
            section_80d: -10.0,
            ..Default::default()
        };
        assert!(compare_regimes(1_000_000.0, &bad).is_err());
    }
}
