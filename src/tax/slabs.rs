//! Progressive slab (bracket) tax tables

use serde::Serialize;

use crate::error::{ensure_finite, ensure_non_negative, EngineError, Result};

/// One bracket: income up to `upper_bound` is taxed at `rate_percent`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxSlab {
    /// Inclusive upper edge of the bracket; `f64::INFINITY` for the top slab
    pub upper_bound: f64,
    pub rate_percent: f64,
}

impl TaxSlab {
    pub fn new(upper_bound: f64, rate_percent: f64) -> Self {
        Self {
            upper_bound,
            rate_percent,
        }
    }

    pub fn unbounded(rate_percent: f64) -> Self {
        Self::new(f64::INFINITY, rate_percent)
    }
}

/// Validated, exhaustive slab table covering zero to infinity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxSlabTable {
    slabs: Vec<TaxSlab>,
}

impl TaxSlabTable {
    /// Build a table, rejecting empty tables, negative or non-finite rates,
    /// non-increasing bounds, and a top slab that is not unbounded
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self> {
        let Some(last) = slabs.last() else {
            return Err(EngineError::InvalidSlabTable("table has no slabs".into()));
        };
        if last.upper_bound != f64::INFINITY {
            return Err(EngineError::InvalidSlabTable(format!(
                "last slab must be unbounded, got upper bound {}",
                last.upper_bound
            )));
        }

        let mut previous = 0.0;
        for (idx, slab) in slabs.iter().enumerate() {
            if !slab.rate_percent.is_finite() || slab.rate_percent < 0.0 {
                return Err(EngineError::InvalidSlabTable(format!(
                    "slab {} has invalid rate {}",
                    idx + 1,
                    slab.rate_percent
                )));
            }
            if slab.upper_bound.is_nan() || slab.upper_bound <= previous {
                return Err(EngineError::InvalidSlabTable(format!(
                    "slab {} upper bound {} does not exceed {}",
                    idx + 1,
                    slab.upper_bound,
                    previous
                )));
            }
            if slab.upper_bound == f64::INFINITY && idx + 1 != slabs.len() {
                return Err(EngineError::InvalidSlabTable(format!(
                    "slab {} is unbounded but is not the last slab",
                    idx + 1
                )));
            }
            previous = slab.upper_bound;
        }

        Ok(Self { slabs })
    }

    /// Indian new tax regime slabs (FY 2023-24 onwards)
    pub fn new_regime_2024() -> Self {
        Self {
            slabs: vec![
                TaxSlab::new(300_000.0, 0.0),
                TaxSlab::new(600_000.0, 5.0),
                TaxSlab::new(900_000.0, 10.0),
                TaxSlab::new(1_200_000.0, 15.0),
                TaxSlab::new(1_500_000.0, 20.0),
                TaxSlab::unbounded(30.0),
            ],
        }
    }

    /// Indian old tax regime slabs (individuals below 60)
    pub fn old_regime() -> Self {
        Self {
            slabs: vec![
                TaxSlab::new(250_000.0, 0.0),
                TaxSlab::new(500_000.0, 5.0),
                TaxSlab::new(1_000_000.0, 20.0),
                TaxSlab::unbounded(30.0),
            ],
        }
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Marginal rate (percent) applying to the last unit of `income`
    pub fn marginal_rate(&self, income: f64) -> f64 {
        self.slabs
            .iter()
            .find(|slab| income <= slab.upper_bound)
            .map(|slab| slab.rate_percent)
            .unwrap_or(0.0)
    }
}

/// Tax on `taxable_income` before any cess or surcharge. Each slab taxes only
/// the part of income inside its bracket. Negative income is treated as zero.
pub fn compute_slab_tax(taxable_income: f64, slabs: &TaxSlabTable) -> Result<f64> {
    let mut remaining = ensure_finite("taxable_income", taxable_income)?.max(0.0);
    let mut tax = 0.0;
    let mut lower = 0.0;

    for slab in &slabs.slabs {
        if remaining <= 0.0 {
            break;
        }
        let width = slab.upper_bound - lower;
        let in_bracket = remaining.min(width);
        tax += in_bracket * slab.rate_percent / 100.0;
        remaining -= in_bracket;
        lower = slab.upper_bound;
    }

    Ok(tax)
}

/// Add a flat cess (e.g. 4% health and education cess) on top of slab tax
pub fn apply_cess(tax: f64, cess_percent: f64) -> Result<f64> {
    ensure_non_negative("tax", tax)?;
    ensure_non_negative("cess_percent", cess_percent)?;
    Ok(tax * (1.0 + cess_percent / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_income_is_zero_tax() {
        for table in [TaxSlabTable::new_regime_2024(), TaxSlabTable::old_regime()] {
            assert_eq!(compute_slab_tax(0.0, &table).unwrap(), 0.0);
            assert_eq!(compute_slab_tax(-50_000.0, &table).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_ten_lakh_new_regime() {
        // 0-3L: 0, 3-6L: 15,000, 6-9L: 30,000, 9-10L: 15,000
        let tax = compute_slab_tax(1_000_000.0, &TaxSlabTable::new_regime_2024()).unwrap();
        assert_relative_eq!(tax, 60_000.0);
    }

    #[test]
    fn test_top_slab_is_unbounded() {
        // 0 + 12,500 + 100,000 + 30% of 1.5 crore less 10 lakh
        let tax = compute_slab_tax(15_000_000.0, &TaxSlabTable::old_regime()).unwrap();
        assert_relative_eq!(tax, 12_500.0 + 100_000.0 + 0.30 * 14_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_monotone_in_income() {
        let table = TaxSlabTable::new_regime_2024();
        let mut previous = 0.0;
        for step in 0..=400 {
            let income = step as f64 * 5_000.0;
            let tax = compute_slab_tax(income, &table).unwrap();
            assert!(tax >= previous, "tax fell at income {income}");
            previous = tax;
        }
    }

    #[test]
    fn test_cess_is_separate() {
        let tax = compute_slab_tax(1_000_000.0, &TaxSlabTable::new_regime_2024()).unwrap();
        assert_relative_eq!(apply_cess(tax, 4.0).unwrap(), 62_400.0, max_relative = 1e-12);
        assert_eq!(apply_cess(tax, 0.0).unwrap(), tax);
        assert!(apply_cess(tax, -4.0).is_err());
    }

    #[test]
    fn test_marginal_rate() {
        let table = TaxSlabTable::new_regime_2024();
        assert_eq!(table.marginal_rate(250_000.0), 0.0);
        assert_eq!(table.marginal_rate(1_000_000.0), 15.0);
        assert_eq!(table.marginal_rate(5_000_000.0), 30.0);
    }

    #[test]
    fn test_malformed_tables() {
        assert!(TaxSlabTable::new(vec![]).is_err());
        assert!(TaxSlabTable::new(vec![TaxSlab::new(100.0, 5.0)]).is_err());
        assert!(TaxSlabTable::new(vec![
            TaxSlab::new(500.0, 0.0),
            TaxSlab::new(400.0, 10.0),
            TaxSlab::unbounded(20.0),
        ])
        .is_err());
        assert!(TaxSlabTable::new(vec![TaxSlab::new(500.0, -1.0), TaxSlab::unbounded(20.0)]).is_err());
        assert!(TaxSlabTable::new(vec![TaxSlab::unbounded(10.0), TaxSlab::unbounded(20.0)]).is_err());
        assert!(TaxSlabTable::new(vec![TaxSlab::new(0.0, 0.0), TaxSlab::unbounded(20.0)]).is_err());

        let flat = TaxSlabTable::new(vec![TaxSlab::unbounded(10.0)]).unwrap();
        assert_relative_eq!(compute_slab_tax(1_234.0, &flat).unwrap(), 123.4);
    }

    #[test]
    fn test_builtin_tables_pass_validation() {
        let new = TaxSlabTable::new_regime_2024();
        assert_eq!(TaxSlabTable::new(new.slabs().to_vec()).unwrap(), new);
        let old = TaxSlabTable::old_regime();
        assert_eq!(TaxSlabTable::new(old.slabs().to_vec()).unwrap(), old);
    }
}
