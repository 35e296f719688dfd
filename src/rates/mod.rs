//! Interest rate specifications
//!
//! Rates are carried as annual nominal percentages (8.5 means 8.5%) together
//! with the number of compounding sub-periods per year.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_rate_at_least_total_loss, EngineError, Result};

/// Number of monthly periods in a year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rates with a magnitude below this are treated as zero
pub const ZERO_RATE_EPSILON: f64 = 1e-12;

/// How often interest is credited within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    /// Compounding sub-periods per year
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::SemiAnnual => 2,
            Self::Quarterly => 4,
            Self::Monthly => 12,
        }
    }
}

impl TryFrom<u32> for CompoundingFrequency {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Annual),
            2 => Ok(Self::SemiAnnual),
            4 => Ok(Self::Quarterly),
            12 => Ok(Self::Monthly),
            other => Err(EngineError::invalid(
                "compounding_frequency",
                format!("must be one of 1, 2, 4, 12, got {other}"),
            )),
        }
    }
}

/// Annual nominal rate plus its compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    /// Annual nominal rate in percent
    pub annual_percent: f64,
    pub frequency: CompoundingFrequency,
}

impl RateSpec {
    /// Validated rate; anything below -100% is rejected
    pub fn new(annual_percent: f64, frequency: CompoundingFrequency) -> Result<Self> {
        ensure_rate_at_least_total_loss("annual_percent", annual_percent)?;
        Ok(Self {
            annual_percent,
            frequency,
        })
    }

    pub fn monthly(annual_percent: f64) -> Result<Self> {
        Self::new(annual_percent, CompoundingFrequency::Monthly)
    }

    pub fn annual(annual_percent: f64) -> Result<Self> {
        Self::new(annual_percent, CompoundingFrequency::Annual)
    }

    /// Rate per compounding sub-period as a decimal
    pub fn periodic_rate(&self) -> f64 {
        self.annual_percent / 100.0 / self.frequency.periods_per_year() as f64
    }

    /// Effective annual rate as a decimal
    pub fn effective_annual_rate(&self) -> f64 {
        let n = self.frequency.periods_per_year() as i32;
        (1.0 + self.periodic_rate()).powi(n) - 1.0
    }

    pub fn is_zero(&self) -> bool {
        self.annual_percent.abs() < ZERO_RATE_EPSILON
    }
}

/// Monthly decimal rate for an annual percentage (8.5 -> 0.0070833)
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / MONTHS_PER_YEAR as f64 / 100.0
}

/// Number of months in `years`, rejecting terms that overflow `u32`
pub fn months_for_years(field: &'static str, years: u32) -> Result<u32> {
    years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EngineError::invalid(field, format!("term too long: {years} years")))
}

/// Whether a periodic decimal rate should take the zero-rate branch
pub(crate) fn is_zero_rate(periodic_rate: f64) -> bool {
    periodic_rate.abs() < ZERO_RATE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_count() {
        assert_eq!(CompoundingFrequency::try_from(4u32).unwrap(), CompoundingFrequency::Quarterly);
        assert_eq!(CompoundingFrequency::try_from(12u32).unwrap().periods_per_year(), 12);
        assert!(CompoundingFrequency::try_from(3u32).is_err());
        assert!(CompoundingFrequency::try_from(0u32).is_err());
    }

    #[test]
    fn test_periodic_and_effective_rates() {
        let rate = RateSpec::new(8.0, CompoundingFrequency::Quarterly).unwrap();
        assert!((rate.periodic_rate() - 0.02).abs() < 1e-12);
        // 1.02^4 - 1
        assert!((rate.effective_annual_rate() - 0.08243216).abs() < 1e-8);
    }

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_rate_bound_matches_lump_sum_growth() {
        assert!(RateSpec::annual(-100.0).is_ok());
        assert!(RateSpec::annual(-100.5).is_err());
        assert!(RateSpec::annual(f64::NAN).is_err());
        // Negative real returns are allowed
        assert!(RateSpec::annual(-2.5).is_ok());
    }

    #[test]
    fn test_months_for_years() {
        assert_eq!(months_for_years("years", 30).unwrap(), 360);
        assert!(months_for_years("years", 400_000_000).is_err());
    }
}
