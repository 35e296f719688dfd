//! Salary component exemptions (HRA, LTA)

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CityType {
    Metro,
    NonMetro,
}

impl CityType {
    /// Share of basic salary that caps the exemption
    pub fn basic_share(self) -> f64 {
        match self {
            Self::Metro => 0.50,
            Self::NonMetro => 0.40,
        }
    }
}

/// HRA exemption and the three limits it is the minimum of.
/// All amounts are for the same period (monthly or annual).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HraExemption {
    pub exempt: f64,
    pub taxable: f64,
    pub hra_received: f64,
    /// Rent paid less 10% of basic, floored at zero
    pub rent_over_tenth_of_basic: f64,
    pub basic_share: f64,
}

/// Exempt HRA is the least of: HRA received, rent paid minus 10% of basic, and
/// 50% (metro) or 40% (non-metro) of basic
pub fn hra_exemption(basic_salary: f64, hra_received: f64, rent_paid: f64, city: CityType) -> Result<HraExemption> {
    ensure_non_negative("basic_salary", basic_salary)?;
    ensure_non_negative("hra_received", hra_received)?;
    ensure_non_negative("rent_paid", rent_paid)?;

    let rent_over_tenth_of_basic = (rent_paid - 0.1 * basic_salary).max(0.0);
    let basic_share = basic_salary * city.basic_share();
    let exempt = hra_received.min(rent_over_tenth_of_basic).min(basic_share);

    Ok(HraExemption {
        exempt,
        taxable: hra_received - exempt,
        hra_received,
        rent_over_tenth_of_basic,
        basic_share,
    })
}

/// Exempt and taxable parts of leave travel allowance
pub fn lta_exemption(lta_received: f64, travel_spent: f64) -> Result<(f64, f64)> {
    ensure_non_negative("lta_received", lta_received)?;
    ensure_non_negative("travel_spent", travel_spent)?;

    let exempt = lta_received.min(travel_spent);
    Ok((exempt, lta_received - exempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rent_rule_binds() {
        let hra = hra_exemption(50_000.0, 20_000.0, 15_000.0, CityType::Metro).unwrap();
        assert_eq!(hra.rent_over_tenth_of_basic, 10_000.0);
        assert_eq!(hra.exempt, 10_000.0);
        assert_eq!(hra.taxable, 10_000.0);
    }

    #[test]
    fn test_city_rule_binds() {
        let metro = hra_exemption(40_000.0, 30_000.0, 40_000.0, CityType::Metro).unwrap();
        assert_eq!(metro.exempt, 20_000.0);
        let non_metro = hra_exemption(40_000.0, 30_000.0, 40_000.0, CityType::NonMetro).unwrap();
        assert_eq!(non_metro.exempt, 16_000.0);
    }

    #[test]
    fn test_low_rent_gives_no_exemption() {
        let hra = hra_exemption(60_000.0, 25_000.0, 5_000.0, CityType::NonMetro).unwrap();
        assert_eq!(hra.exempt, 0.0);
        assert_eq!(hra.taxable, 25_000.0);
    }

    #[test]
    fn test_lta() {
        assert_eq!(lta_exemption(40_000.0, 25_000.0).unwrap(), (25_000.0, 15_000.0));
        assert_eq!(lta_exemption(40_000.0, 55_000.0).unwrap(), (40_000.0, 0.0));
        assert!(lta_exemption(-1.0, 0.0).is_err());
    }
}
