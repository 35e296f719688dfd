//! Period-by-period ledgers returned by the engine

use serde::Serialize;

/// One period of a loan or investment ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchedulePeriod {
    /// Period index (1-indexed)
    pub period: u32,

    pub opening_balance: f64,

    /// Payment (loans) or contribution (investments) made this period
    pub contribution: f64,

    pub interest: f64,

    /// Principal repaid; zero for investment ledgers
    pub principal: f64,

    pub closing_balance: f64,
}

/// Ordered sequence of periods; closing balance of period i is the opening
/// balance of period i+1
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
}

impl Schedule {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            periods: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, row: SchedulePeriod) {
        debug_assert_eq!(row.period as usize, self.periods.len() + 1);
        self.periods.push(row);
    }

    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchedulePeriod> {
        self.periods.iter()
    }

    pub fn first(&self) -> Option<&SchedulePeriod> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&SchedulePeriod> {
        self.periods.last()
    }

    /// Closing balance of the final period, or 0 for an empty schedule
    pub fn final_closing_balance(&self) -> f64 {
        self.periods.last().map(|p| p.closing_balance).unwrap_or(0.0)
    }

    pub fn total_contributions(&self) -> f64 {
        self.periods.iter().map(|p| p.contribution).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.periods.iter().map(|p| p.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.periods.iter().map(|p| p.principal).sum()
    }

    /// Roll consecutive runs of `periods_per_year` periods into yearly rows.
    /// A trailing partial year is kept as its own row.
    pub fn by_year(&self, periods_per_year: u32) -> Schedule {
        let chunk = periods_per_year.max(1) as usize;
        let mut yearly = Schedule::with_capacity(self.periods.len().div_ceil(chunk));

        for (idx, rows) in self.periods.chunks(chunk).enumerate() {
            let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
                continue;
            };
            yearly.push(SchedulePeriod {
                period: idx as u32 + 1,
                opening_balance: first.opening_balance,
                contribution: rows.iter().map(|r| r.contribution).sum(),
                interest: rows.iter().map(|r| r.interest).sum(),
                principal: rows.iter().map(|r| r.principal).sum(),
                closing_balance: last.closing_balance,
            });
        }

        yearly
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a SchedulePeriod;
    type IntoIter = std::slice::Iter<'a, SchedulePeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(n: u32) -> Schedule {
        let mut schedule = Schedule::default();
        let mut balance = 0.0;
        for period in 1..=n {
            let opening = balance;
            balance += 100.0 + 1.0;
            schedule.push(SchedulePeriod {
                period,
                opening_balance: opening,
                contribution: 100.0,
                interest: 1.0,
                principal: 0.0,
                closing_balance: balance,
            });
        }
        schedule
    }

    #[test]
    fn test_totals() {
        let schedule = ledger(12);
        assert_eq!(schedule.len(), 12);
        assert!((schedule.total_contributions() - 1200.0).abs() < 1e-9);
        assert!((schedule.total_interest() - 12.0).abs() < 1e-9);
        assert!((schedule.final_closing_balance() - 1212.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_year_keeps_partial_year() {
        let yearly = ledger(30).by_year(12);
        assert_eq!(yearly.len(), 3);

        let second = yearly.periods()[1];
        assert_eq!(second.period, 2);
        assert!((second.opening_balance - 1212.0).abs() < 1e-9);
        assert!((second.contribution - 1200.0).abs() < 1e-9);

        let third = yearly.last().unwrap();
        assert!((third.contribution - 600.0).abs() < 1e-9);
        assert!((third.closing_balance - 3030.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::default();
        assert!(schedule.is_empty());
        assert_eq!(schedule.final_closing_balance(), 0.0);
        assert!(schedule.by_year(12).is_empty());
    }
}
