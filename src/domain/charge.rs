use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Cents, DepartmentId};

/// Day of the charge's own month after which a payment counts as late.
pub const PAYMENT_DEADLINE_DAY: u32 = 15;

/// Date format accepted for payment dates.
pub const PAYMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A billing cycle: one (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChargePeriod {
    pub year: i32,
    pub month: u32,
}

impl ChargePeriod {
    /// Build a period, returning `None` when the month is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// All twelve periods of a year, January first.
    pub fn whole_year(year: i32) -> Vec<Self> {
        (1..=12).map(|month| Self { year, month }).collect()
    }

    /// The payment deadline: the 15th of this period's month.
    pub fn deadline(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, PAYMENT_DEADLINE_DAY)
    }

    /// Classify a payment date against this period's deadline.
    /// Paying on the deadline itself is still on time.
    pub fn timing_for(&self, payment_date: NaiveDate) -> Option<PaymentTiming> {
        let deadline = self.deadline()?;
        Some(if payment_date <= deadline {
            PaymentTiming::OnTime
        } else {
            PaymentTiming::Late
        })
    }
}

impl std::fmt::Display for ChargePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentTiming {
    OnTime,
    Late,
}

impl PaymentTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTiming::OnTime => "on-time",
            PaymentTiming::Late => "late",
        }
    }
}

impl std::fmt::Display for PaymentTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a `YYYY-MM-DD` payment date.
pub fn parse_payment_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), PAYMENT_DATE_FORMAT).ok()
}

/// One common-expense charge: what a department owes for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseCharge {
    pub id: i64,
    pub department_id: DepartmentId,
    pub period: ChargePeriod,
    pub amount_cents: Cents,
    pub paid: bool,
    /// Calendar month in which the payment was recorded. It may differ from
    /// `period.month` when a charge is settled in a later month.
    pub month_paid: Option<u32>,
}

impl ExpenseCharge {
    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// Month stamped on the charge when paid on `payment_date`.
    pub fn month_paid_for(payment_date: NaiveDate) -> u32 {
        payment_date.month()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_payment_date(s).unwrap()
    }

    #[test]
    fn test_period_rejects_out_of_range_months() {
        assert!(ChargePeriod::new(2025, 0).is_none());
        assert!(ChargePeriod::new(2025, 13).is_none());
        assert_eq!(
            ChargePeriod::new(2025, 12),
            Some(ChargePeriod {
                year: 2025,
                month: 12
            })
        );
    }

    #[test]
    fn test_whole_year_has_twelve_ordered_periods() {
        let periods = ChargePeriod::whole_year(2025);
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].month, 1);
        assert_eq!(periods[11].month, 12);
        assert!(periods.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deadline_is_the_fifteenth() {
        let period = ChargePeriod::new(2025, 3).unwrap();
        assert_eq!(period.deadline(), Some(date("2025-03-15")));
    }

    #[test]
    fn test_payment_on_deadline_is_on_time() {
        let period = ChargePeriod::new(2025, 3).unwrap();
        assert_eq!(
            period.timing_for(date("2025-03-15")),
            Some(PaymentTiming::OnTime)
        );
        assert_eq!(
            period.timing_for(date("2025-02-28")),
            Some(PaymentTiming::OnTime)
        );
    }

    #[test]
    fn test_payment_after_deadline_is_late() {
        let period = ChargePeriod::new(2025, 3).unwrap();
        assert_eq!(period.timing_for(date("2025-03-16")), Some(PaymentTiming::Late));
        assert_eq!(period.timing_for(date("2025-04-01")), Some(PaymentTiming::Late));
    }

    #[test]
    fn test_parse_payment_date() {
        assert!(parse_payment_date("2025-03-15").is_some());
        assert!(parse_payment_date("15/03/2025").is_none());
        assert!(parse_payment_date("2025-02-30").is_none());
        assert!(parse_payment_date("").is_none());
    }

    #[test]
    fn test_month_paid_comes_from_payment_date() {
        assert_eq!(ExpenseCharge::month_paid_for(date("2025-04-02")), 4);
    }

    #[test]
    fn test_timing_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&PaymentTiming::OnTime).unwrap(),
            r#""on-time""#
        );
        assert_eq!(PaymentTiming::Late.to_string(), "late");
    }
}
