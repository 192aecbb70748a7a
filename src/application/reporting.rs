use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    format_cents, serialize_cents, Cents, DepartmentId, ExpenseCharge, PaymentTiming,
};

pub const CHARGES_GENERATED: &str = "Charges generated successfully";
pub const NO_PENDING_AMOUNTS: &str = "No pending amounts";
pub const NO_RECORDS: &str = "No records";

/// A one-line status shown to the operator, e.g. `{"status": "No records"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
}

impl StatusMessage {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Rows of a query, or a status message when there are none.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Rows(Vec<T>),
    Empty(StatusMessage),
}

impl<T> Listing<T> {
    pub fn from_rows(rows: Vec<T>, empty_status: &str) -> Self {
        if rows.is_empty() {
            Listing::Empty(StatusMessage::new(empty_status))
        } else {
            Listing::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::Rows(rows) => rows,
            Listing::Empty(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty(_))
    }
}

/// Outcome of a charge generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub status: String,
    pub year: i32,
    pub months: Vec<u32>,
    pub departments: usize,
    #[serde(serialize_with = "serialize_cents")]
    pub amount: Cents,
}

/// Outcome of a successful payment registration.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub status: PaymentTiming,
    pub department: DepartmentId,
    /// Payment date as the operator entered it.
    pub payment_date: String,
}

/// An unpaid charge, as listed by the arrears report.
#[derive(Debug, Clone, Serialize)]
pub struct PendingCharge {
    pub department_id: DepartmentId,
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "serialize_cents")]
    pub amount: Cents,
}

impl From<ExpenseCharge> for PendingCharge {
    fn from(charge: ExpenseCharge) -> Self {
        Self {
            department_id: charge.department_id,
            year: charge.period.year,
            month: charge.period.month,
            amount: charge.amount_cents,
        }
    }
}

/// One period of a department's account.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeSummary {
    pub year: i32,
    pub month: u32,
    #[serde(serialize_with = "serialize_cents")]
    pub amount: Cents,
    pub paid: bool,
    pub month_paid: Option<u32>,
}

impl From<ExpenseCharge> for ChargeSummary {
    fn from(charge: ExpenseCharge) -> Self {
        Self {
            year: charge.period.year,
            month: charge.period.month,
            amount: charge.amount_cents,
            paid: charge.paid,
            month_paid: charge.month_paid,
        }
    }
}

/// Human-readable statement of one department's charges.
#[derive(Debug, Clone)]
pub struct DepartmentDetail {
    /// Identifier as typed by the operator, echoed when nothing is found.
    pub requested: String,
    pub department_id: DepartmentId,
    pub department_name: Option<String>,
    pub charges: Vec<ChargeSummary>,
}

impl fmt::Display for DepartmentDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (&self.department_name, self.charges.is_empty()) {
            (Some(name), false) => name,
            _ => {
                return write!(
                    f,
                    "Department {} has no expense records.",
                    self.requested
                );
            }
        };

        writeln!(f, "Expenses for {} (ID: {}):", name, self.department_id)?;
        for charge in &self.charges {
            writeln!(f)?;
            let state = if charge.paid { "Paid" } else { "Pending" };
            let month_paid = match (charge.paid, charge.month_paid) {
                (true, Some(month)) => format!(", Payment month: {}", month),
                _ => String::new(),
            };
            write!(
                f,
                "  - Year: {}, Month: {}, Amount: ${} ({}{})",
                charge.year,
                charge.month,
                format_cents(charge.amount),
                state,
                month_paid
            )?;
        }
        Ok(())
    }
}
