use thiserror::Error;

use crate::domain::{ChargePeriod, DepartmentId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date '{0}'. Required format: YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid charge period: {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Charge not found for department {department_id} in {period}")]
    ChargeNotFound {
        department_id: DepartmentId,
        period: ChargePeriod,
    },

    #[error("Duplicate payment: department {department_id} already paid {period}")]
    DuplicatePayment {
        department_id: DepartmentId,
        period: ChargePeriod,
    },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// Business-rule rejections are reported to the operator as a status
    /// message; anything else is an infrastructure failure.
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}
