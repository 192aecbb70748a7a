use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::application::{AppError, StatusMessage};

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON shown for the result of a ledger operation.
///
/// Business-rule rejections (bad date, unknown charge, duplicate payment)
/// become a `{"status": ...}` message; storage failures are returned.
pub fn outcome_json<T: Serialize>(outcome: Result<T, AppError>) -> Result<Value> {
    match outcome {
        Ok(value) => Ok(serde_json::to_value(value)?),
        Err(err) if err.is_business_rule() => {
            Ok(serde_json::to_value(StatusMessage::new(err.to_string()))?)
        }
        Err(err) => Err(err.into()),
    }
}

/// Print the result of a ledger operation as JSON.
pub fn print_outcome<T: Serialize>(outcome: Result<T, AppError>) -> Result<()> {
    print_json(&outcome_json(outcome)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{ChargePeriod, DepartmentId};

    fn march() -> ChargePeriod {
        ChargePeriod::new(2025, 3).unwrap()
    }

    #[test]
    fn test_successful_outcome_is_serialized_as_is() {
        let value = outcome_json::<StatusMessage>(Ok(StatusMessage::new("ok"))).unwrap();
        assert_eq!(value, json!({ "status": "ok" }));
    }

    #[test]
    fn test_invalid_date_becomes_status() {
        let value = outcome_json::<()>(Err(AppError::InvalidDate("2025/03/01".into()))).unwrap();
        assert_eq!(
            value,
            json!({ "status": "Invalid date '2025/03/01'. Required format: YYYY-MM-DD" })
        );
    }

    #[test]
    fn test_missing_charge_becomes_status() {
        let value = outcome_json::<()>(Err(AppError::ChargeNotFound {
            department_id: DepartmentId::normalize("7"),
            period: march(),
        }))
        .unwrap();
        assert_eq!(
            value,
            json!({ "status": "Charge not found for department 007 in 2025-03" })
        );
    }

    #[test]
    fn test_duplicate_payment_becomes_status() {
        let value = outcome_json::<()>(Err(AppError::DuplicatePayment {
            department_id: DepartmentId::normalize("7"),
            period: march(),
        }))
        .unwrap();
        assert_eq!(
            value,
            json!({ "status": "Duplicate payment: department 007 already paid 2025-03" })
        );
    }

    #[test]
    fn test_database_error_is_returned() {
        let outcome = outcome_json::<()>(Err(AppError::Database(anyhow::anyhow!(
            "database is locked"
        ))));
        let err = outcome.unwrap_err();
        assert!(err.to_string().contains("database is locked"));
    }
}
