mod common;

use anyhow::Result;
use common::{dept, StandardDepartments};
use condo_ledger::application::{Listing, NO_PENDING_AMOUNTS, NO_RECORDS};

#[tokio::test]
async fn test_list_pending_respects_inclusive_upper_bound() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2024, Some(12), 4_000_000).await?;
    service.generate_charges(2025, None, 5_000_000).await?;
    service.generate_charges(2026, Some(1), 5_500_000).await?;

    let pending = service.list_pending(2025, 6).await?;
    let rows = pending.rows();

    // 3 departments x (Dec 2024 + Jan..Jun 2025)
    assert_eq!(rows.len(), 3 * 7);
    assert!(rows
        .iter()
        .all(|row| row.year < 2025 || (row.year == 2025 && row.month <= 6)));
    assert!(!rows.iter().any(|row| row.year == 2025 && row.month == 7));
    assert!(!rows.iter().any(|row| row.year == 2026));

    Ok(())
}

#[tokio::test]
async fn test_list_pending_is_ordered_by_period() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(5), 5_000_000).await?;
    service.generate_charges(2025, Some(2), 5_000_000).await?;
    service.generate_charges(2024, Some(11), 5_000_000).await?;

    let pending = service.list_pending(2025, 12).await?;
    let periods: Vec<(i32, u32)> = pending
        .rows()
        .iter()
        .map(|row| (row.year, row.month))
        .collect();

    let mut sorted = periods.clone();
    sorted.sort();
    assert_eq!(periods, sorted);
    assert_eq!(periods.first(), Some(&(2024, 11)));
    assert_eq!(periods.last(), Some(&(2025, 5)));

    Ok(())
}

#[tokio::test]
async fn test_list_pending_excludes_paid_charges() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(3), 5_000_000).await?;
    service
        .register_payment("2", 2025, 3, "2025-03-05")
        .await?;

    let pending = service.list_pending(2025, 3).await?;
    let departments: Vec<_> = pending
        .rows()
        .iter()
        .map(|row| row.department_id.clone())
        .collect();
    assert_eq!(departments, vec![dept("1"), dept("7")]);

    Ok(())
}

#[tokio::test]
async fn test_list_pending_without_results_reports_status() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(8), 5_000_000).await?;

    let pending = service.list_pending(2025, 7).await?;
    assert!(pending.is_empty());
    assert_eq!(
        serde_json::to_value(&pending)?,
        serde_json::json!({ "status": NO_PENDING_AMOUNTS })
    );

    Ok(())
}

#[tokio::test]
async fn test_pending_json_uses_decimal_amounts() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(1), 4_250_050).await?;

    let pending = service.list_pending(2025, 1).await?;
    let json = serde_json::to_value(&pending)?;
    assert_eq!(
        json[0],
        serde_json::json!({
            "department_id": "001",
            "year": 2025,
            "month": 1,
            "amount": "42500.50"
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_summary_for_unknown_department_reports_no_records() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(1), 5_000_000).await?;

    let summary = service.summarize_department("42").await?;
    match summary {
        Listing::Empty(status) => assert_eq!(status.status, NO_RECORDS),
        Listing::Rows(rows) => panic!("expected no records, got {} rows", rows.len()),
    }

    Ok(())
}

#[tokio::test]
async fn test_detail_report_for_department() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;
    service.generate_charges(2025, Some(3), 5_000_000).await?;
    service.generate_charges(2025, Some(4), 5_000_000).await?;
    service
        .register_payment("7", 2025, 3, "2025-04-02")
        .await?;

    let detail = service.detail_department("7").await?;
    assert_eq!(detail.department_name.as_deref(), Some("Apartment 7"));
    assert_eq!(
        detail.to_string(),
        "Expenses for Apartment 7 (ID: 007):\n\n\
         \x20 - Year: 2025, Month: 3, Amount: $50000.00 (Paid, Payment month: 4)\n\
         \x20 - Year: 2025, Month: 4, Amount: $50000.00 (Pending)"
    );

    Ok(())
}

#[tokio::test]
async fn test_detail_report_without_records_echoes_input() -> Result<()> {
    let (service, _temp) = StandardDepartments::service().await?;

    let detail = service.detail_department("7").await?;
    assert!(detail.charges.is_empty());
    assert_eq!(detail.to_string(), "Department 7 has no expense records.");

    Ok(())
}
