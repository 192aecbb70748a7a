// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use condo_ledger::application::LedgerService;
use condo_ledger::domain::{Department, DepartmentId};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: a small building
pub struct StandardDepartments;

impl StandardDepartments {
    pub const IDS: [&'static str; 3] = ["001", "002", "007"];

    /// Register departments 001, 002 and 007
    pub async fn create(service: &LedgerService) -> Result<()> {
        service
            .import_departments(&[
                Department::new("1", "Apartment 1"),
                Department::new("2", "Apartment 2"),
                Department::new("7", "Apartment 7"),
            ])
            .await?;
        Ok(())
    }

    /// Service with the standard departments already registered
    pub async fn service() -> Result<(LedgerService, TempDir)> {
        let (service, temp) = test_service().await?;
        Self::create(&service).await?;
        Ok((service, temp))
    }
}

pub fn dept(raw: &str) -> DepartmentId {
    DepartmentId::normalize(raw)
}
