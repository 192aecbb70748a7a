use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{Cents, ChargePeriod, Department, DepartmentId, ExpenseCharge};

use super::MIGRATION_001_INITIAL;

const CHARGE_COLUMNS: &str = "id, department_id, year, month, amount_cents, paid, month_paid";

/// Repository for persisting and querying departments and their expense charges.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Create the schema if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Department operations
    // ========================

    /// Save a batch of departments in one transaction, refreshing the names
    /// of ids that already exist.
    pub async fn save_departments(&self, departments: &[Department]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        for department in departments {
            sqlx::query(
                r#"
                INSERT INTO departments (id, name)
                VALUES (?, ?)
                ON CONFLICT(id) DO UPDATE SET name = excluded.name
                "#,
            )
            .bind(department.id.as_str())
            .bind(&department.name)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to save department {}", department.id))?;
        }

        tx.commit().await.context("Failed to commit departments")?;
        Ok(())
    }

    /// List all departments ordered by id.
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query("SELECT id, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list departments")?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                Department {
                    id: DepartmentId::normalize(&id),
                    name: row.get("name"),
                }
            })
            .collect())
    }

    // ========================
    // Charge operations
    // ========================

    /// Upsert one charge per department for each period, all in one transaction.
    /// Existing rows only get their amount overwritten; paid status is kept.
    /// Returns the number of departments charged.
    pub async fn upsert_charges(&self, periods: &[ChargePeriod], amount: Cents) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let department_ids: Vec<String> = sqlx::query("SELECT id FROM departments ORDER BY id")
            .fetch_all(&mut *tx)
            .await
            .context("Failed to list departments")?
            .iter()
            .map(|row| row.get("id"))
            .collect();

        for period in periods {
            for department_id in &department_ids {
                sqlx::query(
                    r#"
                    INSERT INTO common_expenses (department_id, year, month, amount_cents)
                    VALUES (?, ?, ?, ?)
                    ON CONFLICT(department_id, year, month)
                    DO UPDATE SET amount_cents = excluded.amount_cents
                    "#,
                )
                .bind(department_id)
                .bind(period.year)
                .bind(i64::from(period.month))
                .bind(amount)
                .execute(&mut *tx)
                .await
                .with_context(|| {
                    format!("Failed to upsert charge {} for {}", period, department_id)
                })?;
            }
        }

        tx.commit().await.context("Failed to commit charges")?;
        Ok(department_ids.len())
    }

    /// Get the charge for a department and period.
    pub async fn get_charge(
        &self,
        department_id: &DepartmentId,
        period: ChargePeriod,
    ) -> Result<Option<ExpenseCharge>> {
        let row = sqlx::query(&format!(
            "SELECT {CHARGE_COLUMNS} FROM common_expenses WHERE department_id = ? AND year = ? AND month = ?"
        ))
        .bind(department_id.as_str())
        .bind(period.year)
        .bind(i64::from(period.month))
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch charge")?;

        row.as_ref().map(Self::row_to_charge).transpose()
    }

    /// Mark an unpaid charge as paid. Returns false if the row was already paid
    /// (or vanished), leaving it untouched.
    pub async fn mark_charge_paid(&self, charge_id: i64, month_paid: u32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE common_expenses
            SET paid = 1, month_paid = ?
            WHERE id = ? AND paid = 0
            "#,
        )
        .bind(i64::from(month_paid))
        .bind(charge_id)
        .execute(&self.pool)
        .await
        .context("Failed to mark charge as paid")?;

        Ok(result.rows_affected() == 1)
    }

    /// List unpaid charges up to and including the given period, oldest first.
    pub async fn list_pending_through(
        &self,
        through_year: i32,
        through_month: u32,
    ) -> Result<Vec<ExpenseCharge>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CHARGE_COLUMNS}
            FROM common_expenses
            WHERE paid = 0 AND (year < ? OR (year = ? AND month <= ?))
            ORDER BY year, month, department_id
            "#
        ))
        .bind(through_year)
        .bind(through_year)
        .bind(i64::from(through_month))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending charges")?;

        rows.iter().map(Self::row_to_charge).collect()
    }

    /// List every charge of one department, ordered by period.
    pub async fn list_charges_for_department(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<ExpenseCharge>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHARGE_COLUMNS} FROM common_expenses WHERE department_id = ? ORDER BY year, month"
        ))
        .bind(department_id.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list charges for department")?;

        rows.iter().map(Self::row_to_charge).collect()
    }

    /// List a department's charges joined with the department name.
    /// Charges of departments missing from `departments` are not returned.
    pub async fn list_charges_with_department_name(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<(String, ExpenseCharge)>> {
        let rows = sqlx::query(
            r#"
            SELECT d.name AS department_name,
                   ce.id, ce.department_id, ce.year, ce.month, ce.amount_cents, ce.paid, ce.month_paid
            FROM common_expenses ce
            JOIN departments d ON ce.department_id = d.id
            WHERE ce.department_id = ?
            ORDER BY ce.year, ce.month
            "#,
        )
        .bind(department_id.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch department detail")?;

        rows.iter()
            .map(|row| -> Result<(String, ExpenseCharge)> {
                Ok((row.get("department_name"), Self::row_to_charge(row)?))
            })
            .collect()
    }

    /// List every charge in the ledger.
    pub async fn list_all_charges(&self) -> Result<Vec<ExpenseCharge>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHARGE_COLUMNS} FROM common_expenses ORDER BY year, month, department_id"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list charges")?;

        rows.iter().map(Self::row_to_charge).collect()
    }

    fn row_to_charge(row: &sqlx::sqlite::SqliteRow) -> Result<ExpenseCharge> {
        let department_id: String = row.get("department_id");
        let month: i64 = row.get("month");
        let month_paid: Option<i64> = row.get("month_paid");

        Ok(ExpenseCharge {
            id: row.get("id"),
            department_id: DepartmentId::normalize(&department_id),
            period: ChargePeriod {
                year: row.get("year"),
                month: u32::try_from(month).context("Invalid charge month")?,
            },
            amount_cents: row.get("amount_cents"),
            paid: row.get::<i32, _>("paid") != 0,
            month_paid: month_paid
                .map(u32::try_from)
                .transpose()
                .context("Invalid month_paid")?,
        })
    }
}
