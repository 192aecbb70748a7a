use tracing::{debug, info, warn};

use crate::domain::{
    format_cents, parse_payment_date, Cents, ChargePeriod, Department, DepartmentId, ExpenseCharge,
};
use crate::storage::Repository;

use super::{
    AppError, ChargeSummary, DepartmentDetail, GenerationReport, Listing, PaymentReceipt,
    PendingCharge, CHARGES_GENERATED, NO_PENDING_AMOUNTS, NO_RECORDS,
};

/// Application service providing the ledger operations.
/// This is the primary interface for any client (menu, subcommands, tests).
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open the database at the given path, creating the file and schema if needed.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Department operations
    // ========================

    /// Load departments maintained outside the ledger. Either every
    /// department is saved or none is.
    pub async fn import_departments(&self, departments: &[Department]) -> Result<usize, AppError> {
        self.repo.save_departments(departments).await?;
        debug!(count = departments.len(), "departments imported");
        Ok(departments.len())
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        Ok(self.repo.list_departments().await?)
    }

    // ========================
    // Charge operations
    // ========================

    /// Charge every department `amount` for one month of `year`, or for the
    /// whole year when `month` is `None`. Existing charges get the new amount
    /// and keep their paid status.
    pub async fn generate_charges(
        &self,
        year: i32,
        month: Option<u32>,
        amount: Cents,
    ) -> Result<GenerationReport, AppError> {
        if amount < 0 {
            return Err(AppError::InvalidAmount(format!(
                "charge amount must not be negative, got {}",
                format_cents(amount)
            )));
        }

        let periods = match month {
            Some(month) => vec![
                ChargePeriod::new(year, month).ok_or(AppError::InvalidPeriod { year, month })?,
            ],
            None => ChargePeriod::whole_year(year),
        };

        let departments = self.repo.upsert_charges(&periods, amount).await?;
        info!(
            year,
            months = periods.len(),
            departments,
            amount_cents = amount,
            "charges generated"
        );

        Ok(GenerationReport {
            status: CHARGES_GENERATED.to_string(),
            year,
            months: periods.iter().map(|p| p.month).collect(),
            departments,
            amount,
        })
    }

    /// Record the payment of a department's charge for (year, month).
    ///
    /// A payment made on or before the 15th of the charge's month is on time.
    /// The charge is stamped with the month of `payment_date`, which may be a
    /// later month than the charge's own.
    pub async fn register_payment(
        &self,
        department: &str,
        year: i32,
        month: u32,
        payment_date: &str,
    ) -> Result<PaymentReceipt, AppError> {
        let result = self
            .try_register_payment(department, year, month, payment_date)
            .await;
        if let Err(err) = &result {
            if err.is_business_rule() {
                warn!(department, year, month, payment_date, %err, "payment rejected");
            }
        }
        result
    }

    async fn try_register_payment(
        &self,
        department: &str,
        year: i32,
        month: u32,
        payment_date: &str,
    ) -> Result<PaymentReceipt, AppError> {
        let paid_on = parse_payment_date(payment_date)
            .ok_or_else(|| AppError::InvalidDate(payment_date.to_string()))?;
        let department_id = DepartmentId::normalize(department);
        let period = ChargePeriod { year, month };

        let charge = self
            .repo
            .get_charge(&department_id, period)
            .await?
            .ok_or_else(|| AppError::ChargeNotFound {
                department_id: department_id.clone(),
                period,
            })?;

        if charge.is_paid() {
            return Err(AppError::DuplicatePayment {
                department_id,
                period,
            });
        }

        // Stored charges always carry a valid month, so a missing deadline
        // only happens for rows written outside this crate.
        let timing = period
            .timing_for(paid_on)
            .ok_or(AppError::InvalidPeriod { year, month })?;

        let updated = self
            .repo
            .mark_charge_paid(charge.id, ExpenseCharge::month_paid_for(paid_on))
            .await?;
        if !updated {
            return Err(AppError::DuplicatePayment {
                department_id,
                period,
            });
        }

        info!(department = %department_id, %period, %timing, "payment registered");
        Ok(PaymentReceipt {
            status: timing,
            department: department_id,
            payment_date: payment_date.trim().to_string(),
        })
    }

    // ========================
    // Reporting operations
    // ========================

    /// Unpaid charges up to and including (through_year, through_month).
    pub async fn list_pending(
        &self,
        through_year: i32,
        through_month: u32,
    ) -> Result<Listing<PendingCharge>, AppError> {
        let pending = self
            .repo
            .list_pending_through(through_year, through_month)
            .await?;

        Ok(Listing::from_rows(
            pending.into_iter().map(PendingCharge::from).collect(),
            NO_PENDING_AMOUNTS,
        ))
    }

    /// Every charge of one department, ordered by period.
    pub async fn summarize_department(
        &self,
        department: &str,
    ) -> Result<Listing<ChargeSummary>, AppError> {
        let department_id = DepartmentId::normalize(department);
        let charges = self.repo.list_charges_for_department(&department_id).await?;

        Ok(Listing::from_rows(
            charges.into_iter().map(ChargeSummary::from).collect(),
            NO_RECORDS,
        ))
    }

    /// A department's charges with its name, ready to print.
    pub async fn detail_department(&self, department: &str) -> Result<DepartmentDetail, AppError> {
        let department_id = DepartmentId::normalize(department);
        let rows = self
            .repo
            .list_charges_with_department_name(&department_id)
            .await?;

        let department_name = rows.first().map(|(name, _)| name.clone());
        Ok(DepartmentDetail {
            requested: department.to_string(),
            department_id,
            department_name,
            charges: rows
                .into_iter()
                .map(|(_, charge)| ChargeSummary::from(charge))
                .collect(),
        })
    }

    /// Every charge in the ledger, for export.
    pub async fn list_all_charges(&self) -> Result<Vec<ExpenseCharge>, AppError> {
        Ok(self.repo.list_all_charges().await?)
    }
}
