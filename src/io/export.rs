use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::format_cents;

/// Exporter for writing ledger data as CSV
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export every charge to CSV. Returns the number of rows written.
    pub async fn export_charges_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let charges = self.service.list_all_charges().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "department_id",
            "year",
            "month",
            "amount",
            "paid",
            "month_paid",
        ])?;

        for charge in &charges {
            csv_writer.write_record([
                charge.department_id.to_string(),
                charge.period.year.to_string(),
                charge.period.month.to_string(),
                format_cents(charge.amount_cents),
                charge.paid.to_string(),
                charge
                    .month_paid
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(charges.len())
    }
}
