use anyhow::Result;
use std::io::Read;

use crate::application::LedgerService;
use crate::domain::Department;

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// Importer for loading departments into the ledger
pub struct Importer<'a> {
    service: &'a LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Import departments from a CSV with an `id,name` header.
    /// Ids are normalized; a known id gets its name refreshed.
    pub async fn import_departments_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut departments = Vec::new();
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let id = record.get(0).unwrap_or("").trim();
            let name = record.get(1).unwrap_or("").trim();

            if id.is_empty() {
                errors.push(ImportError {
                    line,
                    field: Some("id".to_string()),
                    error: "Missing department id".to_string(),
                });
                continue;
            }
            if name.is_empty() {
                errors.push(ImportError {
                    line,
                    field: Some("name".to_string()),
                    error: "Missing department name".to_string(),
                });
                continue;
            }

            departments.push(Department::new(id, name));
        }

        let imported = if options.dry_run {
            departments.len()
        } else {
            self.service.import_departments(&departments).await?
        };

        Ok(ImportResult { imported, errors })
    }
}
