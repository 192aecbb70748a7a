mod menu;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_cents, parse_cents, Cents, DEFAULT_CHARGE_CENTS};
use crate::io::{Exporter, ImportOptions, Importer};

pub use menu::{run_menu, MenuChoice};
pub use output::{outcome_json, print_json, print_outcome};

/// Condo Ledger - common-expense charges, payments and arrears per department
#[derive(Parser)]
#[command(name = "condo-ledger")]
#[command(about = "Track monthly common-expense charges and payments per department")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(
        short,
        long,
        env = "CONDO_LEDGER_DB",
        default_value = "condo-ledger.db",
        global = true
    )]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (opens the interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Open the interactive menu
    Menu,

    /// Generate charges for every department
    Generate {
        /// Year to charge
        year: i32,

        /// Month to charge (omit for all twelve months)
        #[arg(short, long)]
        month: Option<u32>,

        /// Amount charged to each department (e.g., "50000" or "50000.00")
        #[arg(short, long, default_value = "50000")]
        amount: String,
    },

    /// Register the payment of a charge
    Pay {
        /// Department number (e.g., "7" or "007")
        department: String,

        /// Year of the charge
        year: i32,

        /// Month of the charge
        month: u32,

        /// Payment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// List unpaid charges up to a month (inclusive)
    Pending {
        /// Last year to include
        year: i32,

        /// Last month of that year to include
        month: u32,
    },

    /// Show every charge of a department as JSON
    Summary {
        /// Department number
        department: String,
    },

    /// Print a readable statement of a department's charges
    Detail {
        /// Department number
        department: String,
    },

    /// Department management commands
    #[command(subcommand)]
    Departments(DepartmentCommands),

    /// Export all charges to CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DepartmentCommands {
    /// Import departments from a CSV file with an `id,name` header
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// List known departments
    List,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let service = LedgerService::init(&self.database)
            .await
            .with_context(|| format!("Failed to open database: {}", self.database))?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Menu => run_menu(&service).await?,

            Commands::Generate {
                year,
                month,
                amount,
            } => {
                let amount_cents = parse_cents(&amount)
                    .context("Invalid amount format. Use '50000.00' or '50000'")?;
                print_outcome(service.generate_charges(year, month, amount_cents).await)?;
            }

            Commands::Pay {
                department,
                year,
                month,
                date,
            } => {
                print_outcome(
                    service
                        .register_payment(&department, year, month, &date)
                        .await,
                )?;
            }

            Commands::Pending { year, month } => {
                print_outcome(service.list_pending(year, month).await)?;
            }

            Commands::Summary { department } => {
                print_outcome(service.summarize_department(&department).await)?;
            }

            Commands::Detail { department } => {
                println!("{}", service.detail_department(&department).await?);
            }

            Commands::Departments(cmd) => run_department_command(&service, cmd).await?,

            Commands::Export { output } => run_export_command(&service, output.as_deref()).await?,
        }

        Ok(())
    }
}

async fn run_department_command(service: &LedgerService, cmd: DepartmentCommands) -> Result<()> {
    match cmd {
        DepartmentCommands::Import { input, dry_run } => {
            use std::fs::File;
            use std::io::{stdin, Read};

            let reader: Box<dyn Read> = match input.as_deref() {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open input file: {}", path))?;
                    Box::new(file)
                }
                None => Box::new(stdin()),
            };

            let result = Importer::new(service)
                .import_departments_csv(reader, ImportOptions { dry_run })
                .await?;

            if dry_run {
                println!("DRY RUN - {} department(s) would be imported", result.imported);
            } else {
                println!("Imported {} department(s)", result.imported);
            }
            for error in &result.errors {
                match &error.field {
                    Some(field) => eprintln!("  line {} ({}): {}", error.line, field, error.error),
                    None => eprintln!("  line {}: {}", error.line, error.error),
                }
            }
        }

        DepartmentCommands::List => {
            let departments = service.list_departments().await?;
            if departments.is_empty() {
                println!("No departments found.");
            } else {
                println!("{:<6} {}", "ID", "NAME");
                println!("{}", "-".repeat(30));
                for department in departments {
                    println!("{:<6} {}", department.id.as_str(), department.name);
                }
            }
        }
    }
    Ok(())
}

async fn run_export_command(service: &LedgerService, output: Option<&str>) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = Exporter::new(service).export_charges_csv(writer).await?;
    if output.is_some() {
        eprintln!("Exported {} charges", count);
    }
    Ok(())
}

/// Parse a charge amount typed by the operator, falling back to the default.
pub(crate) fn parse_amount_or_default(input: &str) -> Result<Cents> {
    if input.trim().is_empty() {
        return Ok(DEFAULT_CHARGE_CENTS);
    }
    parse_cents(input).with_context(|| {
        format!(
            "Invalid amount '{}'. Use a decimal like {}",
            input,
            format_cents(DEFAULT_CHARGE_CENTS)
        )
    })
}
