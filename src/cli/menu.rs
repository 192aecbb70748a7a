use anyhow::Result;
use dialoguer::Input;

use crate::application::LedgerService;
use crate::domain::{format_cents, parse_cents, DEFAULT_CHARGE_CENTS};

use super::{parse_amount_or_default, print_outcome};

/// One entry of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    GenerateCharges,
    RegisterPayment,
    ListPending,
    SummarizeDepartment,
    DetailDepartment,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::GenerateCharges,
        MenuChoice::RegisterPayment,
        MenuChoice::ListPending,
        MenuChoice::SummarizeDepartment,
        MenuChoice::DetailDepartment,
        MenuChoice::Exit,
    ];

    pub fn parse(selection: &str) -> Option<Self> {
        match selection.trim() {
            "1" => Some(MenuChoice::GenerateCharges),
            "2" => Some(MenuChoice::RegisterPayment),
            "3" => Some(MenuChoice::ListPending),
            "4" => Some(MenuChoice::SummarizeDepartment),
            "5" => Some(MenuChoice::DetailDepartment),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::GenerateCharges => "Generate charges",
            MenuChoice::RegisterPayment => "Register payment",
            MenuChoice::ListPending => "List pending charges",
            MenuChoice::SummarizeDepartment => "Department summary",
            MenuChoice::DetailDepartment => "Department detail",
            MenuChoice::Exit => "Exit",
        }
    }
}

fn print_menu() {
    println!();
    println!("=== Common Expense Ledger ===");
    for (index, choice) in MenuChoice::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, choice.label());
    }
}

/// Run the interactive menu until the operator picks "Exit".
pub async fn run_menu(service: &LedgerService) -> Result<()> {
    loop {
        print_menu();
        let selection: String = Input::new()
            .with_prompt("Select an option")
            .allow_empty(true)
            .interact_text()?;

        match MenuChoice::parse(&selection) {
            Some(MenuChoice::Exit) => {
                println!("Goodbye!");
                return Ok(());
            }
            Some(choice) => run_choice(service, choice).await?,
            None => println!("Invalid option. Please try again."),
        }
    }
}

async fn run_choice(service: &LedgerService, choice: MenuChoice) -> Result<()> {
    match choice {
        MenuChoice::GenerateCharges => {
            let year: i32 = Input::new().with_prompt("Year").interact_text()?;
            let month: String = Input::new()
                .with_prompt("Month (leave empty for the whole year)")
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), &str> {
                    if input.trim().is_empty() || input.trim().parse::<u32>().is_ok() {
                        Ok(())
                    } else {
                        Err("Enter a month number or leave empty")
                    }
                })
                .interact_text()?;
            let amount: String = Input::new()
                .with_prompt("Amount per department")
                .default(format_cents(DEFAULT_CHARGE_CENTS))
                .validate_with(|input: &String| -> Result<(), &str> {
                    parse_cents(input)
                        .map(|_| ())
                        .map_err(|_| "Enter an amount like 50000 or 50000.00")
                })
                .interact_text()?;

            let month = match month.trim() {
                "" => None,
                m => Some(m.parse::<u32>()?),
            };
            let amount = parse_amount_or_default(&amount)?;
            print_outcome(service.generate_charges(year, month, amount).await)?;
        }

        MenuChoice::RegisterPayment => {
            let department: String = Input::new()
                .with_prompt("Department number")
                .interact_text()?;
            let year: i32 = Input::new().with_prompt("Year").interact_text()?;
            let month: u32 = Input::new().with_prompt("Month").interact_text()?;
            let payment_date: String = Input::new()
                .with_prompt("Payment date (YYYY-MM-DD)")
                .interact_text()?;

            print_outcome(
                service
                    .register_payment(&department, year, month, &payment_date)
                    .await,
            )?;
        }

        MenuChoice::ListPending => {
            let year: i32 = Input::new().with_prompt("Year").interact_text()?;
            let month: u32 = Input::new()
                .with_prompt("List pending charges up to month")
                .interact_text()?;

            print_outcome(service.list_pending(year, month).await)?;
        }

        MenuChoice::SummarizeDepartment => {
            let department: String = Input::new()
                .with_prompt("Department number")
                .interact_text()?;

            print_outcome(service.summarize_department(&department).await)?;
        }

        MenuChoice::DetailDepartment => {
            let department: String = Input::new()
                .with_prompt("Department number")
                .interact_text()?;

            println!("{}", service.detail_department(&department).await?);
        }

        MenuChoice::Exit => {}
    }

    Ok(())
}
