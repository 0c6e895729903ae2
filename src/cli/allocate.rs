//! Budget allocation command

use clap::{Args, ValueEnum};

use crate::allocator::DistributionRequest;
use crate::config::settings::Settings;
use crate::display::format_allocation;
use crate::error::BudgetwiseResult;
use crate::export::{export_allocation_csv, export_allocation_json, export_allocation_yaml};
use crate::services::{AllocationService, UserService};
use crate::storage::Storage;

use super::{parse_amount, parse_period, today};

/// Output format for an allocation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV rows
    Csv,
}

/// Arguments for `budgetwise allocate`
#[derive(Args)]
pub struct AllocateArgs {
    /// User email or ID
    pub user: String,

    /// Total budget to distribute (e.g., "3000")
    pub amount: String,

    /// Budget period (e.g., "2025-01", "current", "next")
    #[arg(short, long)]
    pub period: Option<String>,

    /// Use historical averages instead of the trained forecast
    #[arg(long)]
    pub no_forecast: bool,

    /// Percentage reserved for savings (default from config)
    #[arg(short, long)]
    pub savings: Option<f64>,

    /// Spendable amount under which a note is logged (default from config)
    #[arg(long)]
    pub min_reserve: Option<String>,

    /// Store the result as the allocation for this period
    #[arg(long)]
    pub save: bool,

    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Handle `budgetwise allocate`
pub fn handle_allocate_command(
    storage: &Storage,
    settings: &Settings,
    args: AllocateArgs,
) -> BudgetwiseResult<()> {
    let user = UserService::new(storage).require(&args.user)?;
    let prefs = &settings.allocation;

    let min_reserve = match args.min_reserve.as_deref() {
        Some(m) => parse_amount(m)?,
        None => prefs.min_reserve,
    };
    let budget = parse_amount(&args.amount)?;
    let period = parse_period(args.period.as_deref())?;
    let request = DistributionRequest::new(budget, period)
        .with_forecast(prefs.use_forecast && !args.no_forecast)
        .with_savings_percent(args.savings.unwrap_or(prefs.savings_percent))
        .with_min_reserve(min_reserve);

    let result = AllocationService::new(storage)
        .with_policy(prefs.policy())
        .distribute(&user, &request, today(), args.save)?;

    let mut stdout = std::io::stdout();
    match args.format {
        OutputFormat::Table => {
            print!("{}", format_allocation(&result, settings.currency_symbol.as_str()));
            if args.save {
                println!("Saved as the allocation for {}.", result.period);
            }
        }
        OutputFormat::Json => export_allocation_json(&user.email, &result, &mut stdout, true)?,
        OutputFormat::Yaml => export_allocation_yaml(&user.email, &result, &mut stdout)?,
        OutputFormat::Csv => export_allocation_csv(&result, &mut stdout)?,
    }

    Ok(())
}
