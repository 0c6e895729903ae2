//! Forecast CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_forecast;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::SpendRecord;
use crate::services::{ForecastService, ImportService, UserService};
use crate::storage::Storage;

use super::parse_period;

/// Forecast subcommands
#[derive(Subcommand)]
pub enum ForecastCommands {
    /// Train the user's spending model
    Train {
        /// User email or ID
        user: String,
        /// Train on a CSV of spending (Date,Amount) instead of logged expenses.
        /// The rows are not stored as expenses.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show predicted daily spending
    Show {
        /// User email or ID
        user: String,
        /// Days after the end of the training data (default from config)
        #[arg(short, long, conflicts_with = "period")]
        days: Option<u32>,
        /// Predict a whole month instead (e.g., "2025-01", "next")
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a forecast command
pub fn handle_forecast_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ForecastCommands,
) -> BudgetwiseResult<()> {
    let users = UserService::new(storage);
    let service = ForecastService::new(storage);

    match cmd {
        ForecastCommands::Train { user, csv } => {
            let user = users.require(&user)?;
            let model = match csv {
                Some(path) => {
                    let parsed = ImportService::new(storage).parse_csv_file(&path)?;
                    let mut records: Vec<SpendRecord> = Vec::with_capacity(parsed.len());
                    for row in parsed {
                        let row = row.map_err(BudgetwiseError::Import)?;
                        records.push(row.spend_record());
                    }
                    service.train_from_records(&user, &records)?
                }
                None => service.train(&user)?,
            };
            println!(
                "Trained forecast model for {} on {} days ({} to {})",
                user.email, model.training_days, model.model.start_date, model.trained_through
            );
        }
        ForecastCommands::Show { user, days, period } => {
            let user = users.require(&user)?;
            let points = match period {
                Some(period) => service.forecast_period(&user, parse_period(Some(&period))?)?,
                None => service.predict(
                    &user,
                    days.unwrap_or(settings.allocation.forecast_horizon_days),
                )?,
            };
            let model = service
                .model(&user)?
                .ok_or_else(|| BudgetwiseError::ForecastUnavailable(user.email.clone()))?;
            print!(
                "{}",
                format_forecast(&model, &points, settings.currency_symbol.as_str())
            );
        }
    }

    Ok(())
}
