use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetwise::cli::{
    handle_allocate_command, handle_budget_command, handle_categories_command,
    handle_expense_command, handle_forecast_command, handle_user_command, AllocateArgs,
    BudgetCommands, ExpenseCommands, ForecastCommands, UserCommands,
};
use budgetwise::config::{paths::BudgetwisePaths, settings::Settings};
use budgetwise::logging::init_tracing;
use budgetwise::storage::{RetryPolicy, Storage};

#[derive(Parser)]
#[command(
    name = "budgetwise",
    version,
    about = "Personal spending tracker with forecast-driven budgeting",
    long_about = "Budgetwise logs expenses against monthly budgets, learns each user's \
                  daily spending pattern, and splits a monthly budget across spending \
                  categories using that forecast or past spending."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default configuration
    Init,

    /// Show current configuration and paths
    Config,

    /// List spending categories
    Categories,

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense logging and history
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Spending forecast commands
    #[command(subcommand)]
    Forecast(ForecastCommands),

    /// Split a monthly budget across categories
    Allocate(AllocateArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BudgetwisePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Budgetwise - forecast-driven budgeting");
        println!();
        println!("Run 'budgetwise --help' for usage information.");
        return Ok(());
    };

    let storage = Storage::open(paths.clone(), RetryPolicy::from(&settings.retry))?;

    match command {
        Commands::Init => {
            println!("Initializing Budgetwise at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  budgetwise user add \"Your Name\" you@example.com");
            println!("  budgetwise budget set you@example.com 3000");
        }
        Commands::Config => {
            println!("Budgetwise Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!("  Savings percent:       {}%", settings.allocation.savings_percent);
            println!(
                "  Minimum reserve:       {}",
                settings
                    .allocation
                    .min_reserve
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!("  Use forecast:          {}", settings.allocation.use_forecast);
            println!("  Fixed bill threshold:  {}", settings.allocation.fixed_bill_threshold);
            println!("  History months:        {}", settings.allocation.history_months);
            println!("  Forecast horizon:      {} days", settings.allocation.forecast_horizon_days);
            println!("  Commit retries:        {}", settings.retry.max_attempts);
        }
        Commands::Categories => handle_categories_command(),
        Commands::User(cmd) => handle_user_command(&storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Forecast(cmd) => handle_forecast_command(&storage, &settings, cmd)?,
        Commands::Allocate(args) => handle_allocate_command(&storage, &settings, args)?,
        Commands::Audit { count } => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    storage.close()?;
    Ok(())
}
