//! User CLI commands

use clap::Subcommand;

use crate::display::format_user_list;
use crate::error::BudgetwiseResult;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Full name
        name: String,
        /// Email address (used to refer to the user in other commands)
        email: String,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// List registered users
    List,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> BudgetwiseResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { name, email, phone } => {
            let user = service.register(&name, &email, phone.as_deref())?;
            println!("Registered user: {}", user);
            println!("  ID: {}", user.id);
        }
        UserCommands::List => {
            println!("{}", format_user_list(&service.list()?));
        }
    }

    Ok(())
}
