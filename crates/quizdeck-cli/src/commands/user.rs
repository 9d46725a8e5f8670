//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use quizdeck_core::error::AppError;
use quizdeck_database::repositories::user::UserRepository;
use quizdeck_entity::user::{User, UserRole};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List registered users
    List {
        /// Filter by name fragment
        #[arg(short, long)]
        search: Option<String>,
        /// Include admin accounts
        #[arg(long)]
        admins: bool,
    },
    /// Delete a user by email
    Delete {
        /// Email of the user to delete
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Full name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.full_name.clone(),
            email: u.email.clone(),
            role: format!("{:?}", u.role),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool.clone());

    match &args.command {
        UserCommand::List { search, admins } => {
            let mut users = match search {
                Some(fragment) => user_repo.search_by_name(fragment).await?,
                None => user_repo.find_by_role(UserRole::User).await?,
            };

            if *admins {
                users.extend(user_repo.find_by_role(UserRole::Admin).await?);
            }

            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Delete { email } => {
            let user = user_repo
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", email)))?;

            user_repo.delete(user.id).await?;
            output::print_success(&format!("User '{}' deleted", email));
        }
    }

    Ok(())
}
