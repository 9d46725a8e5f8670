//! Admin user management commands.

use clap::{Args, Subcommand};
use sqlx::PgPool;

use quizdeck_auth::password::hasher::PasswordHasher;
use quizdeck_auth::password::validator::PasswordValidator;
use quizdeck_core::error::AppError;
use quizdeck_database::repositories::user::UserRepository;
use quizdeck_entity::user::{CreateUser, UserRole};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a new admin user (no-op if the email already exists)
    Create {
        /// Full name
        #[arg(short, long)]
        name: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Reset a user's password
    ResetPassword {
        /// Email of the user
        #[arg(short, long)]
        email: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool: PgPool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool.clone());
    let hasher = PasswordHasher::new();
    let validator = PasswordValidator::new();

    match &args.command {
        AdminCommand::Create {
            name,
            email,
            password,
        } => {
            let name = match name {
                Some(n) => n.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin full name")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            let email = match email {
                Some(e) => e.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Admin email")
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            if let Some(existing) = user_repo.find_by_email(&email).await? {
                output::print_warning(&format!(
                    "User with email '{}' already exists (id: {}), nothing to do",
                    email, existing.id
                ));
                return Ok(());
            }

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            validator.validate(&password)?;
            let password_hash = hasher.hash_password(&password)?;

            let user = user_repo
                .create(&CreateUser {
                    full_name: name.clone(),
                    email,
                    password_hash,
                    role: UserRole::Admin,
                })
                .await?;

            output::print_success(&format!("Admin user '{}' created (id: {})", name, user.id));
        }
        AdminCommand::ResetPassword { email, password } => {
            let user = user_repo
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", email)))?;

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("New password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            validator.validate(&password)?;
            let password_hash = hasher.hash_password(&password)?;
            user_repo.update_password(user.id, &password_hash).await?;

            output::print_success(&format!("Password reset for user '{}'", email));
        }
    }

    Ok(())
}
