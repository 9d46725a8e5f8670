//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod serve;
pub mod user;
pub mod worker;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use quizdeck_core::error::AppError;

/// QuizDeck — quiz management platform
#[derive(Debug, Parser)]
#[command(name = "quizdeck", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/default.toml + config/<env>.toml)
    #[arg(short, long, default_value = "default")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the QuizDeck server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin user management
    Admin(admin::AdminArgs),
    /// User management
    User(user::UserArgs),
    /// Worker and job queue management
    Worker(worker::WorkerArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Admin(args) => admin::execute(args, &self.env).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
            Commands::Worker(args) => worker::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for the given environment
pub fn load_config(env: &str) -> Result<quizdeck_core::config::AppConfig, AppError> {
    quizdeck_core::config::AppConfig::load(env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &quizdeck_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = quizdeck_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
