use clap::Subcommand;
use serde_json::json;
use sqlx::SqlitePool;

use crate::cli::utils::{output_success, output_users};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::{DatabaseManager, WriteTransaction};
use crate::services::user_service;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user account")]
    Create {
        #[arg(help = "Email address")]
        email: String,
        #[arg(help = "Password")]
        password: String,
        #[arg(long, help = "Grant the admin flag")]
        admin: bool,
    },

    #[command(about = "Grant the admin flag to an existing user")]
    Promote {
        #[arg(help = "Email address")]
        email: String,
    },

    #[command(about = "Clear the admin flag of an existing user")]
    Demote {
        #[arg(help = "Email address")]
        email: String,
    },

    #[command(about = "List all users")]
    List,
}

async fn open_pool() -> anyhow::Result<SqlitePool> {
    Ok(DatabaseManager::connect(&config::config().database).await?)
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = open_pool().await?;

    match cmd {
        UserCommands::Create { email, password, admin } => {
            if email.is_empty() || password.is_empty() {
                anyhow::bail!("Email and password are required");
            }
            let mut tx = WriteTransaction::begin(&pool).await?;
            let user = user_service::create_user(&mut tx, &email, &password, admin).await?;
            tx.commit().await?;

            output_success(
                output_format,
                &format!("Created user {} (id {})", user.email, user.id),
                Some(json!({ "user": user })),
            )
        }
        UserCommands::Promote { email } => set_admin(&pool, &email, true, output_format).await,
        UserCommands::Demote { email } => set_admin(&pool, &email, false, output_format).await,
        UserCommands::List => {
            let mut conn = pool.acquire().await?;
            let users = user_service::list_users(&mut conn).await?;
            output_users(output_format, &users)
        }
    }
}

async fn set_admin(
    pool: &SqlitePool,
    email: &str,
    is_admin: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut tx = WriteTransaction::begin(pool).await?;
    let user = user_service::set_admin(&mut tx, email, is_admin).await?;
    tx.commit().await?;

    let verb = if is_admin { "Granted" } else { "Revoked" };
    output_success(
        output_format,
        &format!("{} admin for {}", verb, user.email),
        Some(json!({ "user": user })),
    )
}
