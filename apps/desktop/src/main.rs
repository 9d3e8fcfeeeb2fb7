use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{load_client_config, parse_user_id, UserDirectory, UsersClient};
use serde::Serialize;
use shared::domain::{User, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Headless client for the users REST API")]
struct Cli {
    /// Overrides the configured API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every user
    List,
    /// Print one user by id
    Get {
        #[arg(value_parser = parse_id)]
        id: UserId,
    },
    /// Replace a user with the fetched record plus the given field changes
    Update {
        #[arg(value_parser = parse_id)]
        id: UserId,
        #[command(flatten)]
        changes: FieldChanges,
    },
    /// Delete a user after confirmation
    Delete {
        #[arg(value_parser = parse_id)]
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct FieldChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// An empty value clears the phone
    #[arg(long)]
    phone: Option<String>,
    /// An empty value clears the address
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

fn parse_id(raw: &str) -> Result<UserId, String> {
    parse_user_id(raw).map_err(|err| err.to_string())
}

fn apply_changes(user: &mut User, changes: FieldChanges) {
    if let Some(name) = changes.name {
        user.name = name;
    }
    if let Some(email) = changes.email {
        user.email = email;
    }
    if let Some(phone) = changes.phone {
        user.phone = (!phone.is_empty()).then_some(phone);
    }
    if let Some(address) = changes.address {
        user.address = (!address.is_empty()).then_some(address);
    }
    if let Some(password) = changes.password {
        user.password = password;
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn confirm_delete(user_id: UserId) -> Result<bool> {
    print!("Are you sure you want to delete user {user_id}? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn refresh(client: &UsersClient) -> Result<()> {
    let users = client.list_users().await.context("failed to refresh user list")?;
    print_json(&users)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let config = load_client_config()?.with_base_url_override(cli.base_url)?;
    let client = UsersClient::from_config(&config)?;

    match cli.command {
        Command::List => refresh(&client).await?,
        Command::Get { id } => {
            let user = client
                .get_user(id)
                .await
                .with_context(|| format!("failed to fetch user {id}"))?;
            print_json(&user)?;
        }
        Command::Update { id, changes } => {
            let mut user = client
                .get_user(id)
                .await
                .with_context(|| format!("failed to fetch user {id}"))?;
            apply_changes(&mut user, changes);
            client
                .update_user(&user)
                .await
                .with_context(|| format!("failed to update user {id}"))?;
            tracing::info!(user_id = id.0, "user updated");
            refresh(&client).await?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm_delete(id)? {
                println!("Aborted.");
                return Ok(());
            }
            client
                .delete_user(id)
                .await
                .with_context(|| format!("failed to delete user {id}"))?;
            tracing::info!(user_id = id.0, "user deleted");
            refresh(&client).await?;
        }
    }

    Ok(())
}
